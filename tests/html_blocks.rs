//! Raw HTML block recognition and the `filter_html`/`filter_styles`
//! options that drop their contents from the rendered output.

mod common;

use common::html_ext;
use peggy_md::ExtensionSet;

#[test]
fn a_block_level_tag_is_passed_through_verbatim() {
    html_ext(
        "<div>\n<p>raw</p>\n</div>\n",
        ExtensionSet::default(),
        "<div>\n<p>raw</p>\n</div>\n",
    );
}

#[test]
fn filter_html_drops_a_block_entirely() {
    html_ext(
        "<div>\n<p>raw</p>\n</div>\n\nAfter.\n",
        ExtensionSet { filter_html: true, ..Default::default() },
        "<p>After.</p>\n",
    );
}

#[test]
fn an_html_comment_is_its_own_block() {
    html_ext(
        "<!-- a comment -->\n\nText.\n",
        ExtensionSet::default(),
        "<!-- a comment -->\n\n<p>Text.</p>\n",
    );
}

#[test]
fn style_block_passes_through_by_default() {
    html_ext(
        "<style>\nbody { color: red; }\n</style>\n",
        ExtensionSet::default(),
        "<style>\nbody { color: red; }\n</style>\n",
    );
}

#[test]
fn filter_styles_drops_a_style_block_but_not_other_html() {
    let ext = ExtensionSet { filter_styles: true, ..Default::default() };
    html_ext("<style>\nbody { color: red; }\n</style>\n", ext, "");
    html_ext("<div>\nkept\n</div>\n", ext, "<div>\nkept\n</div>\n");
}

#[test]
fn nested_same_tag_blocks_balance_depth() {
    html_ext(
        "<div>\n<div>\ninner\n</div>\n</div>\n",
        ExtensionSet::default(),
        "<div>\n<div>\ninner\n</div>\n</div>\n",
    );
}
