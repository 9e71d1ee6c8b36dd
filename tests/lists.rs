//! Bullet and ordered lists: tight vs. loose item rendering, `start`
//! numbering, and multi-paragraph (loose) items.

mod common;

use common::html;

#[test]
fn ordered_list_uses_the_first_items_start_number() {
    html(
        "3. three\n4. four\n",
        "<ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n",
    );
}

#[test]
fn ordered_list_starting_at_one_omits_the_start_attribute() {
    html("1. one\n2. two\n", "<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n");
}

#[test]
fn a_blank_line_between_items_makes_the_list_loose() {
    html(
        "- a\n\n- b\n",
        "<ul>\n<li><p>a</p>\n</li>\n<li><p>b</p>\n</li>\n</ul>\n",
    );
}

#[test]
fn list_item_with_a_continuation_line_stays_tight() {
    html(
        concat!("- one\n  still one\n- two\n"),
        "<ul>\n<li>one still one</li>\n<li>two</li>\n</ul>\n",
    );
}

#[test]
fn list_item_containing_a_nested_blockquote() {
    html(
        "- > quoted\n",
        "<ul>\n<li><blockquote>\n<p>quoted</p>\n</blockquote>\n</li>\n</ul>\n",
    );
}

#[test]
fn plus_and_asterisk_markers_both_work() {
    html("+ a\n+ b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    html("* a\n* b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
}
