//! Regression fixtures for the engine's literal end-to-end scenarios and
//! boundary cases, each a self-contained input/output pair.

mod common;

use common::{html, html_ext};
use peggy_md::ExtensionSet;

#[test]
fn plain_sentence_wraps_in_a_paragraph() {
    html("Hello, world.\n", "<p>Hello, world.</p>\n");
}

#[test]
fn heading_then_paragraph_are_separated_by_a_blank_line() {
    html(
        "# Title\n\nBody.\n",
        "<h1>Title</h1>\n\n<p>Body.</p>\n",
    );
}

#[test]
fn emphasis_and_strong_emphasis() {
    html(
        "*em* and **strong**\n",
        "<p><em>em</em> and <strong>strong</strong></p>\n",
    );
}

#[test]
fn reference_link_resolves_from_a_later_definition() {
    html(
        "[x][y]\n\n[y]: http://e.x \"T\"\n",
        "<p><a href=\"http://e.x\" title=\"T\">x</a></p>\n",
    );
}

#[test]
fn tight_bullet_list() {
    html(
        "- a\n- b\n",
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n",
    );
}

#[test]
fn smart_typography_dash_and_ellipsis() {
    // `smart_punct` recognizes the ASCII `--`/`...` convention for dashes
    // and ellipses (matching `src/options.rs`'s own doctest), not a literal
    // em-dash character.
    html_ext(
        "'Hi'--really...\n",
        ExtensionSet { smart: true, ..Default::default() },
        "<p>&lsquo;Hi&rsquo;&mdash;really&hellip;</p>\n",
    );
}

#[test]
fn empty_input_produces_empty_output() {
    html("", "");
}

#[test]
fn blank_lines_only_produce_empty_output() {
    html("\n\n   \n\t\n", "");
}

#[test]
fn heading_levels_one_through_six() {
    html("# h1\n", "<h1>h1</h1>\n");
    html("## h2\n", "<h2>h2</h2>\n");
    html("### h3\n", "<h3>h3</h3>\n");
    html("#### h4\n", "<h4>h4</h4>\n");
    html("##### h5\n", "<h5>h5</h5>\n");
    html("###### h6\n", "<h6>h6</h6>\n");
}

#[test]
fn seven_hashes_is_a_paragraph_not_a_heading() {
    html("####### not a heading\n", "<p>####### not a heading</p>\n");
}

#[test]
fn four_space_indent_is_verbatim() {
    html("    code\n", "<pre><code>code</code></pre>\n");
}

#[test]
fn three_space_indent_is_a_paragraph() {
    html("   text\n", "<p>text</p>\n");
}

#[test]
fn code_span_with_five_backticks_ignores_shorter_runs() {
    html(
        "`````co````de`````\n",
        "<p><code>co````de</code></p>\n",
    );
}

#[test]
fn unmatched_reference_label_falls_back_to_literal_brackets() {
    html("[nope][nowhere]\n", "<p>[nope][nowhere]</p>\n");
}

#[test]
fn reference_labels_fold_case_and_internal_whitespace() {
    html(
        "[x][Foo   Bar]\n\n[foo bar]: http://e.x\n",
        "<p><a href=\"http://e.x\">x</a></p>\n",
    );
}

#[test]
fn list_item_count_matches_parsed_items() {
    html(
        "- one\n- two\n- three\n",
        "<ul>\n<li>one</li>\n<li>two</li>\n<li>three</li>\n</ul>\n",
    );
}
