//! Inline-level constructs: emphasis, code spans, escapes, entities, raw
//! HTML, and autolinks.

mod common;

use common::{html, html_ext};
use peggy_md::ExtensionSet;

#[test]
fn nested_emphasis_and_strong() {
    html(
        "*a **b** c*\n",
        "<p><em>a <strong>b</strong> c</em></p>\n",
    );
}

#[test]
fn underscore_emphasis_is_not_intraword() {
    // `_` inside a word (e.g. `foo_bar_baz`) must not open/close emphasis.
    html("foo_bar_baz\n", "<p>foo_bar_baz</p>\n");
}

#[test]
fn code_span_strips_one_layer_of_surrounding_space() {
    html("`` `code` ``\n", "<p><code>`code`</code></p>\n");
}

#[test]
fn unclosed_code_span_falls_back_to_literal_backtick() {
    html("`oops\n", "<p>`oops</p>\n");
}

#[test]
fn escaped_punctuation_is_literal() {
    html("\\*not emphasis\\*\n", "<p>*not emphasis*</p>\n");
}

#[test]
fn backslash_before_a_letter_is_not_an_escape() {
    html("\\a\n", "<p>\\a</p>\n");
}

#[test]
fn named_and_numeric_entities_decode() {
    html("&amp; &#65; &#x42;\n", "<p>&amp; A B</p>\n");
}

#[test]
fn autolink_uri_and_email() {
    html(
        "<http://example.com> and <a@b.com>\n",
        "<p><a href=\"http://example.com\">http://example.com</a> and \
<a href=\"mailto:a@b.com\">a@b.com</a></p>\n",
    );
}

#[test]
fn raw_inline_html_passes_through_by_default() {
    html("Hi <span class=\"x\">there</span>.\n", "<p>Hi <span class=\"x\">there</span>.</p>\n");
}

#[test]
fn raw_inline_html_is_dropped_under_filter_html() {
    html_ext(
        "Hi <span>there</span>.\n",
        ExtensionSet { filter_html: true, ..Default::default() },
        "<p>Hi there.</p>\n",
    );
}

#[test]
fn inline_link_with_title() {
    html(
        "[text](http://e.x \"a title\")\n",
        "<p><a href=\"http://e.x\" title=\"a title\">text</a></p>\n",
    );
}

#[test]
fn inline_image() {
    html(
        "![alt text](http://e.x/i.png)\n",
        "<p><img src=\"http://e.x/i.png\" alt=\"alt text\" /></p>\n",
    );
}

#[test]
fn href_with_ampersand_is_entity_escaped() {
    html(
        "[x](http://e.x/a?b=1&c=2)\n",
        "<p><a href=\"http://e.x/a?b=1&amp;c=2\">x</a></p>\n",
    );
}

#[test]
fn hard_line_break_from_trailing_double_space() {
    html("a  \nb\n", "<p>a<br />\nb</p>\n");
}

#[test]
fn hard_line_break_from_trailing_backslash() {
    html("a\\\nb\n", "<p>a<br />\nb</p>\n");
}
