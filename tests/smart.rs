//! Smart typography extension: curly quotes, dashes, ellipses, and
//! apostrophes, gated entirely behind `ExtensionSet::smart`.

mod common;

use common::html_ext;
use peggy_md::ExtensionSet;

fn smart() -> ExtensionSet {
    ExtensionSet { smart: true, ..Default::default() }
}

#[test]
fn double_quotes_become_curly() {
    html_ext("\"Hi there\"\n", smart(), "<p>&ldquo;Hi there&rdquo;</p>\n");
}

#[test]
fn em_dash_from_double_hyphen() {
    html_ext("foo--bar\n", smart(), "<p>foo&mdash;bar</p>\n");
}

#[test]
fn em_dash_from_triple_hyphen() {
    html_ext("foo---bar\n", smart(), "<p>foo&mdash;bar</p>\n");
}

#[test]
fn en_dash_before_a_digit() {
    html_ext("pages 3-5\n", smart(), "<p>pages 3&ndash;5</p>\n");
}

#[test]
fn a_single_hyphen_between_words_is_literal() {
    html_ext("well-known\n", smart(), "<p>well-known</p>\n");
}

#[test]
fn ellipsis_from_three_dots_or_spaced_dots() {
    html_ext("Wait...\n", smart(), "<p>Wait&hellip;</p>\n");
    html_ext("Wait. . .\n", smart(), "<p>Wait&hellip;</p>\n");
}

#[test]
fn apostrophe_in_a_contraction_does_not_open_a_quote() {
    html_ext("don't\n", smart(), "<p>don&rsquo;t</p>\n");
}

#[test]
fn single_quotes_become_curly() {
    html_ext("'Hi'\n", smart(), "<p>&lsquo;Hi&rsquo;</p>\n");
}

#[test]
fn without_the_extension_punctuation_is_left_alone() {
    html_ext(
        "\"Hi\"--there...\n",
        ExtensionSet::default(),
        "<p>&quot;Hi&quot;--there...</p>\n",
    );
}
