//! Footnote extension (`notes`): `[^label]` references, block-level
//! `[^label]: ...` definitions, and the inline `^[...]` shorthand, plus the
//! trailing `<div class="footnotes">` section.

mod common;

use common::html_ext;
use peggy_md::ExtensionSet;

fn notes() -> ExtensionSet {
    ExtensionSet { notes: true, ..Default::default() }
}

#[test]
fn a_single_footnote_reference_and_section() {
    html_ext(
        "Hi[^x].\n\n[^x]: Bye.\n",
        notes(),
        concat!(
            "<p>Hi<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup>.</p>\n",
            "\n",
            "<div class=\"footnotes\">\n",
            "<ol>\n",
            "<li id=\"fn:1\"><p>Bye.</p>\n <a href=\"#fnref:1\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "</ol>\n",
            "</div>\n",
        ),
    );
}

#[test]
fn footnotes_are_numbered_by_order_of_reference_not_definition() {
    html_ext(
        concat!(
            "a[^two] b[^one]\n",
            "\n",
            "[^one]: First defined, second used.\n",
            "[^two]: First used, first defined.\n",
        ),
        notes(),
        concat!(
            "<p>a<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup> ",
            "b<sup id=\"fnref:2\"><a href=\"#fn:2\" class=\"footnote-ref\">2</a></sup></p>\n",
            "\n",
            "<div class=\"footnotes\">\n",
            "<ol>\n",
            "<li id=\"fn:1\"><p>First used, first defined.</p>\n <a href=\"#fnref:1\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "<li id=\"fn:2\"><p>First defined, second used.</p>\n <a href=\"#fnref:2\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "</ol>\n",
            "</div>\n",
        ),
    );
}

#[test]
fn a_repeated_reference_reuses_its_number() {
    html_ext(
        "a[^x] b[^x]\n\n[^x]: Once.\n",
        notes(),
        concat!(
            "<p>a<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup> ",
            "b<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup></p>\n",
            "\n",
            "<div class=\"footnotes\">\n",
            "<ol>\n",
            "<li id=\"fn:1\"><p>Once.</p>\n <a href=\"#fnref:1\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "</ol>\n",
            "</div>\n",
        ),
    );
}

#[test]
fn inline_footnote_shorthand() {
    html_ext(
        "Hi.^[Said inline.]\n",
        notes(),
        concat!(
            "<p>Hi.<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup></p>\n",
            "\n",
            "<div class=\"footnotes\">\n",
            "<ol>\n",
            "<li id=\"fn:1\">Said inline. <a href=\"#fnref:1\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "</ol>\n",
            "</div>\n",
        ),
    );
}

#[test]
fn multi_paragraph_footnote_body() {
    html_ext(
        concat!(
            "Hi[^x].\n",
            "\n",
            "[^x]: Para one.\n",
            "\n",
            "    Para two.\n",
        ),
        notes(),
        concat!(
            "<p>Hi<sup id=\"fnref:1\"><a href=\"#fn:1\" class=\"footnote-ref\">1</a></sup>.</p>\n",
            "\n",
            "<div class=\"footnotes\">\n",
            "<ol>\n",
            "<li id=\"fn:1\"><p>Para one.</p>\n\n<p>Para two.</p>\n ",
            "<a href=\"#fnref:1\" class=\"footnote-backref\">&#8617;</a></li>\n",
            "</ol>\n",
            "</div>\n",
        ),
    );
}

#[test]
fn an_unreferenced_footnote_definition_is_not_emitted() {
    html_ext("Hi.\n\n[^x]: Unused.\n", notes(), "<p>Hi.</p>\n");
}

#[test]
fn caret_without_the_notes_extension_is_literal() {
    html_ext("Hi[^x].\n", ExtensionSet::default(), "<p>Hi[^x].</p>\n");
}
