//! PHP Markdown Extra-style definition lists (extension `dlists`): a title
//! line followed directly by one or more `:`/`~`-marked definitions.

mod common;

use common::html_ext;
use peggy_md::ExtensionSet;

fn dlists() -> ExtensionSet {
    ExtensionSet { dlists: true, ..Default::default() }
}

#[test]
fn a_single_term_and_definition() {
    html_ext(
        "Apple\n:   A fruit.\n",
        dlists(),
        "<dl>\n<dt>Apple</dt>\n<dd><p>A fruit.</p>\n</dd>\n</dl>\n",
    );
}

#[test]
fn a_term_with_two_definitions() {
    html_ext(
        concat!("Apple\n", ":   A fruit.\n", ":   A tech company.\n"),
        dlists(),
        concat!(
            "<dl>\n<dt>Apple</dt>\n",
            "<dd><p>A fruit.</p>\n</dd>\n",
            "<dd><p>A tech company.</p>\n</dd>\n",
            "</dl>\n",
        ),
    );
}

#[test]
fn the_tilde_marker_also_introduces_a_definition() {
    html_ext(
        "Apple\n~   A fruit.\n",
        dlists(),
        "<dl>\n<dt>Apple</dt>\n<dd><p>A fruit.</p>\n</dd>\n</dl>\n",
    );
}

#[test]
fn multiple_terms_in_one_list() {
    html_ext(
        concat!("Apple\n", ":   A fruit.\n", "Orange\n", ":   Another fruit.\n"),
        dlists(),
        concat!(
            "<dl>\n",
            "<dt>Apple</dt>\n",
            "<dd><p>A fruit.</p>\n</dd>\n",
            "<dt>Orange</dt>\n",
            "<dd><p>Another fruit.</p>\n</dd>\n",
            "</dl>\n",
        ),
    );
}

#[test]
fn multi_paragraph_definition_body() {
    html_ext(
        concat!(
            "Apple\n",
            ":   Para one.\n",
            "\n",
            "    Para two.\n",
        ),
        dlists(),
        "<dl>\n<dt>Apple</dt>\n<dd><p>Para one.</p>\n\n<p>Para two.</p>\n</dd>\n</dl>\n",
    );
}

#[test]
fn without_the_extension_it_parses_as_a_single_paragraph() {
    html_ext(
        "Apple\n:   A fruit.\n",
        ExtensionSet::default(),
        "<p>Apple : A fruit.</p>\n",
    );
}
