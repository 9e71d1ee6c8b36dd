//! Shared helpers for the integration tests, following the teacher's own
//! `html(input, expected)` convention (`src/tests/core.rs`): render `input`
//! with a given [`ExtensionSet`] and compare against `expected` verbatim.

use peggy_md::ExtensionSet;

#[allow(dead_code)]
pub fn html(input: &str, expected: &str) {
    html_ext(input, ExtensionSet::default(), expected);
}

#[allow(dead_code)]
pub fn html_ext(input: &str, ext: ExtensionSet, expected: &str) {
    let doc = peggy_md::parse(input.as_bytes(), ext);
    pretty_assertions::assert_eq!(doc.write_html_string(), expected.to_string());
}
