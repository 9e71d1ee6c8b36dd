//! Numeric and named HTML entity resolution.
//!
//! The named-entity table is generated at build time from the `entities`
//! crate's data (see `build.rs`) and searched by binary search; the sorted
//! array is included directly rather than built into a `phf::Map` so that
//! prefix scans (`ENTITY_MIN_LENGTH..ENTITY_MAX_LENGTH`) stay cheap.

include!(concat!(env!("OUT_DIR"), "/entitydata.rs"));

use crate::ctype::{isdigit, isxdigit};
use std::char;
use std::cmp::min;

pub const ENTITY_MIN_LENGTH: usize = 2;
pub const ENTITY_MAX_LENGTH: usize = 32;

/// Resolves a numeric (`#NN` / `#xNN`) or named entity beginning just past
/// the `&`, per the grammar's clean `DecEntity`/`HexEntity`/`NamedEntity`
/// productions (the generated peg-markdown grammar this is modelled on has a
/// stray `>` in its `DecEntity` rule; that's not reproduced here).
///
/// Returns the decoded UTF-8 bytes and the number of input bytes consumed
/// (not including the leading `&`), or `None` if nothing recognizable
/// follows.
pub fn unescape(text: &[u8]) -> Option<(Vec<u8>, usize)> {
    if text.len() >= 3 && text[0] == b'#' {
        let mut codepoint: u32 = 0;
        let mut i;

        let num_digits = if text.len() > 1 && isdigit(text[1]) {
            i = 1;
            while i < text.len() && isdigit(text[i]) {
                codepoint = codepoint.saturating_mul(10).saturating_add((text[i] - b'0') as u32);
                codepoint = min(codepoint, 0x11_0000);
                i += 1;
            }
            i - 1
        } else if text.len() > 1 && (text[1] == b'x' || text[1] == b'X') {
            i = 2;
            while i < text.len() && isxdigit(text[i]) {
                let digit = (text[i] as char).to_digit(16).unwrap();
                codepoint = codepoint.saturating_mul(16).saturating_add(digit);
                codepoint = min(codepoint, 0x11_0000);
                i += 1;
            }
            i - 2
        } else {
            0
        };

        if num_digits >= 1 && num_digits <= 8 && i < text.len() && text[i] == b';' {
            if codepoint == 0 || (0xD800..=0xDFFF).contains(&codepoint) || codepoint >= 0x110000 {
                codepoint = 0xFFFD;
            }
            return Some((
                char::from_u32(codepoint)
                    .unwrap_or('\u{FFFD}')
                    .to_string()
                    .into_bytes(),
                i + 1,
            ));
        }
        return None;
    }

    let size = min(text.len(), ENTITY_MAX_LENGTH);
    for i in ENTITY_MIN_LENGTH..size {
        if text[i] == b' ' {
            return None;
        }
        if text[i] == b';' {
            return lookup(std::str::from_utf8(&text[..i]).ok()?).map(|chs| (chs.as_bytes().to_vec(), i + 1));
        }
    }

    None
}

fn lookup(name: &str) -> Option<&'static str> {
    entitydata::TRANSLATED_ENTITIES
        .binary_search_by_key(&name, |&(k, _)| k)
        .ok()
        .map(|idx| entitydata::TRANSLATED_ENTITIES[idx].1)
}

/// Walks `src`, replacing any `&entity;` sequences with their decoded form.
/// Used to unescape already-recognized URL and title strings (which are
/// never re-run through the grammar).
pub fn unescape_html(src: &str) -> String {
    let bytes = src.as_bytes();
    let size = bytes.len();
    let mut i = 0;
    let mut v = Vec::with_capacity(size);

    while i < size {
        let org = i;
        while i < size && bytes[i] != b'&' {
            i += 1;
        }
        if i > org {
            v.extend_from_slice(&bytes[org..i]);
        }
        if i >= size {
            break;
        }
        i += 1;
        match unescape(&bytes[i..]) {
            Some((chs, consumed)) => {
                v.extend_from_slice(&chs);
                i += consumed;
            }
            None => v.push(b'&'),
        }
    }

    // SAFETY: we only ever copy whole UTF-8 sequences (either untouched
    // slices of `src`, or the UTF-8 bytes of a decoded `char`).
    unsafe { String::from_utf8_unchecked(v) }
}
