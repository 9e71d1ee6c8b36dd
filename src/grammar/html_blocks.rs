//! Raw HTML block recognition (§4.2, "Raw HTML blocks" / "Style blocks").
//!
//! Four forms are recognized, same as the reference grammar: a table of
//! block-level tag names with balanced same-tag nesting, `<script>`/`<pre>`/
//! `<style>`'s literal-content form, a `<!-- comment -->` form, and a
//! `<? processing instruction ?>` form. Matching is memoized per start
//! offset (`Parser::html_block_memo`) since the balanced-nesting scan would
//! otherwise be re-attempted by every backtracking alternative that probes
//! the same position (§4.1 "Performance contract").

include!(concat!(env!("OUT_DIR"), "/blocktags.rs"));

use crate::grammar::{find_line_end, Parser};
use crate::strings::is_blank;

const LITERAL_TAGS: &[&str] = &["script", "pre", "style", "textarea"];

/// Returns the end offset of a raw HTML block starting at `pos`, along with
/// the tag name matched (for `StyleBlock`'s `FilterStyles` gating), if one
/// is recognized there.
pub fn match_html_block<'i>(p: &Parser<'i, '_>, pos: usize) -> Option<(usize, Option<&'static str>)> {
    crate::peg::memoize(&p.html_block_memo, pos, || match_html_block_uncached(p, pos))
}

fn match_html_block_uncached<'i>(p: &Parser<'i, '_>, pos: usize) -> Option<(usize, Option<&'static str>)> {
    let input = &p.input;
    if input.at(pos) != Some(b'<') {
        return None;
    }

    if input.starts_with(pos, b"<!--") {
        return match_until(p, pos, b"-->").map(|end| (end, None));
    }
    if input.starts_with(pos, b"<?") {
        return match_until(p, pos, b"?>").map(|end| (end, None));
    }
    if input.starts_with(pos, b"<![CDATA[") {
        return match_until(p, pos, b"]]>").map(|end| (end, None));
    }

    let mut i = pos + 1;
    let mut closing = false;
    if input.at(i) == Some(b'!') {
        // Declaration, e.g. <!DOCTYPE html>: ends at '>' on the opening line.
        let line_end = find_line_end(input, pos);
        if let Some(gt) = find_byte(input.text(pos, line_end), b'>') {
            return Some((pos + gt + 1, None));
        }
        return None;
    }
    if input.at(i) == Some(b'/') {
        closing = true;
        i += 1;
    }
    let name_start = i;
    while matches!(input.at(i), Some(c) if c.is_ascii_alphanumeric()) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = input.text(name_start, i).to_ascii_lowercase();

    if LITERAL_TAGS.contains(&name.as_str()) {
        if closing {
            return None;
        }
        let close_tag = format!("</{name}>");
        return match_until_ignore_case(p, pos, close_tag.as_bytes()).map(|end| (end, Some(literal_tag_of(&name))));
    }

    if !BLOCK_TAGS.contains(name.as_str()) {
        return None;
    }

    // A lone closing tag for a block-level name also opens a type-6 block
    // (depth starts at 0, so it ends at the next blank line like any other
    // non-nesting type-6 block).
    let open_tag_lower = format!("<{name}");
    let close_tag_lower = format!("</{name}>");
    let mut depth: i32 = if closing { 0 } else { 1 };
    let mut line_start = find_line_end(input, pos);
    let mut last_end = line_start;

    loop {
        if line_start >= input.len() {
            break;
        }
        let this_line_end = find_line_end(input, line_start);
        let line = input.text(line_start, this_line_end);
        if is_blank(line) && last_end != line_start {
            break;
        }
        let lower = line.to_ascii_lowercase();
        for (needle, delta) in [(open_tag_lower.as_str(), 1), (close_tag_lower.as_str(), -1)] {
            let mut searched = 0;
            while let Some(off) = lower[searched..].find(needle) {
                depth += delta;
                searched += off + needle.len();
            }
        }
        last_end = this_line_end;
        if depth <= 0 {
            break;
        }
        line_start = this_line_end;
    }

    Some((last_end, None))
}

fn literal_tag_of(name: &str) -> &'static str {
    LITERAL_TAGS.iter().find(|&&t| t == name).copied().unwrap_or("script")
}

fn find_byte(s: &str, b: u8) -> Option<usize> {
    s.as_bytes().iter().position(|&c| c == b)
}

/// Scans forward from `pos` for `needle`, then consumes through the end of
/// that line and (per the grammar's "followed by blank line" requirement)
/// through any immediately following blank line.
fn match_until<'i>(p: &Parser<'i, '_>, pos: usize, needle: &[u8]) -> Option<usize> {
    let input = &p.input;
    let bytes = input.bytes;
    let rel = find_subslice(&bytes[pos..], needle)?;
    let found_at = pos + rel + needle.len();
    Some(find_line_end(input, found_at))
}

fn match_until_ignore_case<'i>(p: &Parser<'i, '_>, pos: usize, needle: &[u8]) -> Option<usize> {
    let input = &p.input;
    let hay = input.text(pos, input.len()).to_ascii_lowercase();
    let needle_lower = String::from_utf8_lossy(needle).to_ascii_lowercase();
    let rel = hay.find(needle_lower.as_str())?;
    let found_at = pos + rel + needle.len();
    Some(find_line_end(input, found_at))
}

fn find_subslice(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| &hay[i..i + needle.len()] == needle)
}
