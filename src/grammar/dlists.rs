//! `DefinitionList` (§4.2, extension `dlists`): a run of title lines
//! immediately followed by one or more `:`/`~`-introduced definitions.
//!
//! ```text
//! Term
//! :   Definition text, possibly
//!     continued on an indented line.
//! ```
//!
//! Each definition's body is captured as `RAW` and reparsed as blocks by the
//! driver's post-pass, the same as a list item's (§4.4 step 5), so a
//! multi-paragraph definition works without special-casing it here.

use crate::grammar::{is_blank_line, take_line, Parser};
use crate::nodes::{make, make_text, Element, Tag};

pub fn definition_list<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    if !p.ext.dlists {
        return None;
    }
    let input = &p.input;

    // A title line: non-blank, not itself a definition marker, followed
    // directly (no blank line) by a `:`/`~` marker line.
    let (title_line, after_title) = take_line(input, pos);
    if is_blank_line(title_line) || is_def_marker(title_line) {
        return None;
    }
    let (marker_line, _) = take_line(input, after_title);
    if !is_def_marker(marker_line) {
        return None;
    }

    let node = make(p.arena, Tag::DefinitionList);
    let mut cur = pos;

    loop {
        let (title_line, after_title) = take_line(input, cur);
        if is_blank_line(title_line) || is_def_marker(title_line) {
            break;
        }
        let (marker_line, _) = take_line(input, after_title);
        if !is_def_marker(marker_line) {
            break;
        }

        let title_text = title_line.trim_matches(['\n', '\r']);
        let title_node = make(p.arena, Tag::DefTitle);
        for child in p.reparse_as_inlines(title_text) {
            title_node.append(child);
        }
        node.append(title_node);

        cur = after_title;
        while is_def_marker(take_line(input, cur).0) {
            let (end, def_node) = parse_definition(p, cur);
            node.append(def_node);
            cur = end;
        }
    }

    if node.first_child().is_none() {
        return None;
    }
    Some((cur, node))
}

fn is_def_marker(line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    trimmed.starts_with(':') || trimmed.starts_with('~')
}

fn parse_definition<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> (usize, &'a Element<'a>) {
    let input = &p.input;
    let (first_line, mut cur) = take_line(input, pos);
    let marker_end = first_line.find([':', '~']).map(|i| i + 1).unwrap_or(1);
    let mut body = first_line[marker_end..].trim_start_matches([' ', '\t']).to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }

    loop {
        if cur >= input.len() {
            break;
        }
        let (line, next) = take_line(input, cur);
        if is_blank_line(line) {
            let (after, _) = take_line(input, next);
            if !after.starts_with("    ") {
                cur = next;
                break;
            }
            body.push('\n');
            cur = next;
            continue;
        }
        if !line.starts_with("    ") || is_def_marker(line) {
            break;
        }
        body.push_str(&line[4.min(line.len())..]);
        cur = next;
    }
    while body.ends_with("\n\n") {
        body.pop();
    }

    let def_node = make(p.arena, Tag::DefData);
    def_node.append(make_text(p.arena, Tag::Raw, body));
    (cur, def_node)
}
