//! `Notes` (§4.3/§4.4 step 2, extension `notes`): a pre-pass, run only when
//! footnotes are enabled, that collects every block-level `[^label]: ...`
//! definition's raw body text into `p.notes` before the `Doc` pass runs.
//! The body is left unparsed (§3's invariant on transient `RAW` content)
//! until the driver's post-pass reparses it as blocks (§4.4 step 5).

use crate::grammar::{find_line_end, is_blank_line, take_line, Parser};

/// Runs the whole-document footnote-definition scan, populating `notes`.
pub fn collect_notes(p: &mut Parser) {
    let mut pos = 0;
    let len = p.input.len();
    while pos < len {
        if let Some((end, label, raw)) = parse_note_at(p, pos) {
            p.notes.push(&label, raw);
            pos = end;
        } else {
            let (_, next) = take_line(&p.input, pos);
            pos = if next > pos { next } else { pos + 1 };
        }
    }
}

/// Matches the same syntax during the `Doc` pass so the block grammar can
/// step over a definition instead of misreading it as a paragraph. Returns
/// just the label -- the body was already captured by [`collect_notes`].
pub fn match_note_definition(p: &Parser, pos: usize) -> Option<(usize, String)> {
    parse_note_at(p, pos).map(|(end, label, _)| (end, label))
}

fn parse_note_at(p: &Parser, pos: usize) -> Option<(usize, String, String)> {
    let input = &p.input;
    let line_end = find_line_end(input, pos);
    let line = input.text(pos, line_end);
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let rest = trimmed.strip_prefix("[^")?;
    let close = rest.find(']')?;
    let label = &rest[..close];
    if label.is_empty() {
        return None;
    }
    let after_label = rest[close + 1..].strip_prefix(':')?;
    let after_label = after_label.trim_start_matches([' ', '\t']);

    let mut body = String::from(after_label);
    if !body.ends_with('\n') {
        body.push('\n');
    }
    let mut cur = line_end;
    loop {
        if cur >= input.len() {
            break;
        }
        let (line, next) = take_line(input, cur);
        if is_blank_line(line) {
            // A single blank line may separate paragraphs within the note;
            // it only continues the note if an indented line follows.
            let (after_blank, _) = take_line(input, next);
            if !after_blank.starts_with("    ") {
                cur = next;
                break;
            }
            body.push('\n');
            cur = next;
            continue;
        }
        if !line.starts_with("    ") {
            break;
        }
        body.push_str(&line[4.min(line.len())..]);
        cur = next;
    }
    while body.ends_with("\n\n") {
        body.pop();
    }

    Some((cur, label.to_string(), body))
}
