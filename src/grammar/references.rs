//! `References` (§4.3/§4.4 step 1): a pre-pass over the whole document that
//! collects every `[label]: url "title"` definition into `p.refs` before the
//! `Doc` pass runs, so a link can reference a definition appearing later in
//! the source.

use crate::grammar::{find_line_end, take_line, Parser};
use crate::nodes::LinkData;
use crate::strings::{clean_title, clean_url};

/// Runs the whole-document reference scan, populating `refs`. Takes `&mut`
/// since it runs before the `Parser` is shared across reparses.
pub fn collect_references(p: &mut Parser) {
    let mut pos = 0;
    let len = p.input.len();
    while pos < len {
        if let Some((end, label, link)) = parse_definition_at(p, pos) {
            p.refs.push(&label, link);
            pos = end;
        } else {
            let (_, next) = take_line(&p.input, pos);
            pos = if next > pos { next } else { pos + 1 };
        }
    }
}

/// Matches the same syntax during the `Doc` pass, so the block grammar can
/// step over a definition's lines instead of misreading them as a
/// paragraph. Returns the label text (without brackets) for the placeholder
/// `REFERENCE` node.
pub fn match_reference_definition(p: &Parser, pos: usize) -> Option<(usize, String)> {
    parse_definition_at(p, pos).map(|(end, label, _)| (end, label))
}

fn is_quoted(s: &str) -> bool {
    (s.starts_with('"') && s.ends_with('"'))
        || (s.starts_with('\'') && s.ends_with('\''))
        || (s.starts_with('(') && s.ends_with(')'))
}

fn parse_definition_at(p: &Parser, pos: usize) -> Option<(usize, String, LinkData)> {
    let input = &p.input;
    let line_end = find_line_end(input, pos);
    let line = input.text(pos, line_end);

    let trimmed = line.trim_start_matches(' ');
    let indent = line.len() - trimmed.len();
    if indent > 3 {
        return None;
    }

    let rest = trimmed.strip_prefix('[')?;
    let close = rest.find(']')?;
    let label = &rest[..close];
    if label.is_empty() {
        return None;
    }
    let after_label = rest[close + 1..].strip_prefix(':')?;
    let after_label = after_label.trim_start_matches([' ', '\t']);
    if after_label.trim_end_matches(['\n', '\r']).is_empty() {
        return None;
    }

    let bytes = after_label.as_bytes();
    let url_end = if bytes.first() == Some(&b'<') {
        after_label.find('>').map(|i| i + 1)?
    } else {
        bytes.iter().take_while(|b| !b.is_ascii_whitespace()).count()
    };
    let url = &after_label[..url_end];
    let after_url = after_label[url_end..].trim_matches(['\n', '\r']).trim();

    let (title, end) = if after_url.is_empty() {
        // The title, if any, may instead be alone on the following line.
        let (next_line, next_end) = take_line(input, line_end);
        let next_trimmed = next_line.trim();
        if is_quoted(next_trimmed) {
            (next_trimmed, next_end)
        } else {
            ("", line_end)
        }
    } else if is_quoted(after_url) {
        (after_url, line_end)
    } else {
        return None;
    };

    let link = LinkData {
        url: clean_url(url),
        title: clean_title(title),
    };
    Some((end, label.to_string(), link))
}
