//! `Block` (§4.2): the container/leaf-block productions, tried in order at
//! each offset. Containers that may hold further blocks (`BlockQuote`,
//! `ListItem`, a definition's `DefData`, a footnote's body) capture their
//! region as a single `RAW` child rather than recursing into `Block`
//! themselves -- the driver's post-pass reparses that text once the
//! container's own extent is known (§4.4 step 5; §9 "Reparsing").

use crate::ctype::is_space_or_tab;
use crate::grammar::{find_line_end, is_blank_line, take_line, Parser};
use crate::nodes::{make, make_list, make_note, make_text, Element, ListData, Tag};
use crate::strings::is_blank;

pub fn block_uncached<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    if p.input.eof(pos) {
        return None;
    }
    block_quote(p, pos)
        .or_else(|| verbatim(p, pos))
        .or_else(|| reference_definition(p, pos))
        .or_else(|| note_definition(p, pos))
        .or_else(|| horizontal_rule(p, pos))
        .or_else(|| heading(p, pos))
        .or_else(|| crate::grammar::dlists::definition_list(p, pos))
        .or_else(|| ordered_list(p, pos))
        .or_else(|| bullet_list(p, pos))
        .or_else(|| html_block(p, pos))
        .or_else(|| para(p, pos))
}

/// Up to three leading spaces of indentation -- the threshold below which a
/// line still counts as "unindented" for block-start purposes.
fn skip_nonindent_space(line: &str) -> (usize, &str) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    (i, &line[i..])
}

fn strip_indent(line: &str, n: usize) -> &str {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut col = 0;
    while i < bytes.len() && col < n {
        match bytes[i] {
            b' ' => col += 1,
            b'\t' => col += 4 - (col % 4),
            _ => break,
        }
        i += 1;
    }
    &line[i..]
}

// ---- BlockQuote ------------------------------------------------------

fn block_quote<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (_, rest) = skip_nonindent_space(input.text(pos, find_line_end(input, pos)));
    if !rest.starts_with('>') {
        return None;
    }

    let mut raw = String::new();
    let mut cur = pos;
    let mut saw_blank = false;
    loop {
        let (line, next) = take_line(input, cur);
        let (_, after_indent) = skip_nonindent_space(line);
        if let Some(body) = after_indent.strip_prefix('>') {
            let body = body.strip_prefix(' ').unwrap_or(body);
            raw.push_str(body);
            if !body.ends_with('\n') {
                raw.push('\n');
            }
            saw_blank = false;
        } else if is_blank_line(line) {
            if saw_blank {
                break;
            }
            saw_blank = true;
            raw.push('\n');
        } else if !saw_blank {
            // Lazy continuation: a non-blank line with no `>` marker
            // belongs to the quote's last paragraph.
            raw.push_str(line);
        } else {
            break;
        }
        cur = next;
        if cur >= input.len() {
            break;
        }
    }
    while raw.ends_with('\n') && raw.ends_with("\n\n") {
        raw.pop();
    }

    let node = make(p.arena, Tag::BlockQuote);
    node.append(make_text(p.arena, Tag::Raw, raw));
    Some((cur, node))
}

// ---- Verbatim (indented code) ----------------------------------------

fn verbatim<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (line, _) = take_line(input, pos);
    if !(line.starts_with("    ") || line.starts_with('\t')) || is_blank(line) {
        return None;
    }

    let mut content = String::new();
    let mut cur = pos;
    let mut trailing_blanks = 0usize;
    loop {
        let (line, next) = take_line(input, cur);
        if line.is_empty() {
            break;
        }
        if is_blank(line) {
            trailing_blanks += 1;
            content.push('\n');
            cur = next;
            if cur >= input.len() {
                break;
            }
            continue;
        }
        if !(line.starts_with("    ") || line.starts_with('\t')) {
            break;
        }
        trailing_blanks = 0;
        content.push_str(strip_indent(line, 4));
        if !content.ends_with('\n') {
            content.push('\n');
        }
        cur = next;
        if cur >= input.len() {
            break;
        }
    }
    // Don't swallow the blank lines that separate this block from the next.
    for _ in 0..trailing_blanks {
        content.pop();
        cur -= 1;
    }

    let node = make_text(p.arena, Tag::Verbatim, content);
    Some((cur, node))
}

// ---- Reference/Note definitions (skipped at Doc-pass time) ------------

/// Recognizes a `[label]: url "title"` definition so the `Doc` pass can
/// step over it -- the `References` pre-pass already populated `p.refs`
/// (§4.4 step 1), so this production never touches `self.refs` itself.
fn reference_definition<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let (end, label) = crate::grammar::references::match_reference_definition(p, pos)?;
    let node = make(p.arena, Tag::Reference);
    node.append(make_text(p.arena, Tag::Str, label));
    Some((end, node))
}

fn note_definition<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    if !p.ext.notes {
        return None;
    }
    let (end, label) = crate::grammar::notes::match_note_definition(p, pos)?;
    let node = make_note(p.arena, label);
    Some((end, node))
}

// ---- HorizontalRule ----------------------------------------------------

fn horizontal_rule<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (line, next) = take_line(input, pos);
    let (_, rest) = skip_nonindent_space(line);
    let trimmed = rest.trim_end_matches(['\n', '\r']);
    let mut chars = trimmed.chars().filter(|c| !c.is_whitespace());
    let first = chars.clone().next()?;
    if !matches!(first, '*' | '-' | '_') {
        return None;
    }
    let count = chars.clone().count();
    if count < 3 || !chars.all(|c| c == first) {
        return None;
    }
    Some((next, make(p.arena, Tag::HRule)))
}

// ---- Heading ------------------------------------------------------------

fn heading<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    atx_heading(p, pos).or_else(|| setext_heading(p, pos))
}

fn atx_heading<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (line, next) = take_line(input, pos);
    let (_, rest) = skip_nonindent_space(line);
    let bytes = rest.as_bytes();
    let mut level = 0u8;
    while level < bytes.len() as u8 && bytes[level as usize] == b'#' {
        level += 1;
    }
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &rest[level as usize..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t', '\n']) {
        return None;
    }
    let text = rest.trim_matches(['\n', '\r']).trim();
    let text = text.trim_end_matches('#').trim_end();

    let node = make(p.arena, Tag::Heading(level));
    for child in p.reparse_as_inlines(text) {
        node.append(child);
    }
    Some((next, node))
}

fn setext_heading<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (line, next) = take_line(input, pos);
    if is_blank_line(line) {
        return None;
    }
    let (_, underline) = take_line(input, next);
    let trimmed = underline.trim_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return None;
    }
    let level = if trimmed.bytes().all(|c| c == b'=') {
        1
    } else if trimmed.bytes().all(|c| c == b'-') {
        2
    } else {
        return None;
    };
    let underline_end = find_line_end(input, next);
    let text = line.trim_matches(['\n', '\r']);
    let node = make(p.arena, Tag::Heading(level));
    for child in p.reparse_as_inlines(text) {
        node.append(child);
    }
    Some((underline_end, node))
}

// ---- Lists --------------------------------------------------------------

struct ListMarker {
    /// Byte length of the marker itself (e.g. `"- "` or `"12. "`).
    width: usize,
    ordered: bool,
    start: usize,
}

fn match_bullet_marker(rest: &str) -> Option<ListMarker> {
    let bytes = rest.as_bytes();
    if bytes.is_empty() || !matches!(bytes[0], b'*' | b'-' | b'+') {
        return None;
    }
    if bytes.len() < 2 || !is_space_or_tab(bytes[1]) {
        return None;
    }
    Some(ListMarker {
        width: 2,
        ordered: false,
        start: 1,
    })
}

fn match_ordered_marker(rest: &str) -> Option<ListMarker> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 || i >= bytes.len() || !matches!(bytes[i], b'.' | b')') {
        return None;
    }
    let num: usize = rest[..i].parse().ok()?;
    let marker_end = i + 1;
    if marker_end >= bytes.len() || !is_space_or_tab(bytes[marker_end]) {
        return None;
    }
    Some(ListMarker {
        width: marker_end + 1,
        ordered: true,
        start: num,
    })
}

fn bullet_list<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    list(p, pos, false)
}

fn ordered_list<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    list(p, pos, true)
}

fn list<'i, 'a>(p: &Parser<'i, 'a>, pos: usize, ordered: bool) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (first_line, _) = take_line(input, pos);
    let (_, rest) = skip_nonindent_space(first_line);
    let marker = if ordered {
        match_ordered_marker(rest)
    } else {
        match_bullet_marker(rest)
    }?;

    let mut items: Vec<String> = Vec::new();
    let mut cur = pos;
    let mut tight = true;
    let mut blank_run = 0usize;

    loop {
        let (line, _) = take_line(input, cur);
        let (indent, item_rest) = skip_nonindent_space(line);
        let this_marker = if ordered {
            match_ordered_marker(item_rest)
        } else {
            match_bullet_marker(item_rest)
        };
        let Some(m) = this_marker else { break };
        let content_indent = indent + m.width;

        let mut body = String::new();
        let (line, next) = take_line(input, cur);
        body.push_str(&line[content_indent.min(line.len())..]);
        cur = next;

        let mut item_blank_run = 0usize;
        loop {
            if cur >= input.len() {
                break;
            }
            let (line, next) = take_line(input, cur);
            if is_blank_line(line) {
                item_blank_run += 1;
                if item_blank_run > 1 {
                    break;
                }
                body.push('\n');
                cur = next;
                continue;
            }
            let (next_indent, next_rest) = skip_nonindent_space(line);
            let starts_new_item = (if ordered {
                match_ordered_marker(next_rest)
            } else {
                match_bullet_marker(next_rest)
            })
            .is_some()
                && next_indent < content_indent + 4
                && item_blank_run == 0;
            if starts_new_item {
                break;
            }
            let indented_enough = line
                .as_bytes()
                .iter()
                .take(content_indent)
                .all(|&b| b == b' ')
                && line.len() >= content_indent;
            if item_blank_run > 0 && !indented_enough {
                break;
            }
            item_blank_run = 0;
            body.push_str(if indented_enough {
                &line[content_indent.min(line.len())..]
            } else {
                line
            });
            cur = next;
        }

        if item_blank_run > 0 {
            tight = false;
            blank_run += 1;
        } else if blank_run > 0 {
            tight = false;
        }
        while body.ends_with('\n') {
            body.pop();
        }
        items.push(body);

        if cur >= input.len() {
            break;
        }
    }

    let list_tag = if ordered { Tag::OrderedList } else { Tag::BulletList };
    let node = make_list(
        p.arena,
        list_tag,
        ListData {
            tight,
            start: marker.start,
        },
    );
    for item in items {
        let li = make(p.arena, Tag::ListItem);
        let raw = if tight {
            item
        } else {
            let mut s = item;
            s.push_str("\n\n");
            s
        };
        li.append(make_text(p.arena, Tag::Raw, raw));
        node.append(li);
    }
    Some((cur, node))
}

// ---- HtmlBlock / StyleBlock --------------------------------------------

fn html_block<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let (end, tag) = crate::grammar::html_blocks::match_html_block(p, pos)?;
    if tag == Some("style") {
        if p.ext.filter_styles {
            return Some((end, make(p.arena, Tag::HtmlBlock)));
        }
        let text = p.input.text(pos, end).to_string();
        return Some((end, make_text(p.arena, Tag::HtmlBlock, text)));
    }
    if p.ext.filter_html {
        return Some((end, make(p.arena, Tag::HtmlBlock)));
    }
    let text = p.input.text(pos, end).to_string();
    Some((end, make_text(p.arena, Tag::HtmlBlock, text)))
}

// ---- Para / Plain --------------------------------------------------------

fn para<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (first, _) = take_line(input, pos);
    if is_blank_line(first) {
        return None;
    }

    let mut cur = pos;
    let mut text = String::new();
    let mut ended_blank = false;
    loop {
        let (line, next) = take_line(input, cur);
        if is_blank_line(line) {
            ended_blank = true;
            cur = next;
            break;
        }
        if cur != pos && starts_new_block(p, cur) {
            break;
        }
        let (_, line) = skip_nonindent_space(line);
        text.push_str(line);
        cur = next;
        if cur >= input.len() {
            ended_blank = p.eof_is_blank;
            break;
        }
    }
    // Left as-is, not whitespace-normalized: a line's trailing `  \n` (hard
    // break) and lone `\n` (soft break) are both still meaningful to the
    // inline grammar's own `Endline`/`Space` productions, which do their own
    // collapsing once they actually see these bytes.
    let text = text.trim_end_matches(['\n', '\r']);
    let tag = if ended_blank { Tag::Para } else { Tag::Plain };
    let node = make(p.arena, tag);
    for child in p.reparse_as_inlines(&text) {
        node.append(child);
    }
    Some((cur, node))
}

/// Whether a new block-level construct (other than another paragraph line)
/// begins at `pos`, used to decide where a lazy paragraph's text ends.
fn starts_new_block<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> bool {
    let input = &p.input;
    let (line, _) = take_line(input, pos);
    let (_, rest) = skip_nonindent_space(line);
    rest.starts_with('>')
        || horizontal_rule(p, pos).is_some()
        || atx_heading(p, pos).is_some()
        || match_bullet_marker(rest).is_some()
        || match_ordered_marker(rest).is_some()
        || crate::grammar::html_blocks::match_html_block(p, pos).is_some()
}
