//! `Inline` (§4.2): text, emphasis, links/images, code spans, raw HTML,
//! entities, footnote references, and (under `smart`) typographic
//! substitution -- tried in order at each offset, falling back to a run of
//! literal `Str` bytes when nothing more specific matches.

use unicode_categories::UnicodeCategories;

use crate::ctype::{isalnum, isalpha, ispunct};
use crate::grammar::Parser;
use crate::nodes::{make, make_link, make_text, Element, LinkData, Tag};
use crate::peg::Input;
use crate::strings::{clean_title, clean_url};

/// Whether the `char` ending just before `pos` is a letter or number --
/// used for the intraword checks around `_` and smart apostrophes, where a
/// plain ASCII `isalnum` byte test would misjudge a boundary inside a
/// multi-byte UTF-8 character (e.g. "caf\u{e9}'s").
fn prev_char_is_wordlike(input: &Input, pos: usize) -> bool {
    input
        .text(0, pos)
        .chars()
        .next_back()
        .is_some_and(|c| c.is_letter() || c.is_number())
}

pub fn inline_uncached<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let c = input.at(pos)?;

    // Every dedicated production below may fail to match at its own special
    // byte (an unclosed code span's backtick, a `[` that resolves to no
    // reference, a `\` before a non-punctuation character, ...) without
    // that failure meaning the byte isn't there -- `text_run`'s one-byte
    // fallback (it never consumes past a special byte it's asked to start
    // on) is what actually emits it as literal text, the same path a plain
    // unmatched `*` already takes.
    let matched = match c {
        b'\\' => escaped_char(p, pos),
        b'&' => entity(p, pos),
        b'`' => code_span(p, pos),
        b'<' => autolink(p, pos).or_else(|| raw_html_inline(p, pos)),
        b'!' => image(p, pos),
        b'[' => note_reference(p, pos).or_else(|| link(p, pos)),
        b'^' if p.ext.notes => inline_note(p, pos),
        b'*' | b'_' => strong_or_emph(p, pos),
        b'\n' => return endline(p, pos),
        b' ' => return space(p, pos),
        _ if p.ext.smart => smart_punct(p, pos),
        _ => None,
    };
    matched.or_else(|| text_run(p, pos))
}

fn is_special(c: u8) -> bool {
    matches!(
        c,
        b'\\' | b'&' | b'`' | b'<' | b'!' | b'[' | b'*' | b'_' | b'\n' | b' ' | b'^' | b'"' | b'\'' | b'.' | b'-'
    )
}

// ---- Str ------------------------------------------------------------

fn text_run<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let first = input.at(pos)?;
    let mut end = pos + 1;
    if !is_special(first) {
        // A single special byte with no matching dedicated production
        // (e.g. a lone `*`) is emitted literally, one byte at a time;
        // otherwise consume the whole run of plain bytes.
        while let Some(c) = input.at(end) {
            if is_special(c) {
                break;
            }
            end += 1;
        }
    }
    Some((end, make_text(p.arena, Tag::Str, input.text(pos, end).to_string())))
}

// ---- EscapedChar ------------------------------------------------------

fn escaped_char<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let next = input.at(pos + 1)?;
    if next == b'\n' {
        // `\` at end of line is a hard line break, not an escape.
        return Some((pos + 2, make(p.arena, Tag::LineBreak)));
    }
    if !ispunct(next) {
        return None;
    }
    Some((
        pos + 2,
        make_text(p.arena, Tag::Str, (next as char).to_string()),
    ))
}

// ---- Entity -----------------------------------------------------------

fn entity<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let (decoded, consumed) = crate::entity::unescape(&input.bytes[pos + 1..])?;
    let text = String::from_utf8(decoded).ok()?;
    Some((pos + 1 + consumed, make_text(p.arena, Tag::Str, text)))
}

// ---- Code spans ---------------------------------------------------------

fn code_span<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let mut ticks = 0;
    while input.at(pos + ticks) == Some(b'`') {
        ticks += 1;
    }
    if ticks == 0 || ticks > 5 {
        return None;
    }
    let open_end = pos + ticks;

    let mut i = open_end;
    loop {
        if input.eof(i) {
            return None;
        }
        if input.at(i) == Some(b'`') {
            let run_start = i;
            let mut run = 0;
            while input.at(i) == Some(b'`') {
                run += 1;
                i += 1;
            }
            if run == ticks {
                let mut content = input.text(open_end, run_start);
                content = content.trim_matches(' ');
                if content.contains('\n') && content.chars().all(|c| c == ' ' || c == '\n') {
                    return None;
                }
                let content = content.replace('\n', " ");
                return Some((i, make_text(p.arena, Tag::Code, content)));
            }
            continue;
        }
        if input.at(i) == Some(b'\n') {
            // A blank line inside the span's extent breaks the match --
            // codespans can't cross a paragraph boundary.
            let (line, next) = crate::grammar::take_line(input, i);
            if crate::strings::is_blank(line) {
                return None;
            }
            i = next;
            continue;
        }
        i += 1;
    }
}

// ---- Autolinks and raw inline HTML --------------------------------------

fn autolink<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    autolink_uri(p, pos).or_else(|| autolink_email(p, pos))
}

fn autolink_uri<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let mut i = pos + 1;
    let scheme_start = i;
    while matches!(input.at(i), Some(c) if isalpha(c) || c == b'+' || c == b'-' || c == b'.') {
        i += 1;
    }
    let scheme_len = i - scheme_start;
    if !(2..=32).contains(&scheme_len) || input.at(i) != Some(b':') {
        return None;
    }
    i += 1;
    let uri_start = scheme_start;
    while matches!(input.at(i), Some(c) if c != b'>' && c != b'<' && !c.is_ascii_whitespace()) {
        i += 1;
    }
    if input.at(i) != Some(b'>') {
        return None;
    }
    let url = input.text(uri_start, i).to_string();
    let node = make_link(
        p.arena,
        Tag::Link,
        LinkData {
            url: clean_url(&url),
            title: String::new(),
        },
    );
    node.append(make_text(p.arena, Tag::Str, url));
    Some((i + 1, node))
}

fn autolink_email<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let mut i = pos + 1;
    let start = i;
    while matches!(input.at(i), Some(c) if isalnum(c) || matches!(c, b'.' | b'-' | b'_' | b'+')) {
        i += 1;
    }
    if i == start || input.at(i) != Some(b'@') {
        return None;
    }
    i += 1;
    let domain_start = i;
    while matches!(input.at(i), Some(c) if isalnum(c) || matches!(c, b'.' | b'-')) {
        i += 1;
    }
    if i == domain_start || input.at(i) != Some(b'>') {
        return None;
    }
    let addr = input.text(start, i).to_string();
    let node = make_link(
        p.arena,
        Tag::Link,
        LinkData {
            url: format!("mailto:{addr}"),
            title: String::new(),
        },
    );
    node.append(make_text(p.arena, Tag::Str, addr));
    Some((i + 1, node))
}

fn raw_html_inline<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let bytes = input.bytes;
    let rest = &bytes[pos..];
    if rest.len() < 3 {
        return None;
    }
    let mut i = 1;
    if rest.get(i) == Some(&b'/') {
        i += 1;
    }
    let name_start = i;
    while matches!(rest.get(i), Some(&c) if c.is_ascii_alphanumeric()) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    while i < rest.len() && rest[i] != b'>' {
        if rest[i] == b'\n' && rest.get(i + 1) == Some(&b'\n') {
            return None;
        }
        i += 1;
    }
    if rest.get(i) != Some(&b'>') {
        return None;
    }
    let end = pos + i + 1;
    if p.ext.filter_html {
        return Some((end, make(p.arena, Tag::Html)));
    }
    Some((end, make_text(p.arena, Tag::Html, input.text(pos, end).to_string())))
}

// ---- Footnotes ----------------------------------------------------------

fn note_reference<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    if !p.ext.notes {
        return None;
    }
    let input = &p.input;
    let rest = input.text(pos, input.len());
    let rest = rest.strip_prefix("[^")?;
    let close = rest.find(']')?;
    let label = &rest[..close];
    if label.is_empty() || p.notes.lookup(label).is_none() {
        return None;
    }
    let node = make_text(p.arena, Tag::NoteReference, label.to_string());
    Some((pos + 2 + close + 1, node))
}

fn inline_note<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    if input.at(pos + 1) != Some(b'[') {
        return None;
    }
    let mut depth = 1;
    let mut i = pos + 2;
    let start = i;
    while depth > 0 {
        match input.at(i) {
            Some(b'[') => depth += 1,
            Some(b']') => depth -= 1,
            Some(_) => {}
            None => return None,
        }
        if depth == 0 {
            break;
        }
        i += 1;
    }
    let raw = input.text(start, i).to_string();
    let label = format!("#inline-{pos}");
    // Inline notes carry their own body directly rather than through the
    // note table (no separate block-level definition exists to look up).
    let node = make(p.arena, Tag::Note);
    node.data.borrow_mut().contents =
        crate::nodes::Contents::Note(crate::nodes::NoteData { label });
    for child in p.reparse_as_inlines(&raw) {
        node.append(child);
    }
    Some((i + 1, node))
}

// ---- Strong / Emph -------------------------------------------------------

fn strong_or_emph<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let marker = input.at(pos)?;
    let mut run = 0;
    while input.at(pos + run) == Some(marker) {
        run += 1;
    }
    if marker == b'_' && prev_char_is_wordlike(input, pos) {
        return None;
    }
    let double = run >= 2;
    let marker_width = if double { 2 } else { 1 };
    let content_start = pos + marker_width;
    if matches!(input.at(content_start), None | Some(b' ') | Some(b'\n')) {
        return None;
    }

    let closing = [marker; 2];
    let needle: &[u8] = if double { &closing[..] } else { &closing[..1] };
    let mut i = content_start;
    loop {
        if input.eof(i) {
            return None;
        }
        if input.starts_with(i, needle) {
            if marker == b'_' && matches!(input.at(i + needle.len()), Some(c) if isalnum(c)) {
                i += 1;
                continue;
            }
            let prev_byte = input.at(i - 1);
            if matches!(prev_byte, Some(b' ') | Some(b'\n')) {
                i += 1;
                continue;
            }
            let text = input.text(content_start, i);
            if text.is_empty() {
                return None;
            }
            let tag = if double { Tag::Strong } else { Tag::Emph };
            let node = make(p.arena, tag);
            for child in p.reparse_as_inlines(text) {
                node.append(child);
            }
            return Some((i + needle.len(), node));
        }
        if input.at(i) == Some(b'\n') {
            let (line, next) = crate::grammar::take_line(input, i);
            if crate::strings::is_blank(line) {
                return None;
            }
            i = next;
            continue;
        }
        i += 1;
    }
}

// ---- Link / Image ---------------------------------------------------------

fn image<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    if p.input.at(pos + 1) != Some(b'[') {
        return None;
    }
    let (end, link, label_text) = link_common(p, pos + 1)?;
    let node = make_link(p.arena, Tag::Image, link);
    // The alt attribute is the label's inline content flattened to plain
    // text (§4.5), not the parsed inline tree itself.
    let mut alt = String::new();
    for child in p.reparse_as_inlines(&label_text) {
        alt.push_str(&crate::nodes::flatten_text(child));
    }
    node.append(make_text(p.arena, Tag::Str, alt));
    Some((end, node))
}

fn link<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let (end, link, label_raw) = link_common(p, pos)?;
    let node = make_link(p.arena, Tag::Link, link);
    for child in p.reparse_as_inlines(&label_raw) {
        node.append(child);
    }
    Some((end, node))
}

/// Shared machinery for `[label](url "title")`, `[label][ref]`, and the
/// shortcut `[label]`/`[label][]` forms. Returns the raw label text (used
/// as inline content for `Link`, flattened to plain text for `Image`'s alt
/// attribute by the caller via reparse).
fn link_common(p: &Parser, pos: usize) -> Option<(usize, LinkData, String)> {
    let input = &p.input;
    if input.at(pos) != Some(b'[') {
        return None;
    }
    let mut depth = 1;
    let mut i = pos + 1;
    let label_start = i;
    while depth > 0 {
        match input.at(i) {
            Some(b'[') => depth += 1,
            Some(b']') => depth -= 1,
            Some(_) => {}
            None => return None,
        }
        if depth == 0 {
            break;
        }
        i += 1;
    }
    let label = input.text(label_start, i).to_string();
    let after_label = i + 1;

    // Explicit inline form: `(url "title")`.
    if input.at(after_label) == Some(b'(') {
        if let Some((end, link)) = parse_inline_destination(input, after_label) {
            return Some((end, link, label));
        }
    }

    // Reference forms: `[ref]`, or the shortcut `[]`/absent second bracket.
    let (ref_label, end) = if input.at(after_label) == Some(b'[') {
        let mut j = after_label + 1;
        let ref_start = j;
        while matches!(input.at(j), Some(c) if c != b']') {
            j += 1;
        }
        if input.at(j) != Some(b']') {
            return None;
        }
        let inner = input.text(ref_start, j);
        let ref_label = if inner.is_empty() { label.as_str() } else { inner };
        (ref_label.to_string(), j + 1)
    } else {
        (label.clone(), after_label)
    };

    let link = p.refs.lookup(&ref_label)?.clone();
    Some((end, link, label))
}

fn parse_inline_destination(input: &crate::peg::Input, paren_pos: usize) -> Option<(usize, LinkData)> {
    let mut i = paren_pos + 1;
    while input.at(i) == Some(b' ') {
        i += 1;
    }
    let url_start = i;
    let url_end = if input.at(i) == Some(b'<') {
        let end = input.text(i, input.len()).find('>').map(|p| i + p + 1)?;
        end
    } else {
        let mut depth = 0i32;
        loop {
            match input.at(i) {
                Some(b'(') => depth += 1,
                Some(b')') if depth == 0 => break,
                Some(b')') => depth -= 1,
                Some(b' ') | Some(b'\n') if depth == 0 => break,
                Some(_) => {}
                None => return None,
            }
            i += 1;
        }
        i
    };
    let url = input.text(url_start, url_end);
    let mut j = url_end;
    while matches!(input.at(j), Some(b' ') | Some(b'\n')) {
        j += 1;
    }
    let mut title = String::new();
    if matches!(input.at(j), Some(b'"') | Some(b'\'')) {
        let quote = input.at(j).unwrap();
        let title_start = j;
        j += 1;
        while input.at(j) != Some(quote) {
            j = j.checked_add(1)?;
            if input.eof(j) {
                return None;
            }
        }
        j += 1;
        title = input.text(title_start, j).to_string();
    }
    while input.at(j) == Some(b' ') {
        j += 1;
    }
    if input.at(j) != Some(b')') {
        return None;
    }
    Some((
        j + 1,
        LinkData {
            url: clean_url(url),
            title: clean_title(&title),
        },
    ))
}

// ---- Endline / Space ------------------------------------------------------

/// A bare `\n` with no preceding spaces for `space` to have already
/// absorbed (word-wrapped text with no trailing whitespace on the line).
fn endline<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    if input.eof(pos + 1) {
        // End-of-file endline produces no output (§4.2).
        return None;
    }
    let (line, _) = crate::grammar::take_line(input, pos + 1);
    if crate::strings::is_blank(line) {
        return None;
    }
    Some((pos + 1, make(p.arena, Tag::Space)))
}

/// A run of one or more spaces. When it runs right up against the line's
/// end, the newline is absorbed here too -- two or more trailing spaces
/// make a hard `LineBreak`, fewer leave it a soft-break `Space` -- so
/// `endline` never reprocesses a newline `space` already accounted for and
/// the two don't double-count the same bytes as separate inline nodes.
fn space<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    let mut end = pos;
    while input.at(end) == Some(b' ') {
        end += 1;
    }
    if input.at(end) == Some(b'\n') {
        if input.eof(end + 1) {
            return Some((end, make(p.arena, Tag::Space)));
        }
        let (line, _) = crate::grammar::take_line(input, end + 1);
        if crate::strings::is_blank(line) {
            return Some((end, make(p.arena, Tag::Space)));
        }
        let tag = if end - pos >= 2 { Tag::LineBreak } else { Tag::Space };
        return Some((end + 1, make(p.arena, tag)));
    }
    Some((end, make(p.arena, Tag::Space)))
}

// ---- Smart typography ------------------------------------------------------

fn smart_punct<'i, 'a>(p: &Parser<'i, 'a>, pos: usize) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    match input.at(pos)? {
        b'.' => {
            if input.starts_with(pos, b"...") {
                Some((pos + 3, make(p.arena, Tag::Ellipsis)))
            } else if input.starts_with(pos, b". . .") {
                Some((pos + 5, make(p.arena, Tag::Ellipsis)))
            } else {
                None
            }
        }
        b'-' => {
            if input.starts_with(pos, b"---") {
                Some((pos + 3, make(p.arena, Tag::EmDash)))
            } else if input.starts_with(pos, b"--") {
                Some((pos + 2, make(p.arena, Tag::EmDash)))
            } else if matches!(input.at(pos + 1), Some(c) if c.is_ascii_digit()) {
                Some((pos + 1, make(p.arena, Tag::EnDash)))
            } else {
                None
            }
        }
        b'\'' => {
            if prev_char_is_wordlike(input, pos) {
                Some((pos + 1, make(p.arena, Tag::Apostrophe)))
            } else {
                quoted(p, pos, b'\'', Tag::SingleQuoted)
            }
        }
        b'"' => quoted(p, pos, b'"', Tag::DoubleQuoted),
        _ => None,
    }
}

fn quoted<'i, 'a>(p: &Parser<'i, 'a>, pos: usize, quote: u8, tag: Tag) -> Option<(usize, &'a Element<'a>)> {
    let input = &p.input;
    if input.at(pos) != Some(quote) {
        return None;
    }
    let start = pos + 1;
    let mut i = start;
    loop {
        if input.eof(i) {
            return None;
        }
        if input.at(i) == Some(quote) {
            let next = input.at(i + 1);
            if matches!(next, None | Some(b' ') | Some(b'\n')) || !next.unwrap().is_ascii_alphanumeric() {
                break;
            }
        }
        if input.at(i) == Some(b'\n') {
            let (line, next_pos) = crate::grammar::take_line(input, i);
            if crate::strings::is_blank(line) {
                return None;
            }
            i = next_pos;
            continue;
        }
        i += 1;
    }
    let text = input.text(start, i);
    if text.is_empty() {
        return None;
    }
    let node = make(p.arena, tag);
    for child in p.reparse_as_inlines(text) {
        node.append(child);
    }
    Some((i + 1, node))
}
