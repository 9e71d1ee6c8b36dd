//! HTML rendering (§4.5): walks the finished tree, escaping text/attributes,
//! numbering footnote references as they're encountered, and appending the
//! footnotes section once the body is done.

use std::collections::HashMap;
use std::fmt::{self, Write};

use crate::character_set::character_set;
use crate::driver::Document;
use crate::nodes::{Contents, Element, Tag};
use crate::strings::{normalize_label, Case};

/// Per-render state: the footnote numbering table (built lazily, the first
/// time each label is seen) and the buffer of bodies to emit afterwards.
struct Context<'a> {
    ext_smart: bool,
    note_numbers: HashMap<String, usize>,
    /// Bodies for inline footnotes (`^[...]`), discovered mid-render since
    /// they live wherever they occur in the flow rather than at the root.
    inline_note_bodies: HashMap<String, &'a Element<'a>>,
}

impl<'a> Document<'a> {
    pub fn write_html(&self, output: &mut dyn Write) -> fmt::Result {
        write_html(self, output, self.ext)
    }

    pub fn write_html_with(&self, output: &mut dyn Write, ext: crate::options::ExtensionSet) -> fmt::Result {
        write_html(self, output, ext)
    }

    pub fn write_html_string(&self) -> String {
        let mut s = String::new();
        self.write_html(&mut s).expect("writing to a String cannot fail");
        s
    }
}

fn write_html<'a>(doc: &Document<'a>, output: &mut dyn Write, ext: crate::options::ExtensionSet) -> fmt::Result {
    let note_bodies = collect_note_bodies(doc.root);
    let mut ctx = Context {
        ext_smart: ext.smart,
        note_numbers: HashMap::new(),
        inline_note_bodies: HashMap::new(),
    };

    render_sibling_blocks(&mut ctx, output, doc.root, &note_bodies)?;

    if !ctx.note_numbers.is_empty() {
        write_footnotes(&mut ctx, output, &note_bodies)?;
    }

    Ok(())
}

fn collect_note_bodies<'a>(root: &'a Element<'a>) -> HashMap<String, &'a Element<'a>> {
    let mut map = HashMap::new();
    for child in root.children() {
        if let Contents::Note(n) = &child.data.borrow().contents {
            map.insert(normalize_label(&n.label, Case::Fold), child);
        }
    }
    map
}

fn note_number(ctx: &mut Context<'_>, label: &str) -> usize {
    let key = normalize_label(label, Case::Fold);
    if let Some(&n) = ctx.note_numbers.get(&key) {
        return n;
    }
    let n = ctx.note_numbers.len() + 1;
    ctx.note_numbers.insert(key, n);
    n
}

fn render_block<'a>(
    ctx: &mut Context<'a>,
    out: &mut dyn Write,
    node: &'a Element<'a>,
    note_bodies: &HashMap<String, &'a Element<'a>>,
) -> fmt::Result {
    let data = node.data.borrow();
    let tag = data.tag;
    match tag {
        Tag::List => {
            drop(data);
            render_sibling_blocks(ctx, out, node, note_bodies)?;
        }
        Tag::Para => {
            out.write_str("<p>")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            out.write_str("</p>\n")?;
        }
        Tag::Plain => {
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
        }
        Tag::Heading(level) => {
            write!(out, "<h{level}>")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            write!(out, "</h{level}>\n")?;
        }
        Tag::BlockQuote => {
            out.write_str("<blockquote>\n")?;
            drop(data);
            render_sibling_blocks(ctx, out, node, note_bodies)?;
            out.write_str("</blockquote>\n")?;
        }
        Tag::Verbatim => {
            out.write_str("<pre><code>")?;
            if let Contents::Literal(s) = &data.contents {
                escape(out, s)?;
            }
            out.write_str("</code></pre>\n")?;
        }
        Tag::HRule => {
            out.write_str("<hr />\n")?;
        }
        Tag::HtmlBlock => {
            if let Contents::Literal(s) = &data.contents {
                out.write_str(s)?;
                if !s.ends_with('\n') {
                    out.write_str("\n")?;
                }
            }
        }
        Tag::BulletList | Tag::OrderedList => {
            let list_data = match &data.contents {
                Contents::List(l) => *l,
                _ => Default::default(),
            };
            drop(data);
            if tag == Tag::BulletList {
                out.write_str("<ul>\n")?;
            } else if list_data.start == 1 {
                out.write_str("<ol>\n")?;
            } else {
                write!(out, "<ol start=\"{}\">\n", list_data.start)?;
            }
            for item in node.children() {
                // `ListItem`'s children are `Plain` for a tight item, `Para`
                // for a loose one (the raw content was reparsed with or
                // without a trailing blank line accordingly); `render_block`
                // already renders each without/with a `<p>` wrapper.
                out.write_str("<li>")?;
                render_sibling_blocks(ctx, out, item, note_bodies)?;
                out.write_str("</li>\n")?;
            }
            if tag == Tag::BulletList {
                out.write_str("</ul>\n")?;
            } else {
                out.write_str("</ol>\n")?;
            }
        }
        Tag::DefinitionList => {
            out.write_str("<dl>\n")?;
            drop(data);
            for child in node.children() {
                let child_tag = child.data.borrow().tag;
                match child_tag {
                    Tag::DefTitle => {
                        out.write_str("<dt>")?;
                        render_inlines_children(ctx, out, child, note_bodies)?;
                        out.write_str("</dt>\n")?;
                    }
                    Tag::DefData => {
                        out.write_str("<dd>")?;
                        render_sibling_blocks(ctx, out, child, note_bodies)?;
                        out.write_str("</dd>\n")?;
                    }
                    _ => {}
                }
            }
            out.write_str("</dl>\n")?;
        }
        Tag::Note | Tag::Reference => {
            // Never rendered where they sit; footnote bodies are emitted in
            // the trailing section, and reference definitions are inert.
        }
        _ if tag.is_inline() => {
            drop(data);
            render_inline(ctx, out, node, note_bodies)?;
        }
        _ => {}
    }
    Ok(())
}

/// Renders a node's direct block-level children, separated by a blank line
/// -- matching the reference renderer's habit of joining sibling blocks with
/// `"\n\n"` rather than the `"\n"` each block already ends its own markup
/// with (scenario: `"# Title\n\nBody.\n"` renders as
/// `"<h1>Title</h1>\n\n<p>Body.</p>\n"`, not a single `\n`). Not used between
/// a list's own `<li>` elements, which join with nothing extra.
///
/// `Note`/`Reference` children (inert -- a footnote definition or link
/// reference sitting wherever it was declared) are skipped entirely rather
/// than counted as a sibling, so they never contribute a spurious blank
/// line of their own. A `HtmlBlock` with no contents (dropped by
/// `filter_html`/`filter_styles`) is skipped the same way -- it renders
/// nothing, so counting it as a sibling would still leave behind the blank
/// line meant to separate it from its neighbours.
fn render_sibling_blocks<'a>(
    ctx: &mut Context<'a>,
    out: &mut dyn Write,
    node: &'a Element<'a>,
    note_bodies: &HashMap<String, &'a Element<'a>>,
) -> fmt::Result {
    let mut first = true;
    for child in node.children() {
        let data = child.data.borrow();
        let inert = matches!(data.tag, Tag::Note | Tag::Reference)
            || (data.tag == Tag::HtmlBlock && matches!(data.contents, Contents::None));
        drop(data);
        if inert {
            continue;
        }
        if !first {
            out.write_str("\n")?;
        }
        render_block(ctx, out, child, note_bodies)?;
        first = false;
    }
    Ok(())
}

fn render_inlines_children<'a>(
    ctx: &mut Context<'a>,
    out: &mut dyn Write,
    node: &'a Element<'a>,
    note_bodies: &HashMap<String, &'a Element<'a>>,
) -> fmt::Result {
    for child in node.children() {
        render_inline(ctx, out, child, note_bodies)?;
    }
    Ok(())
}

fn render_inline<'a>(
    ctx: &mut Context<'a>,
    out: &mut dyn Write,
    node: &'a Element<'a>,
    note_bodies: &HashMap<String, &'a Element<'a>>,
) -> fmt::Result {
    let data = node.data.borrow();
    match data.tag {
        Tag::Str => {
            if let Contents::Literal(s) = &data.contents {
                escape(out, s)?;
            }
        }
        Tag::Space => out.write_str(" ")?,
        Tag::LineBreak => out.write_str("<br />\n")?,
        Tag::Code => {
            out.write_str("<code>")?;
            if let Contents::Literal(s) = &data.contents {
                escape(out, s)?;
            }
            out.write_str("</code>")?;
        }
        Tag::Html => {
            if let Contents::Literal(s) = &data.contents {
                out.write_str(s)?;
            }
        }
        Tag::Ellipsis => out.write_str(if ctx.ext_smart { "&hellip;" } else { "..." })?,
        Tag::EmDash => out.write_str(if ctx.ext_smart { "&mdash;" } else { "--" })?,
        Tag::EnDash => out.write_str(if ctx.ext_smart { "&ndash;" } else { "-" })?,
        Tag::Apostrophe => out.write_str("&rsquo;")?,
        Tag::SingleQuoted => {
            out.write_str("&lsquo;")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            out.write_str("&rsquo;")?;
            return Ok(());
        }
        Tag::DoubleQuoted => {
            out.write_str("&ldquo;")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            out.write_str("&rdquo;")?;
            return Ok(());
        }
        Tag::Emph => {
            out.write_str("<em>")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            out.write_str("</em>")?;
            return Ok(());
        }
        Tag::Strong => {
            out.write_str("<strong>")?;
            drop(data);
            render_inlines_children(ctx, out, node, note_bodies)?;
            out.write_str("</strong>")?;
            return Ok(());
        }
        Tag::Link => {
            if let Contents::Link(link) = &data.contents {
                out.write_str("<a href=\"")?;
                escape_href(out, &link.url)?;
                out.write_str("\"")?;
                if !link.title.is_empty() {
                    out.write_str(" title=\"")?;
                    escape(out, &link.title)?;
                    out.write_str("\"")?;
                }
                out.write_str(">")?;
                drop(data);
                render_inlines_children(ctx, out, node, note_bodies)?;
                out.write_str("</a>")?;
                return Ok(());
            }
        }
        Tag::Image => {
            if let Contents::Link(link) = &data.contents {
                out.write_str("<img src=\"")?;
                escape_href(out, &link.url)?;
                out.write_str("\" alt=\"")?;
                if let Some(alt) = node.first_child() {
                    if let Contents::Literal(s) = &alt.data.borrow().contents {
                        escape(out, s)?;
                    }
                }
                out.write_str("\"")?;
                if !link.title.is_empty() {
                    out.write_str(" title=\"")?;
                    escape(out, &link.title)?;
                    out.write_str("\"")?;
                }
                out.write_str(" />")?;
            }
        }
        Tag::NoteReference => {
            if let Contents::Literal(label) = &data.contents {
                let label = label.clone();
                drop(data);
                let n = note_number(ctx, &label);
                write!(
                    out,
                    "<sup id=\"fnref:{n}\"><a href=\"#fn:{n}\" class=\"footnote-ref\">{n}</a></sup>"
                )?;
            }
        }
        Tag::Note => {
            // An inline footnote (`^[...]`): number it and stash its own
            // node as the body (its children are already-parsed inlines,
            // not a RAW block to reparse).
            let label = match &data.contents {
                Contents::Note(n) => n.label.clone(),
                _ => String::new(),
            };
            drop(data);
            let n = note_number(ctx, &label);
            ctx.inline_note_bodies.insert(normalize_label(&label, Case::Fold), node);
            write!(
                out,
                "<sup id=\"fnref:{n}\"><a href=\"#fn:{n}\" class=\"footnote-ref\">{n}</a></sup>"
            )?;
        }
        _ => {}
    }
    Ok(())
}

fn write_footnotes<'a>(
    ctx: &mut Context<'a>,
    out: &mut dyn Write,
    note_bodies: &HashMap<String, &'a Element<'a>>,
) -> fmt::Result {
    out.write_str("<div class=\"footnotes\">\n<ol>\n")?;
    let mut seen = std::collections::HashSet::new();
    // Stable order by assigned number, not discovery order in `note_order`
    // (a note can be referenced more than once).
    let mut by_number: Vec<(usize, String)> =
        ctx.note_numbers.iter().map(|(k, &n)| (n, k.clone())).collect();
    by_number.sort_by_key(|(n, _)| *n);

    for (n, key) in by_number {
        if !seen.insert(key.clone()) {
            continue;
        }
        let Some(&body) = note_bodies.get(&key).or_else(|| ctx.inline_note_bodies.get(&key)) else {
            continue;
        };
        write!(out, "<li id=\"fn:{n}\">")?;
        if body.first_child().is_some_and(|c| c.data.borrow().tag.is_inline()) {
            render_inlines_children(ctx, out, body, note_bodies)?;
        } else {
            render_sibling_blocks(ctx, out, body, note_bodies)?;
        }
        write!(
            out,
            " <a href=\"#fnref:{n}\" class=\"footnote-backref\">&#8617;</a></li>\n"
        )?;
    }
    out.write_str("</ol>\n</div>\n")?;
    Ok(())
}

/// Escapes text for use outside an attribute (§4.5).
pub fn escape(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    let bytes = buffer.as_bytes();
    let matcher = jetscii::bytes!(b'"', b'&', b'<', b'>');

    let mut offset = 0;
    while let Some(i) = matcher.find(&bytes[offset..]) {
        let esc: &str = match bytes[offset + i] {
            b'"' => "&quot;",
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => unreachable!(),
        };
        output.write_str(&buffer[offset..offset + i])?;
        output.write_str(esc)?;
        offset += i + 1;
    }
    output.write_str(&buffer[offset..])
}

/// Escapes a URL for use inside an `href`/`src` attribute (§4.5): percent-
/// encodes anything outside a small safe set, except `&`/`'` which get
/// named/numeric entities instead so the attribute value stays valid HTML.
pub fn escape_href(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    const HREF_SAFE: [bool; 256] = character_set!(
        b"-_.+!*(),%#@?=;:/,+$~",
        b"abcdefghijklmnopqrstuvwxyz",
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
    );

    let bytes = buffer.as_bytes();
    let size = buffer.len();
    let mut i = 0;
    while i < size {
        let org = i;
        while i < size && HREF_SAFE[bytes[i] as usize] {
            i += 1;
        }
        if i > org {
            output.write_str(&buffer[org..i])?;
        }
        if i >= size {
            break;
        }
        match bytes[i] {
            b'&' => output.write_str("&amp;")?,
            b'\'' => output.write_str("&#x27;")?,
            _ => write!(output, "%{:02X}", bytes[i])?,
        }
        i += 1;
    }
    Ok(())
}
