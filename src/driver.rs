//! The three-pass driver (§4.4): References pass, optional Notes pass, Doc
//! pass, each separated by a `Commit`, followed by a post-pass that
//! reparses every container's captured `RAW` region as fresh blocks.

use crate::grammar::Parser;
use crate::nodes::{make, Arena, Contents, Element, Tag};
use crate::options::ExtensionSet;
use crate::reftable::{NoteTable, RefTable};

/// A finished parse: its tree plus the reference/footnote tables collected
/// along the way (§3). `'a` ties the whole thing to the arena that owns
/// every node.
pub struct Document<'a> {
    pub root: &'a Element<'a>,
    pub references: RefTable,
    pub notes: NoteTable,
    /// The extensions this document was parsed with, used as the default
    /// when rendering via [`Document::write_html`] -- `smart`'s rendering
    /// side (entity vs. literal dash/ellipsis) otherwise has no way to
    /// recover which typographic nodes were even recognized at parse time.
    pub ext: ExtensionSet,
}

/// Runs the full pipeline over `source` and returns the finished tree.
/// `arena` must outlive the returned `Document`.
pub fn parse_document<'a>(source: &[u8], arena: &'a Arena<'a>, ext: ExtensionSet) -> Document<'a> {
    let mut p = Parser::new(source, arena, ext);
    // `Para` requires a trailing blank line to distinguish itself from
    // `Plain` (§4.2); without this, a document whose last line of text isn't
    // followed by one would have its final paragraph render without a `<p>`
    // wrapper. Treat the top-level parse's EOF as though it were blank --
    // but only the top-level parse: `Parser::sub_parser` leaves this false,
    // since tight list items rely on an unpadded EOF to get `Plain` instead.
    p.eof_is_blank = true;

    // Step 1: References pass.
    crate::grammar::references::collect_references(&mut p);
    p.commit();

    // Step 2: Notes pass (only when the extension is enabled).
    if ext.notes {
        crate::grammar::notes::collect_notes(&mut p);
        p.commit();
    }

    // Step 3: Doc pass -- top-level blocks, with inline content parsed
    // immediately for `Para`/`Plain` (§4.4 step 4).
    let blocks = p.parse_blocks();
    p.commit();

    let root = make(arena, Tag::List);
    for block in blocks {
        root.append(block);
    }

    // Step 4: post-pass. Containers captured their body as `RAW`; resolve
    // each one now that the whole tree (and thus every reference/note
    // table entry) is known.
    resolve_containers(&p, root);

    // Any note referenced inline but never attached to the tree (the common
    // case: a note definition is collected into `p.notes` but its `NOTE`
    // placeholder, if one somehow never made it into the Doc pass's block
    // list -- e.g. a reference from deep in a reparsed list item -- still
    // needs a home for the footnotes section) is appended at the end.
    attach_orphan_notes(&p, root);

    Document {
        root,
        references: p.refs,
        notes: p.notes,
        ext,
    }
}

/// Depth-first walk that detaches each container's `RAW` child, reparses it
/// as blocks, and re-attaches the result -- then recurses into the
/// newly-attached children so nested containers (a blockquote inside a
/// list item, say) are resolved too.
///
/// Hand-written rather than built on [`crate::arena_tree::Descendants`]:
/// that iterator precomputes the next edge from state read before this
/// function mutates the very node it just visited, so a freshly-attached
/// child would never be visited. Termination is guaranteed because each
/// reparse strictly shrinks the raw text being resolved.
fn resolve_containers<'i, 'a>(p: &Parser<'i, 'a>, node: &'a Element<'a>) {
    if needs_reparse(node) {
        if let Some(raw_child) = node.first_child() {
            if matches!(raw_child.data.borrow().tag, Tag::Raw) {
                let raw = match &raw_child.data.borrow().contents {
                    Contents::Literal(s) => s.clone(),
                    _ => String::new(),
                };
                // A tight list item's raw body has no trailing blank line by
                // design, and that absence is what makes its content `Plain`
                // instead of `Para` (§4.5, "PLAIN -> children without
                // wrapper"). A loose item's raw always carries a real
                // trailing blank line (forced when the list was built), so
                // this flag doesn't change its outcome. Every other
                // container (BlockQuote, DefData) wants its last paragraph
                // wrapped in `<p>` even without one.
                let eof_is_blank = !matches!(node.data.borrow().tag, Tag::ListItem);
                raw_child.detach();
                for block in p.reparse_as_blocks(&raw, eof_is_blank) {
                    node.append(block);
                }
            }
        }
    } else if is_unresolved_note_placeholder(node) {
        let label = match &node.data.borrow().contents {
            Contents::Note(n) => n.label.clone(),
            _ => String::new(),
        };
        if let Some(def) = p.notes.lookup(&label) {
            let raw = def.raw.clone();
            for block in p.reparse_as_blocks(&raw, true) {
                node.append(block);
            }
        }
    }

    let mut child = node.first_child();
    while let Some(c) = child {
        resolve_containers(p, c);
        child = c.next_sibling();
    }
}

fn needs_reparse(node: &Element) -> bool {
    matches!(
        node.data.borrow().tag,
        Tag::BlockQuote | Tag::ListItem | Tag::DefData
    )
}

fn is_unresolved_note_placeholder(node: &Element) -> bool {
    matches!(node.data.borrow().tag, Tag::Note) && node.first_child().is_none()
}

/// Appends a `NOTE` placeholder for every definition in `p.notes` that the
/// Doc pass never rendered a reference-skip node for (can't happen via the
/// normal top-level scan, but a note referenced only from within a reparsed
/// container can finish resolution after the top-level walk already passed
/// its position) -- the renderer numbers footnotes by walking the final
/// tree in order, so every defined note must appear in it exactly once.
fn attach_orphan_notes<'i, 'a>(p: &Parser<'i, 'a>, root: &'a Element<'a>) {
    use std::collections::HashSet;
    use crate::strings::{normalize_label, Case};

    let mut present: HashSet<String> = HashSet::new();
    for node in root.descendants() {
        if let Contents::Note(n) = &node.data.borrow().contents {
            present.insert(normalize_label(&n.label, Case::Fold));
        }
    }
    for def in p.notes.iter() {
        if present.contains(&def.key) {
            continue;
        }
        let node = crate::nodes::make_note(p.arena, def.label.clone());
        for block in p.reparse_as_blocks(&def.raw, true) {
            node.append(block);
        }
        root.append(node);
    }
}
