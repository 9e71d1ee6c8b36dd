//! The semantic tree (§3): a tagged record per parse node, allocated from a
//! per-document arena and linked via [`arena_tree::Node`]'s intrusive
//! parent/child/sibling cells.

use std::cell::RefCell;

use typed_arena::Arena as TypedArena;

use crate::arena_tree::Node;

/// An arena-allocated tree node. `'a` is tied to the [`crate::Document`]
/// that owns the arena; no `Element` reference escapes it.
pub type Element<'a> = Node<'a, RefCell<ElementData>>;

/// The arena type documents are built in. One arena per parse: no global,
/// no lock (§9, "Globals").
pub type Arena<'a> = TypedArena<Element<'a>>;

/// Every parse node's tag, contents payload, and (for lists) tightness/start
/// metadata -- the fields the spec's Element record names.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: Tag,
    pub contents: Contents,
}

impl ElementData {
    pub fn new(tag: Tag) -> Self {
        ElementData {
            tag,
            contents: Contents::None,
        }
    }

    pub fn text(tag: Tag, text: impl Into<String>) -> Self {
        ElementData {
            tag,
            contents: Contents::Literal(text.into()),
        }
    }

    pub fn link(tag: Tag, link: LinkData) -> Self {
        ElementData {
            tag,
            contents: Contents::Link(link),
        }
    }
}

/// The node's payload: either literal text, a link record, list metadata, or
/// nothing (pure containers like `PARA`/`EMPH`/`LIST` carry no payload of
/// their own -- their meaning is entirely in their children).
#[derive(Debug, Clone)]
pub enum Contents {
    None,
    /// Raw/semantic text: `STR`, `CODE`, `HTML`, `RAW`, `HTMLBLOCK`,
    /// `VERBATIM`, and note labels all stash their string here.
    Literal(String),
    /// `LINK`, `IMAGE`, and `REFERENCE` nodes. The label itself is the
    /// element's *children* (an inline chain), per §3.
    Link(LinkData),
    /// `BULLETLIST`/`ORDEREDLIST` tightness and, for ordered lists, the
    /// start number.
    List(ListData),
    /// `NOTE` elements carry their label string as well as their (still raw,
    /// pre-reparse) body text; footnote numbering is assigned by the
    /// renderer, not stored here.
    Note(NoteData),
}

/// A link record (§3): a label (the element's children), a URL, and a
/// title. Title is `""` when absent, matching the renderer's "omit the
/// attribute if empty" rule.
#[derive(Debug, Clone, Default)]
pub struct LinkData {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListData {
    pub tight: bool,
    /// Ignored for bullet lists; the first item number for ordered lists.
    pub start: usize,
}

#[derive(Debug, Clone)]
pub struct NoteData {
    pub label: String,
}

/// The tag taxonomy (§3/§4.2). Headings are represented with an explicit
/// level field rather than the source grammar's `H1 + (level - 1)`
/// arithmetic trick on a contiguous tag range -- see DESIGN.md's "Heading
/// tag representation" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    // Structural containers
    List,
    Plain,
    Para,
    BlockQuote,
    Verbatim,
    HtmlBlock,
    HRule,
    Heading(u8),
    ListItem,
    BulletList,
    OrderedList,
    DefinitionList,
    DefTitle,
    DefData,
    Reference,
    Note,
    /// Transient: a block whose textual contents have not yet been
    /// re-parsed as inlines or blocks (§3 invariant on `LISTITEM`).
    Raw,

    // Inline atoms
    Str,
    Space,
    LineBreak,
    Code,
    Html,
    Ellipsis,
    EmDash,
    EnDash,
    Apostrophe,
    NoteReference,

    // Inline containers
    Emph,
    Strong,
    SingleQuoted,
    DoubleQuoted,
    Link,
    Image,
}

impl Tag {
    pub fn is_inline(self) -> bool {
        !matches!(
            self,
            Tag::List
                | Tag::Plain
                | Tag::Para
                | Tag::BlockQuote
                | Tag::Verbatim
                | Tag::HtmlBlock
                | Tag::HRule
                | Tag::Heading(_)
                | Tag::ListItem
                | Tag::BulletList
                | Tag::OrderedList
                | Tag::DefinitionList
                | Tag::DefTitle
                | Tag::DefData
                | Tag::Reference
                | Tag::Note
                | Tag::Raw
        )
    }
}

/// Allocates a leafless container element with the given tag.
pub fn make<'a>(arena: &'a Arena<'a>, tag: Tag) -> &'a Element<'a> {
    arena.alloc(Element::new(RefCell::new(ElementData::new(tag))))
}

/// Allocates a text-bearing element (`STR`, `CODE`, `HTML`, `RAW`, ...).
pub fn make_text<'a>(arena: &'a Arena<'a>, tag: Tag, text: impl Into<String>) -> &'a Element<'a> {
    arena.alloc(Element::new(RefCell::new(ElementData::text(tag, text))))
}

/// Allocates a `LINK`/`IMAGE`/`REFERENCE` element; the caller appends the
/// label's inline children afterwards.
pub fn make_link<'a>(arena: &'a Arena<'a>, tag: Tag, link: LinkData) -> &'a Element<'a> {
    arena.alloc(Element::new(RefCell::new(ElementData::link(tag, link))))
}

pub fn make_list<'a>(arena: &'a Arena<'a>, tag: Tag, list: ListData) -> &'a Element<'a> {
    arena.alloc(Element::new(RefCell::new(ElementData {
        tag,
        contents: Contents::List(list),
    })))
}

pub fn make_note<'a>(arena: &'a Arena<'a>, label: impl Into<String>) -> &'a Element<'a> {
    arena.alloc(Element::new(RefCell::new(ElementData {
        tag: Tag::Note,
        contents: Contents::Note(NoteData { label: label.into() }),
    })))
}

/// Flattens an inline chain's `STR`/`CODE`/`HTML`-bearing leaves to plain
/// text, descending into containers; used for `IMAGE` alt text (§4.5).
pub fn flatten_text<'a>(node: &'a Element<'a>) -> String {
    let mut out = String::new();
    flatten_text_into(node, &mut out);
    out
}

fn flatten_text_into<'a>(node: &'a Element<'a>, out: &mut String) {
    let data = node.data.borrow();
    match &data.contents {
        Contents::Literal(s) => out.push_str(s),
        _ => match data.tag {
            Tag::Space | Tag::LineBreak => out.push(' '),
            Tag::Ellipsis => out.push_str("..."),
            Tag::EmDash => out.push_str("--"),
            Tag::EnDash => out.push('-'),
            Tag::Apostrophe => out.push('\''),
            _ => {
                drop(data);
                for child in node.children() {
                    flatten_text_into(child, out);
                }
            }
        },
    }
}
