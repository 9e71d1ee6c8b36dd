//! A packrat-parsed implementation of the peg-markdown grammar: Markdown
//! source goes in, a semantic [`Document`] tree comes out, renderable to
//! HTML via [`Document::write_html`]/[`Document::write_html_string`].
//!
//! ```
//! use peggy_md::{parse, ExtensionSet};
//!
//! let doc = parse(b"# Hi\n\nSome *text*.\n", ExtensionSet::default());
//! assert_eq!(
//!     doc.write_html_string(),
//!     "<h1>Hi</h1>\n\n<p>Some <em>text</em>.</p>\n"
//! );
//! ```
//!
//! The engine itself ([`peg`]) is a small packrat memoization layer; the
//! grammar built on top of it ([`grammar`]) is hand-written recursive
//! descent rather than generated from a `.peg`/`.leg` source file, so it
//! reads like ordinary Rust.

mod arena_tree;
mod character_set;
mod ctype;
mod driver;
mod entity;
mod grammar;
pub mod html;
mod nodes;
pub mod options;
mod peg;
mod reftable;
mod strings;

pub use driver::Document;
pub use nodes::Arena;
pub use options::ExtensionSet;

/// Parses `source` into a [`Document`]. `source` need not be valid UTF-8 on
/// its own -- the grammar only interprets ASCII control bytes structurally
/// and copies everything else through untouched -- but a captured text
/// region that isn't valid UTF-8 degrades to the empty string rather than
/// panicking.
///
/// Each call allocates its own [`Arena`]; nothing is shared or retained
/// between calls (§5, "Resource policy": no process-wide global state).
pub fn parse(source: &[u8], extensions: ExtensionSet) -> OwnedDocument {
    OwnedDocument::new(source, extensions)
}

/// A [`Document`] bundled with the arena it was allocated from, so callers
/// don't need to juggle the arena's lifetime themselves. [`parse`] returns
/// this rather than a bare `Document<'a>`.
pub struct OwnedDocument {
    // Declared before `arena`: fields drop in declaration order, and `doc`
    // borrows from `arena`'s heap allocation, so it must go first.
    //
    // SAFETY: `doc`'s `'static` is a lie -- it actually borrows from the
    // boxed arena below. The box's heap allocation never moves (only the
    // pointer does), so the reference stays valid across any move of this
    // struct; both fields are private, so no reference with a lifetime
    // longer than `&self` ever escapes.
    doc: Document<'static>,
    arena: Box<Arena<'static>>,
}

impl OwnedDocument {
    fn new(source: &[u8], extensions: ExtensionSet) -> Self {
        let arena: Box<Arena<'static>> = Box::new(Arena::new());
        let arena_ref: &'static Arena<'static> = unsafe { &*(&*arena as *const Arena<'static>) };
        let doc = driver::parse_document(source, arena_ref, extensions);
        OwnedDocument { doc, arena }
    }

    pub fn write_html(&self, output: &mut dyn std::fmt::Write) -> std::fmt::Result {
        self.doc.write_html(output)
    }

    pub fn write_html_with(&self, output: &mut dyn std::fmt::Write, ext: ExtensionSet) -> std::fmt::Result {
        self.doc.write_html_with(output, ext)
    }

    pub fn write_html_string(&self) -> String {
        self.doc.write_html_string()
    }
}
