//! The grammar (§4.2): productions for blocks, inlines, raw HTML, and the
//! footnote/smart-typography/definition-list extensions, hand-written as
//! recursive-descent Rust following the PEG engine's `(parser, pos) ->
//! Option<(end, value)>` shape (§9, "Grammar source", option (b)).

pub mod blocks;
pub mod dlists;
pub mod html_blocks;
pub mod inlines;
pub mod notes;
pub mod references;

use std::cell::RefCell;

use crate::nodes::{Arena, Element};
use crate::options::ExtensionSet;
use crate::peg::{memoize, Input, Memo};
use crate::reftable::{NoteTable, RefTable};

/// Parser state for one engine invocation: the input buffer, the per-pass
/// memoization tables, the shared options/reference/note state, and the
/// arena everything is allocated from.
///
/// A fresh `Parser` (with fresh memo tables, but the same `refs`/`notes`) is
/// spun up by [`Parser::sub_parser`] each time the driver re-enters the
/// engine on a list item's, blockquote's, or note's raw substring (§4.4 step
/// 5; §9 "Reparsing", option (a): the substring approach).
pub struct Parser<'i, 'a> {
    pub input: Input<'i>,
    pub arena: &'a Arena<'a>,
    pub ext: ExtensionSet,
    pub refs: RefTable,
    pub notes: NoteTable,
    /// Whether `Para` (§4.2) should treat running off the end of this
    /// parser's input as equivalent to hitting a blank line. Set directly on
    /// the top-level document parse, and passed explicitly to every
    /// `sub_parser` spun up by [`Parser::reparse_as_blocks`] -- `true` for a
    /// `BlockQuote`/`DefData`/`Note` body, `false` only for a tight list
    /// item, which relies on an unmarked EOF to end as `Plain` instead.
    pub eof_is_blank: bool,
    block_memo: RefCell<Memo<&'a Element<'a>>>,
    inline_memo: RefCell<Memo<&'a Element<'a>>>,
    pub(crate) html_block_memo: RefCell<Memo<Option<&'static str>>>,
}

impl<'i, 'a> Parser<'i, 'a> {
    pub fn new(bytes: &'i [u8], arena: &'a Arena<'a>, ext: ExtensionSet) -> Self {
        Parser {
            input: Input::new(bytes),
            arena,
            ext,
            refs: RefTable::default(),
            notes: NoteTable::default(),
            eof_is_blank: false,
            block_memo: RefCell::new(Memo::new()),
            inline_memo: RefCell::new(Memo::new()),
            html_block_memo: RefCell::new(Memo::new()),
        }
    }

    /// `Commit` (§4.1): clears memoized state at the cut point between
    /// passes.
    pub fn commit(&self) {
        self.block_memo.borrow_mut().clear();
        self.inline_memo.borrow_mut().clear();
        self.html_block_memo.borrow_mut().clear();
    }

    /// A fresh engine over `bytes`, sharing this parser's arena, options,
    /// and already-collected reference/note tables, but with its own memo
    /// tables (since it parses different input).
    pub fn sub_parser<'j>(&self, bytes: &'j [u8]) -> Parser<'j, 'a> {
        Parser {
            input: Input::new(bytes),
            arena: self.arena,
            ext: self.ext,
            refs: self.refs.clone(),
            notes: self.notes.clone(),
            eof_is_blank: false,
            block_memo: RefCell::new(Memo::new()),
            inline_memo: RefCell::new(Memo::new()),
            html_block_memo: RefCell::new(Memo::new()),
        }
    }

    /// `Doc` = zero or more `Block`, in source order (no cons-then-reverse
    /// needed: `Element::append` is O(1), §9 "Intrusive linked lists").
    ///
    /// Blank lines between blocks belong to no production (`Para`/`Plain`
    /// both reject a blank first line, and most leaf blocks stop exactly at
    /// the blank line that ends them rather than consuming it) -- they're
    /// skipped here rather than by every individual production.
    pub fn parse_blocks(&self) -> Vec<&'a Element<'a>> {
        let mut pos = 0;
        let len = self.input.len();
        let mut out = Vec::new();
        while pos < len {
            pos = skip_blank_lines(&self.input, pos);
            if pos >= len {
                break;
            }
            match self.block(pos) {
                Some((end, elem)) if end > pos => {
                    out.push(elem);
                    pos = end;
                }
                _ => break,
            }
        }
        out
    }

    /// Parses `raw` as a fresh `Doc` over its own engine instance, per §9's
    /// "substring" reparsing strategy. `eof_is_blank` is forwarded to the
    /// sub-parser: `true` for every container except a tight list item (see
    /// `Parser::eof_is_blank`'s doc comment).
    pub fn reparse_as_blocks(&self, raw: &str, eof_is_blank: bool) -> Vec<&'a Element<'a>> {
        let mut sub = self.sub_parser(raw.as_bytes());
        sub.eof_is_blank = eof_is_blank;
        sub.parse_blocks()
    }

    /// Zero or more `Inline`, for the textual content of a `Para`/`Plain`
    /// (parsed immediately, not deferred) or a reparsed RAW substring.
    pub fn parse_inlines(&self) -> Vec<&'a Element<'a>> {
        let mut pos = 0;
        let len = self.input.len();
        let mut out = Vec::new();
        while pos < len {
            match self.inline(pos) {
                Some((end, elem)) if end > pos => {
                    out.push(elem);
                    pos = end;
                }
                _ => break,
            }
        }
        out
    }

    pub fn reparse_as_inlines(&self, raw: &str) -> Vec<&'a Element<'a>> {
        let sub = self.sub_parser(raw.as_bytes());
        sub.parse_inlines()
    }

    /// `Block` (§4.2): the first matching alternative, in the order given
    /// (references and notes are tried before paragraphs so their syntax
    /// isn't misread as prose).
    pub fn block(&self, pos: usize) -> Option<(usize, &'a Element<'a>)> {
        memoize(&self.block_memo, pos, || blocks::block_uncached(self, pos))
    }

    /// `Inline` (§4.2).
    pub fn inline(&self, pos: usize) -> Option<(usize, &'a Element<'a>)> {
        memoize(&self.inline_memo, pos, || inlines::inline_uncached(self, pos))
    }
}

/// Index of the next `\n` (exclusive) at or after `pos`, or the input's
/// length if none remains.
pub fn find_line_end(input: &Input, pos: usize) -> usize {
    let bytes = input.bytes;
    let mut i = pos;
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    if i < bytes.len() {
        i + 1
    } else {
        i
    }
}

/// `pos`'s line, including its trailing `\n` if present.
pub fn take_line<'i>(input: &Input<'i>, pos: usize) -> (&'i str, usize) {
    let end = find_line_end(input, pos);
    (input.text(pos, end), end)
}

pub fn is_blank_line(line: &str) -> bool {
    crate::strings::is_blank(line)
}

/// Advances `pos` past any run of blank lines, so a fresh `Block` attempt
/// always starts on non-blank content (or at EOF).
fn skip_blank_lines(input: &Input, mut pos: usize) -> usize {
    loop {
        let (line, next) = take_line(input, pos);
        if next == pos || !is_blank_line(line) {
            break;
        }
        pos = next;
    }
    pos
}
