//! The generic packrat machinery (§4.1): a memoization cache keyed by
//! `(rule, offset)`, plus the small set of primitives the hand-written
//! grammar in [`crate::grammar`] builds its productions from.
//!
//! Rather than threading a mutable cursor through the parser (which forces
//! every alternative to explicitly rewind on failure), each production is a
//! plain function of `(parser, start offset) -> Option<(end offset, value)>`.
//! Backtracking then falls out for free: trying an alternative just means
//! calling the next function with the same `start`, without undoing
//! anything. This is the functional-packrat shape; it reads less like the
//! generated-parser C of the reference grammar and more like an ordinary
//! recursive-descent Rust parser, which is the point (§9, "Grammar source").

use std::cell::RefCell;

use rustc_hash::FxHashMap;

/// A memoization table for one production, keyed by input offset. A rule
/// evaluated twice at the same offset returns its cached outcome without
/// re-running grammar actions (§4.1, "Failure model": actions only run on
/// success, and only once per offset thanks to this cache).
pub struct Memo<V> {
    table: FxHashMap<usize, Option<(usize, V)>>,
}

impl<V: Clone> Memo<V> {
    pub fn new() -> Self {
        Memo {
            table: FxHashMap::default(),
        }
    }

    fn peek(&self, pos: usize) -> Option<Option<(usize, V)>> {
        self.table.get(&pos).cloned()
    }

    fn insert(&mut self, pos: usize, result: Option<(usize, V)>) {
        self.table.insert(pos, result);
    }

    /// Clears all memoized state. Called at the `Commit` points between
    /// passes (References/Notes/Doc), both because stale entries from a
    /// prior start production are meaningless and to bound peak memory
    /// (§4.1 "Commit", §5 "Resource policy").
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<V: Clone> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks up `pos` in `memo`, running and caching `f` on a miss. `f` is free
/// to recursively consult *other* rules' memo tables (or even re-enter this
/// one at a different offset): the borrow of `memo` is released before `f`
/// runs and re-taken only to store the result.
pub fn memoize<V: Clone>(
    memo: &RefCell<Memo<V>>,
    pos: usize,
    f: impl FnOnce() -> Option<(usize, V)>,
) -> Option<(usize, V)> {
    if let Some(cached) = memo.borrow().peek(pos) {
        return cached;
    }
    let result = f();
    memo.borrow_mut().insert(pos, result.clone());
    result
}

/// Byte classification helpers a large fraction of productions open with; a
/// tiny wrapper over a `&[u8]` input buffer plus index arithmetic.
#[derive(Clone, Copy)]
pub struct Input<'i> {
    pub bytes: &'i [u8],
}

impl<'i> Input<'i> {
    pub fn new(bytes: &'i [u8]) -> Self {
        Input { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    #[inline]
    pub fn eof(&self, pos: usize) -> bool {
        pos >= self.bytes.len()
    }

    /// The captured-text slice `[start, end)` (§4.1, "A captured-text
    /// region"). `str::from_utf8` is assumed to succeed: the grammar never
    /// captures across a byte that splits a multi-byte UTF-8 sequence,
    /// because every production advances by whole `char`s or single ASCII
    /// bytes it has already checked are `< 0x80`.
    #[inline]
    pub fn text(&self, start: usize, end: usize) -> &'i str {
        std::str::from_utf8(&self.bytes[start..end]).unwrap_or("")
    }

    #[inline]
    pub fn starts_with(&self, pos: usize, needle: &[u8]) -> bool {
        self.bytes[pos..].starts_with(needle)
    }

    #[inline]
    pub fn starts_with_ignore_ascii_case(&self, pos: usize, needle: &[u8]) -> bool {
        let end = pos + needle.len();
        if end > self.bytes.len() {
            return false;
        }
        self.bytes[pos..end].eq_ignore_ascii_case(needle)
    }
}

/// And-predicate `&A` (§4.1): succeeds, consuming nothing, iff `rule`
/// matches at `pos`.
#[inline]
pub fn and<V>(result: Option<(usize, V)>, pos: usize) -> Option<usize> {
    result.map(|_| pos)
}

/// Not-predicate `!A`: succeeds, consuming nothing, iff `rule` fails at
/// `pos`.
#[inline]
pub fn not<V>(result: Option<(usize, V)>, pos: usize) -> Option<usize> {
    if result.is_some() {
        None
    } else {
        Some(pos)
    }
}
