//! Reference and footnote-definition tables (§4.3): built by the
//! `References`/`Notes` passes before the main block pass runs, so forward
//! references resolve.
//!
//! Lookup is linear scan, as the spec calls for ("documents rarely have many
//! references"); labels are compared with [`normalize_label`]'s
//! case/whitespace fold, which is what the testable property in §8 ("labels
//! that differ only in case or internal whitespace resolve to the same
//! reference") actually exercises. The full structural inline-tree
//! comparison of §4.5 (distinguishing, say, a `*emph*` label from a literal
//! `*emph*` one, and forbidding links inside labels) is not implemented --
//! see DESIGN.md's "Reference label equality" entry.

use crate::nodes::LinkData;
use crate::strings::{normalize_label, Case};

#[derive(Debug, Clone)]
pub struct ReferenceDefinition {
    pub key: String,
    pub label: String,
    pub link: LinkData,
}

#[derive(Debug, Clone, Default)]
pub struct RefTable {
    entries: Vec<ReferenceDefinition>,
}

impl RefTable {
    pub fn push(&mut self, label: &str, link: LinkData) {
        let key = normalize_label(label, Case::Fold);
        // First definition for a given label wins, matching peg-markdown's
        // "references are collected top to bottom, first match used".
        if self.entries.iter().any(|e| e.key == key) {
            return;
        }
        self.entries.push(ReferenceDefinition {
            key,
            label: normalize_label(label, Case::Preserve),
            link,
        });
    }

    pub fn lookup(&self, label: &str) -> Option<&LinkData> {
        let key = normalize_label(label, Case::Fold);
        self.entries.iter().find(|e| e.key == key).map(|e| &e.link)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceDefinition> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone)]
pub struct NoteDefinition {
    pub key: String,
    pub label: String,
    /// Raw, not-yet-inline-or-block-parsed body text (§4.4 step 5).
    pub raw: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteTable {
    entries: Vec<NoteDefinition>,
}

impl NoteTable {
    pub fn push(&mut self, label: &str, raw: String) {
        let key = normalize_label(label, Case::Fold);
        if self.entries.iter().any(|e| e.key == key) {
            return;
        }
        self.entries.push(NoteDefinition {
            key,
            label: label.to_string(),
            raw,
        });
    }

    pub fn lookup(&self, label: &str) -> Option<&NoteDefinition> {
        let key = normalize_label(label, Case::Fold);
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteDefinition> {
        self.entries.iter()
    }
}
