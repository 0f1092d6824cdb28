//! Completion entries
//!
//! An [`Entry`] is one completable symbol: the label shown to the user, the text
//! spliced into the buffer on acceptance, and the access/static/inheritance
//! flags hosts filter on. Entries are immutable once built and are shared as
//! `Arc<Entry>` between the entry store and any result views drawn from it.
//!
//! Equality is presentational: two entries are equal iff `display` and
//! `insert` match. The node reference and the flags are ignored, so the same
//! member reached directly and through a base class compares equal.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{CacheError, Result};
use crate::syntax::{AccessLevel, Cursor, CursorKind, NodeId};

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    #[serde(rename = "reference")]
    cursor: Option<Cursor>,
    insert: Box<str>,
    display: Box<str>,
    access: AccessLevel,
    is_static: bool,
    is_base_class: bool,
    name: Box<str>,
}

impl Entry {
    /// Build a public, directly-declared entry.
    ///
    /// An empty `display` falls back to `insert`; when both are empty there is
    /// no label to show and construction fails. `is_static` is derived from the
    /// cursor kind.
    pub fn new(cursor: Option<Cursor>, display: impl Into<String>, insert: impl Into<String>) -> Result<Self> {
        let insert: String = insert.into();
        let mut display: String = display.into();
        if display.is_empty() {
            if insert.is_empty() {
                return Err(CacheError::EmptyLabel);
            }
            display = insert.clone();
        }
        let name = leading_name(&display).to_string();
        Ok(Self {
            is_static: cursor.is_some_and(|c| has_static_storage(c.kind)),
            cursor,
            insert: insert.into_boxed_str(),
            display: display.into_boxed_str(),
            access: AccessLevel::Public,
            is_base_class: false,
            name: name.into_boxed_str(),
        })
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    pub fn with_base_class(mut self, is_base_class: bool) -> Self {
        self.is_base_class = is_base_class;
        self
    }

    /// Override the bare name used for scope-path lookups.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        if !name.is_empty() {
            self.name = name.into_boxed_str();
        }
        self
    }

    /// Copy of this entry as seen from a derived class through an edge with
    /// the given inheritance access.
    pub fn inherited(&self, inheritance: AccessLevel) -> Self {
        Self {
            access: self.access.restrict(inheritance),
            is_base_class: true,
            ..self.clone()
        }
    }

    pub fn reference(&self) -> Option<NodeId> {
        self.cursor.map(|c| c.node)
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn kind(&self) -> Option<CursorKind> {
        self.cursor.map(|c| c.kind)
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn insert(&self) -> &str {
        &self.insert
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(&self) -> AccessLevel {
        self.access
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_base_class(&self) -> bool {
        self.is_base_class
    }
}

/// Static storage by declaration kind. Extend by adding match arms.
fn has_static_storage(kind: CursorKind) -> bool {
    match kind {
        CursorKind::CxxMethod { is_static } => is_static,
        CursorKind::VarDecl => true,
        CursorKind::ObjCClassMethodDecl => true,
        _ => false,
    }
}

/// Identifier part of a label: everything before the argument list or tab.
fn leading_name(display: &str) -> &str {
    let end = display.find(['(', '\t']).unwrap_or(display.len());
    display[..end].trim_end()
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.display == other.display && self.insert == other.insert
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.display.hash(state);
        self.insert.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(kind: CursorKind) -> Option<Cursor> {
        Some(Cursor { node: NodeId(1), kind })
    }

    #[test]
    fn test_is_static_derivation() {
        let cases = [
            (CursorKind::CxxMethod { is_static: true }, true),
            (CursorKind::CxxMethod { is_static: false }, false),
            (CursorKind::VarDecl, true),
            (CursorKind::ObjCClassMethodDecl, true),
            (CursorKind::ObjCInstanceMethodDecl, false),
            (CursorKind::FieldDecl, false),
            (CursorKind::FunctionDecl, false),
            (CursorKind::Namespace, false),
        ];
        for (kind, expected) in cases {
            let entry = Entry::new(cursor(kind), "x", "x").unwrap();
            assert_eq!(entry.is_static(), expected, "kind {:?}", kind);
        }
        assert!(!Entry::new(None, "x", "x").unwrap().is_static());
    }

    #[test]
    fn test_equality_ignores_reference_and_flags() {
        let a = Entry::new(cursor(CursorKind::VarDecl), "f(int)", "f(${1:int})").unwrap();
        let b = Entry::new(None, "f(int)", "f(${1:int})")
            .unwrap()
            .with_access(AccessLevel::Private)
            .with_base_class(true);
        assert_eq!(a, b);

        let c = Entry::new(None, "f(int)", "f(${1:long})").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_defaults_are_public_and_direct() {
        let entry = Entry::new(None, "x", "x").unwrap();
        assert_eq!(entry.access(), AccessLevel::Public);
        assert!(!entry.is_base_class());
        assert!(entry.reference().is_none());
    }

    #[test]
    fn test_empty_display_falls_back_to_insert() {
        let entry = Entry::new(None, "", "value").unwrap();
        assert_eq!(entry.display(), "value");
    }

    #[test]
    fn test_blank_label_is_rejected() {
        assert!(matches!(Entry::new(None, "", ""), Err(CacheError::EmptyLabel)));
        assert!(Entry::new(None, "x", "").is_ok());
    }

    #[test]
    fn test_inherited_restricts_access() {
        let entry = Entry::new(cursor(CursorKind::FieldDecl), "x\tint", "x")
            .unwrap()
            .with_access(AccessLevel::Protected);
        let seen = entry.inherited(AccessLevel::Private);
        assert!(seen.is_base_class());
        assert_eq!(seen.access(), AccessLevel::Private);
        assert_eq!(seen, entry);
    }

    #[test]
    fn test_name_derived_from_display() {
        assert_eq!(Entry::new(None, "f(int)\tvoid", "f").unwrap().name(), "f");
        assert_eq!(Entry::new(None, "ns\tnamespace", "ns").unwrap().name(), "ns");
        assert_eq!(Entry::new(None, "ns", "ns").unwrap().with_name("other").name(), "other");
    }
}
