//! Entry storage
//!
//! `master` keeps every entry in discovery order; `by_scope` maps a scope node
//! to the entries declared in it (plus, for class-like scopes, the members it
//! inherits). Every entry reachable through `by_scope` is also in `master`:
//! [`EntryStore::push`] is the only way to create an entry, and
//! [`EntryStore::attach`] only re-files entries that were pushed before.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::entry::Entry;
use crate::syntax::NodeId;

#[derive(Debug, Default)]
pub struct EntryStore {
    master: Vec<Arc<Entry>>,
    by_scope: FxHashMap<NodeId, Vec<Arc<Entry>>>,
    /// Re-opened namespaces point at the first node seen for that namespace.
    aliases: FxHashMap<NodeId, NodeId>,
    forward_declarations: FxHashSet<NodeId>,
    global: Option<NodeId>,
}

impl EntryStore {
    pub(crate) fn new(global: NodeId) -> Self {
        Self {
            global: Some(global),
            ..Self::default()
        }
    }

    /// Append a new entry to `master` and to the bucket of `scope`.
    pub(crate) fn push(&mut self, scope: NodeId, entry: Entry) -> Arc<Entry> {
        let entry = Arc::new(entry);
        self.master.push(Arc::clone(&entry));
        self.by_scope.entry(scope).or_default().push(Arc::clone(&entry));
        entry
    }

    /// File an already stored entry under an additional scope.
    pub(crate) fn attach(&mut self, scope: NodeId, entry: &Arc<Entry>) {
        debug_assert!(self.master.iter().any(|e| Arc::ptr_eq(e, entry)));
        self.by_scope.entry(scope).or_default().push(Arc::clone(entry));
    }

    pub(crate) fn alias(&mut self, node: NodeId, canonical: NodeId) {
        if node != canonical {
            self.aliases.insert(node, canonical);
        }
    }

    pub(crate) fn mark_forward_declaration(&mut self, node: NodeId) {
        self.forward_declarations.insert(node);
    }

    /// The node a scope's bucket is keyed by.
    pub fn canonical(&self, scope: NodeId) -> NodeId {
        self.aliases.get(&scope).copied().unwrap_or(scope)
    }

    /// The scope every qualified path starts from.
    pub fn global_scope(&self) -> Option<NodeId> {
        self.global
    }

    pub fn master(&self) -> &[Arc<Entry>] {
        &self.master
    }

    /// Entries filed under `scope`, following namespace aliases.
    pub fn members(&self, scope: NodeId) -> &[Arc<Entry>] {
        self.by_scope
            .get(&self.canonical(scope))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_scope(&self, scope: NodeId) -> bool {
        self.by_scope.contains_key(&self.canonical(scope))
    }

    pub fn is_forward_declaration(&self, node: NodeId) -> bool {
        self.forward_declarations.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.master.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    pub fn scope_count(&self) -> usize {
        self.by_scope.len()
    }
}
