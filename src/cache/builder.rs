//! Index builder
//!
//! Walks a translation unit once, starting at the root node, and files an entry
//! for every declaration it reaches. Inheritance is resolved in a second pass
//! once every class has been seen, so base classes declared after their
//! derived classes (templates, Objective-C) are still picked up.

use std::sync::Arc;
use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use super::entry::Entry;
use super::format;
use super::store::EntryStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::syntax::{Cursor, CursorKind, NodeId, TranslationUnit};

/// Build the entry store for the tree rooted at `root`.
pub(crate) fn build_store(tu: &dyn TranslationUnit, root: NodeId, config: &CacheConfig) -> Result<EntryStore> {
    let cursor = tu.cursor(root).ok_or(CacheError::InvalidRoot(root))?;
    let started = Instant::now();

    let mut builder = IndexBuilder::new(tu, root);
    if cursor.kind.is_class_like() {
        builder.register_class(root);
    }
    builder.visit_children(root, root);
    if config.index_inherited_members {
        builder.resolve_inheritance();
    }

    debug!(
        root = %root,
        kind = ?cursor.kind,
        nodes = builder.visited,
        entries = builder.store.len(),
        scopes = builder.store.scope_count(),
        elapsed = ?started.elapsed(),
        "Built completion index"
    );
    Ok(builder.store)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

struct IndexBuilder<'a> {
    tu: &'a dyn TranslationUnit,
    store: EntryStore,
    /// Class-like scopes in discovery order.
    classes: Vec<NodeId>,
    class_set: FxHashSet<NodeId>,
    /// (enclosing scope, name) -> first namespace node with that name
    namespaces: FxHashMap<(NodeId, String), NodeId>,
    /// Nodes already walked. A child list may name a node twice or point back
    /// at an ancestor; each node is indexed at most once.
    reached: FxHashSet<NodeId>,
    visited: usize,
}

impl<'a> IndexBuilder<'a> {
    fn new(tu: &'a dyn TranslationUnit, root: NodeId) -> Self {
        Self {
            tu,
            store: EntryStore::new(root),
            classes: Vec::new(),
            class_set: FxHashSet::default(),
            namespaces: FxHashMap::default(),
            reached: FxHashSet::from_iter([root]),
            visited: 0,
        }
    }

    fn register_class(&mut self, node: NodeId) {
        if self.class_set.insert(node) {
            self.classes.push(node);
        }
    }

    /// Claim `child` for indexing. False when it was already reached through
    /// another parent or is an ancestor of `parent`.
    fn reach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.reached.insert(child) {
            return true;
        }
        warn!(parent = %parent, child = %child, "Node reached twice; child list is not a tree");
        false
    }

    /// File the children of `node` under `scope`.
    fn visit_children(&mut self, scope: NodeId, node: NodeId) {
        let children = self.tu.children(node);
        let defined = self.defined_classes(&children);

        for child in children {
            let Some(cursor) = self.tu.cursor(child) else {
                trace!(parent = %node, child = %child, "Skipping dangling child");
                continue;
            };
            if !self.reach(node, child) {
                continue;
            }
            self.visited += 1;

            match cursor.kind {
                CursorKind::LinkageSpec | CursorKind::Unexposed => self.visit_children(scope, child),
                CursorKind::Namespace => self.visit_namespace(scope, cursor),
                CursorKind::EnumDecl => self.visit_enum(scope, cursor),
                kind if kind.is_class_like() => {
                    let has_definition = defined.contains(&(kind, self.tu.spelling(child)));
                    self.visit_class(scope, cursor, has_definition)
                }
                kind if kind.is_declaration() => {
                    self.push_entry(scope, cursor);
                }
                _ => {}
            }
        }
    }

    /// Kind and name of every class-like definition among `children`.
    fn defined_classes(&self, children: &[NodeId]) -> FxHashSet<(CursorKind, String)> {
        children
            .iter()
            .filter_map(|child| self.tu.cursor(*child))
            .filter(|cursor| cursor.kind.is_class_like() && self.tu.is_definition(cursor.node))
            .map(|cursor| (cursor.kind, self.tu.spelling(cursor.node)))
            .collect()
    }

    fn visit_namespace(&mut self, scope: NodeId, cursor: Cursor) {
        let name = self.tu.spelling(cursor.node);
        if name.is_empty() {
            // anonymous namespace: members are visible in the enclosing scope
            self.store.alias(cursor.node, scope);
            self.visit_children(scope, cursor.node);
            return;
        }

        let key = (scope, name);
        let canonical = match self.namespaces.get(&key) {
            Some(&first) => {
                trace!(namespace = %key.1, node = %cursor.node, first = %first, "Re-opened namespace");
                self.store.alias(cursor.node, first);
                first
            }
            None => {
                self.namespaces.insert(key, cursor.node);
                self.push_entry(scope, cursor);
                cursor.node
            }
        };
        self.visit_children(canonical, cursor.node);
    }

    /// `has_definition`: a sibling defines the same class, so a forward
    /// declaration of it adds no entry of its own.
    fn visit_class(&mut self, scope: NodeId, cursor: Cursor, has_definition: bool) {
        if !self.tu.is_definition(cursor.node) {
            self.store.mark_forward_declaration(cursor.node);
            if has_definition {
                trace!(node = %cursor.node, "Forward declaration superseded by a sibling definition");
                return;
            }
        }

        let anonymous = self.tu.spelling(cursor.node).is_empty();
        if anonymous && cursor.kind != CursorKind::ObjCInterfaceDecl {
            // anonymous struct/union members belong to the enclosing scope
            self.store.alias(cursor.node, scope);
            self.visit_children(scope, cursor.node);
            return;
        }

        self.push_entry(scope, cursor);
        self.register_class(cursor.node);
        self.visit_children(cursor.node, cursor.node);
    }

    /// Enumerators are filed under the enum and shared with the enclosing scope.
    fn visit_enum(&mut self, scope: NodeId, cursor: Cursor) {
        self.push_entry(scope, cursor);

        for child in self.tu.children(cursor.node) {
            let Some(constant) = self.tu.cursor(child) else {
                continue;
            };
            if !self.reach(cursor.node, child) {
                continue;
            }
            self.visited += 1;
            if constant.kind != CursorKind::EnumConstantDecl {
                continue;
            }
            if let Some(entry) = self.push_entry(cursor.node, constant) {
                self.store.attach(scope, &entry);
            }
        }
    }

    fn push_entry(&mut self, scope: NodeId, cursor: Cursor) -> Option<Arc<Entry>> {
        let spelling = self.tu.spelling(cursor.node);
        let (display, insert) = match self.tu.completion_string(cursor.node) {
            Some(string) => format::render(&string, Some(cursor.kind)),
            None => format::render_plain(&spelling, Some(cursor.kind)),
        };
        let Ok(entry) = Entry::new(Some(cursor), display, insert) else {
            trace!(node = %cursor.node, kind = ?cursor.kind, "Skipping declaration without a label");
            return None;
        };
        let entry = entry.with_access(self.tu.access(cursor.node)).with_name(spelling);
        trace!(scope = %scope, display = entry.display(), "Indexed declaration");
        Some(self.store.push(scope, entry))
    }

    fn resolve_inheritance(&mut self) {
        let classes = std::mem::take(&mut self.classes);
        let mut state = FxHashMap::default();
        for class in &classes {
            self.inherit_into(*class, &mut state);
        }
        self.classes = classes;
    }

    /// Copy the members of every base of `class` into its bucket, bases first.
    fn inherit_into(&mut self, class: NodeId, state: &mut FxHashMap<NodeId, Visit>) {
        match state.get(&class) {
            Some(Visit::Done) => return,
            Some(Visit::InProgress) => {
                warn!(class = %class, "Inheritance cycle detected; ignoring back edge");
                return;
            }
            None => {}
        }
        state.insert(class, Visit::InProgress);

        for base in self.tu.base_classes(class) {
            let base_class = self.store.canonical(base.class);
            if !self.class_set.contains(&base_class) {
                debug!(class = %class, base = %base.class, "Base class not indexed; skipping");
                continue;
            }
            self.inherit_into(base_class, state);
            if state.get(&base_class) != Some(&Visit::Done) {
                continue;
            }

            let mut seen: FxHashSet<Arc<Entry>> = self.store.members(class).iter().cloned().collect();
            let inherited: Vec<Entry> = self
                .store
                .members(base_class)
                .iter()
                .filter(|entry| entry.kind().is_none_or(CursorKind::is_inheritable))
                .map(|entry| entry.inherited(base.access))
                .collect();

            for entry in inherited {
                // an override with the same label hides the base member
                if seen.contains(&entry) {
                    continue;
                }
                let entry = self.store.push(class, entry);
                seen.insert(entry);
            }
        }

        state.insert(class, Visit::Done);
    }
}
