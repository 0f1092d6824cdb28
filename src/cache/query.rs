//! Query engine
//!
//! Read-only algorithms over a built [`Cache`]:
//!
//! - [`Cache::find_type`]: qualified lookup through nested scopes
//! - [`Cache::complete_namespace`]: every member of a qualified scope
//! - [`Cache::complete_cursor`]: members of a scope node, access-filtered
//! - [`Cache::complete_starts_with`]: exhaustive prefix scan over all entries
//!
//! Path resolution starts at the global scope and looks each component up by
//! name in the current bucket. A failed step ends the lookup; there is no
//! fallback to partial or fuzzy matches.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Cache;
use super::entry::Entry;
use super::results::ResultView;
use crate::error::CacheError;
use crate::syntax::{AccessLevel, CursorKind, NodeId};

/// Which members of a scope a caller may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessFilter {
    /// No filtering.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Callers outside the class hierarchy.
    #[serde(rename = "public")]
    PublicOnly,
    /// Callers in a derived class.
    #[serde(rename = "non-private")]
    NonPrivate,
    /// Callers inside the queried class: every direct member, and inherited
    /// members that are not private.
    #[serde(rename = "same-scope")]
    SameScope,
}

impl AccessFilter {
    pub fn admits(self, entry: &Entry) -> bool {
        match self {
            AccessFilter::All => true,
            AccessFilter::PublicOnly => entry.access() == AccessLevel::Public,
            AccessFilter::NonPrivate => entry.access() != AccessLevel::Private,
            AccessFilter::SameScope => !entry.is_base_class() || entry.access() != AccessLevel::Private,
        }
    }
}

impl FromStr for AccessFilter {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AccessFilter::All),
            "public" => Ok(AccessFilter::PublicOnly),
            "non-private" => Ok(AccessFilter::NonPrivate),
            "same-scope" => Ok(AccessFilter::SameScope),
            other => Err(CacheError::UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for AccessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessFilter::All => "all",
            AccessFilter::PublicOnly => "public",
            AccessFilter::NonPrivate => "non-private",
            AccessFilter::SameScope => "same-scope",
        };
        f.write_str(name)
    }
}

/// Split `a::b::Type` into its scope path and final name.
/// A leading `::` (explicit global qualification) is ignored.
pub fn split_qualified_name(name: &str) -> (Vec<&str>, &str) {
    let name = name.strip_prefix("::").unwrap_or(name);
    match name.rsplit_once("::") {
        Some((scope, last)) => (scope.split("::").collect(), last),
        None => (Vec::new(), name),
    }
}

impl Cache {
    /// Resolve `path` to a scope node, starting from the global scope.
    pub fn resolve_scope(&self, path: &[&str]) -> Option<NodeId> {
        let global = self.store.global_scope()?;
        path.iter()
            .try_fold(global, |scope, component| self.lookup_scope(scope, component))
    }

    /// First scope-kind member of `scope` named `name`, preferring one that has members.
    fn lookup_scope(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        let mut candidates = self
            .store
            .members(scope)
            .iter()
            .filter(|entry| entry.name() == name && entry.kind().is_some_and(|k| k.is_scope()))
            .filter_map(|entry| entry.reference());

        let first = candidates.next()?;
        if self.store.has_scope(first) {
            return Some(self.store.canonical(first));
        }
        let populated = candidates.find(|node| self.store.has_scope(*node));
        Some(self.store.canonical(populated.unwrap_or(first)))
    }

    /// Look up `type_name` inside the scope named by `namespace_path`.
    ///
    /// Returns `None` when any path component or the type itself is missing.
    /// Type declarations win over functions and variables sharing the name
    /// (`struct stat` next to `int stat(const char*)`), then definitions win
    /// over forward declarations. Ties keep declaration order.
    pub fn find_type(&self, namespace_path: &[&str], type_name: &str) -> Option<NodeId> {
        let scope = self.resolve_scope(namespace_path)?;
        self.store
            .members(scope)
            .iter()
            .filter(|entry| entry.name() == type_name)
            .filter_map(|entry| {
                let node = entry.reference()?;
                let is_type = entry.kind().is_some_and(CursorKind::is_type);
                Some(((!is_type, self.store.is_forward_declaration(node)), node))
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, node)| node)
    }

    /// Every entry of the scope named by `namespace_path`, or an empty view.
    pub fn complete_namespace(&self, namespace_path: &[&str]) -> ResultView {
        let Some(scope) = self.resolve_scope(namespace_path) else {
            debug!(path = ?namespace_path, "Namespace not found");
            return ResultView::empty();
        };
        let members = self.store.members(scope);
        ResultView::from_range(members, 0..members.len())
    }

    /// Direct and inherited members of `scope`, filtered by access.
    pub fn complete_cursor(&self, scope: NodeId, filter: AccessFilter) -> ResultView {
        let members = self.store.members(scope);
        let view = match filter {
            AccessFilter::All => ResultView::from_range(members, 0..members.len()),
            filter => ResultView::from_entries(
                members
                    .iter()
                    .filter(|entry| filter.admits(entry))
                    .cloned()
                    .collect(),
            ),
        };
        debug!(scope = %scope, %filter, members = members.len(), returned = view.len(), "Completed cursor");
        view
    }

    /// Every entry whose display starts with `prefix` (exact, case-sensitive).
    pub fn complete_starts_with(&self, prefix: &str) -> ResultView {
        let matches: Vec<Arc<Entry>> = self
            .store
            .master()
            .iter()
            .filter(|entry| entry.display().starts_with(prefix))
            .cloned()
            .collect();
        debug!(prefix, matches = matches.len(), "Completed prefix");
        ResultView::from_entries(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualified_name() {
        assert_eq!(split_qualified_name("Type"), (vec![], "Type"));
        assert_eq!(split_qualified_name("a::b::Type"), (vec!["a", "b"], "Type"));
        assert_eq!(split_qualified_name("::std::string"), (vec!["std"], "string"));
    }

    #[test]
    fn test_filter_parse_and_display() {
        for name in ["all", "public", "non-private", "same-scope"] {
            let filter: AccessFilter = name.parse().unwrap();
            assert_eq!(filter.to_string(), name);
        }
        assert!(matches!(
            "protected".parse::<AccessFilter>(),
            Err(CacheError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_filter_admission() {
        let public = Entry::new(None, "a", "a").unwrap();
        let protected = Entry::new(None, "b", "b").unwrap().with_access(AccessLevel::Protected);
        let private = Entry::new(None, "c", "c").unwrap().with_access(AccessLevel::Private);
        let inherited_private = private.inherited(AccessLevel::Public);

        assert!(AccessFilter::PublicOnly.admits(&public));
        assert!(!AccessFilter::PublicOnly.admits(&protected));
        assert!(AccessFilter::NonPrivate.admits(&protected));
        assert!(!AccessFilter::NonPrivate.admits(&private));
        assert!(AccessFilter::SameScope.admits(&private));
        assert!(!AccessFilter::SameScope.admits(&inherited_private));
        assert!(AccessFilter::All.admits(&inherited_private));
    }
}
