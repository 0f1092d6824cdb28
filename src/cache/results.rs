use std::ops::Range;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::entry::Entry;
use crate::error::{CacheError, Result};

/// Immutable snapshot of matched entries.
///
/// A view holds its own references to the entries, so it stays valid after
/// the cache it was drawn from has been dropped.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResultView {
    entries: Vec<Arc<Entry>>,
}

impl ResultView {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy a half-open range of a shared sequence. The range is clamped to
    /// the sequence bounds.
    pub fn from_range(source: &[Arc<Entry>], range: Range<usize>) -> Self {
        let end = range.end.min(source.len());
        let start = range.start.min(end);
        Self {
            entries: source[start..end].to_vec(),
        }
    }

    /// Take ownership of a freshly produced sequence.
    pub fn from_entries(entries: Vec<Arc<Entry>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Arc<Entry>> {
        self.entries.get(index).ok_or(CacheError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Entry>> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    /// New view with equal entries collapsed, keeping the first occurrence.
    pub fn deduplicated(&self) -> Self {
        let mut seen = FxHashSet::default();
        let entries = self
            .entries
            .iter()
            .filter(|entry| seen.insert(Arc::clone(entry)))
            .cloned()
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a ResultView {
    type Item = &'a Arc<Entry>;
    type IntoIter = std::slice::Iter<'a, Arc<Entry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
