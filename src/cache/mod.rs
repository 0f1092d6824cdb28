//! Completion cache
//!
//! A [`Cache`] indexes every declaration reachable from one root node of a
//! translation unit and answers completion queries from that index. The index
//! is built once in [`Cache::new`] and never changes afterwards; edits are
//! handled by building a new cache.

pub mod builder;
pub mod entry;
pub mod format;
pub mod live;
pub mod query;
pub mod results;
pub mod store;

use std::sync::Arc;

use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::syntax::{NodeId, TranslationUnit};

pub use entry::Entry;
pub use query::{AccessFilter, split_qualified_name};
pub use results::ResultView;
pub use store::EntryStore;

/// Symbol index over one translation unit.
pub struct Cache {
    tu: Arc<dyn TranslationUnit>,
    root: NodeId,
    store: EntryStore,
    config: CacheConfig,
}

impl Cache {
    pub fn new(tu: Arc<dyn TranslationUnit>, root: NodeId) -> Result<Self> {
        Self::with_config(tu, root, CacheConfig::default())
    }

    /// Build the index rooted at `root`.
    ///
    /// Fails with [`crate::error::CacheError::InvalidRoot`] when `root` is not a
    /// node of `tu`.
    pub fn with_config(tu: Arc<dyn TranslationUnit>, root: NodeId, config: CacheConfig) -> Result<Self> {
        let store = builder::build_store(tu.as_ref(), root, &config)?;
        Ok(Self {
            tu,
            root,
            store,
            config,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Every indexed entry in discovery order.
    pub fn entries(&self) -> &[Arc<Entry>] {
        self.store.master()
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn translation_unit(&self) -> &Arc<dyn TranslationUnit> {
        &self.tu
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("root", &self.root)
            .field("entries", &self.store.len())
            .field("scopes", &self.store.scope_count())
            .field("config", &self.config)
            .finish()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        debug!(root = %self.root, entries = self.store.len(), "Releasing completion cache");
    }
}
