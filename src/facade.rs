//! Host boundary
//!
//! [`CompletionHost`] is the explicit create/query/dispose surface a host
//! process (an editor plugin, a language server) drives. Caches and result
//! views live in handle tables; every handle must be released through
//! [`CompletionHost::delete_cache`] or [`CompletionHost::dispose_result`].
//! Using a handle that was never issued or has already been released fails
//! with [`CacheError::InvalidHandle`].
//!
//! The host contains no query logic of its own; every operation forwards to a
//! [`Cache`] method.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{Cache, Entry, ResultView};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::syntax::{NodeId, TranslationUnit, UnsavedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CacheHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResultHandle(u64);

impl fmt::Display for CacheHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache#{}", self.0)
    }
}

impl fmt::Display for ResultHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result#{}", self.0)
    }
}

/// `<crate name> <crate version>`
pub fn version_string() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub struct CompletionHost {
    config: CacheConfig,
    caches: FxHashMap<CacheHandle, Cache>,
    results: FxHashMap<ResultHandle, ResultView>,
    next_id: u64,
}

impl Default for CompletionHost {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl CompletionHost {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            caches: FxHashMap::default(),
            results: FxHashMap::default(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn cache(&self, handle: CacheHandle) -> Result<&Cache> {
        self.caches
            .get(&handle)
            .ok_or_else(|| CacheError::InvalidHandle(handle.to_string()))
    }

    fn result(&self, handle: ResultHandle) -> Result<&ResultView> {
        self.results
            .get(&handle)
            .ok_or_else(|| CacheError::InvalidHandle(handle.to_string()))
    }

    fn store_result(&mut self, view: ResultView) -> ResultHandle {
        let handle = ResultHandle(self.next_id());
        self.results.insert(handle, view);
        handle
    }

    pub fn create_cache(&mut self, tu: Arc<dyn TranslationUnit>, root: NodeId) -> Result<CacheHandle> {
        let cache = Cache::with_config(tu, root, self.config.clone())?;
        let handle = CacheHandle(self.next_id());
        info!(handle = %handle, root = %root, entries = cache.len(), "Created completion cache");
        self.caches.insert(handle, cache);
        Ok(handle)
    }

    /// Release a cache. Result views drawn from it stay valid.
    pub fn delete_cache(&mut self, handle: CacheHandle) -> Result<()> {
        match self.caches.remove(&handle) {
            Some(_) => {
                debug!(handle = %handle, "Deleted completion cache");
                Ok(())
            }
            None => Err(CacheError::InvalidHandle(handle.to_string())),
        }
    }

    pub fn complete_at_position(
        &mut self,
        cache: CacheHandle,
        filename: &str,
        row: u32,
        col: u32,
        unsaved: &[UnsavedFile],
        member_only: bool,
    ) -> Result<ResultHandle> {
        let view = self.cache(cache)?.complete_at(filename, row, col, unsaved, member_only);
        Ok(self.store_result(view))
    }

    /// Members of `scope`, filtered by the configured member filter.
    pub fn complete_members_of(&mut self, cache: CacheHandle, scope: NodeId) -> Result<ResultHandle> {
        let filter = self.config.member_filter;
        let view = self.cache(cache)?.complete_cursor(scope, filter);
        Ok(self.store_result(view))
    }

    pub fn find_qualified_type(
        &self,
        cache: CacheHandle,
        namespace_path: &[&str],
        type_name: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.cache(cache)?.find_type(namespace_path, type_name))
    }

    pub fn complete_namespace(&mut self, cache: CacheHandle, namespace_path: &[&str]) -> Result<ResultHandle> {
        let view = self.cache(cache)?.complete_namespace(namespace_path);
        Ok(self.store_result(view))
    }

    pub fn complete_starting_with(&mut self, cache: CacheHandle, prefix: &str) -> Result<ResultHandle> {
        let view = self.cache(cache)?.complete_starts_with(prefix);
        Ok(self.store_result(view))
    }

    pub fn result_length(&self, result: ResultHandle) -> Result<usize> {
        Ok(self.result(result)?.len())
    }

    pub fn result_entry_at(&self, result: ResultHandle, index: usize) -> Result<Arc<Entry>> {
        self.result(result)?.at(index).map(Arc::clone)
    }

    pub fn dispose_result(&mut self, result: ResultHandle) -> Result<()> {
        self.results
            .remove(&result)
            .map(drop)
            .ok_or_else(|| CacheError::InvalidHandle(result.to_string()))
    }

    pub fn open_caches(&self) -> usize {
        self.caches.len()
    }

    pub fn open_results(&self) -> usize {
        self.results.len()
    }
}

impl Drop for CompletionHost {
    fn drop(&mut self) {
        if !self.caches.is_empty() || !self.results.is_empty() {
            warn!(
                caches = self.caches.len(),
                results = self.results.len(),
                "Completion host dropped with unreleased handles"
            );
        }
    }
}
