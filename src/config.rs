//! Cache configuration
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "member_filter": "public", "dedup_live_results": false }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::AccessFilter;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Copy members of base classes into derived class buckets at build time.
    pub index_inherited_members: bool,
    /// Collapse equal candidates returned by live completion.
    pub dedup_live_results: bool,
    /// Access filter applied by the host facade's member completion.
    pub member_filter: AccessFilter,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            index_inherited_members: true,
            dedup_live_results: true,
            member_filter: AccessFilter::All,
        }
    }
}

impl CacheConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
