//! Scope-indexed symbol completion over parsed C-family syntax trees.
//!
//! A [`Cache`] walks a translation unit once and files every declaration it
//! finds under its enclosing scope. Completion queries (prefix search,
//! namespace and member completion, qualified type lookup) are then answered
//! from that index. Position-based completion in an edited buffer goes to the
//! translation unit itself through [`Cache::complete_at`].
//!
//! ```
//! use std::sync::Arc;
//! use completion_cache::{Cache, SyntaxTreeBuilder};
//!
//! let mut builder = SyntaxTreeBuilder::new();
//! let ns = builder.namespace(builder.root(), "ns");
//! builder.function(ns, "f", &["int"], None);
//! let tree = Arc::new(builder.finish());
//!
//! let cache = Cache::new(tree.clone(), tree.root()).unwrap();
//! let view = cache.complete_namespace(&["ns"]);
//! assert_eq!(view.at(0).unwrap().insert(), "f(${1:int})");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod logging;
pub mod lsp;
pub mod syntax;

pub use cache::{AccessFilter, Cache, Entry, ResultView};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use facade::{CacheHandle, CompletionHost, ResultHandle, version_string};
pub use syntax::{NodeId, SyntaxTree, SyntaxTreeBuilder, TranslationUnit};
