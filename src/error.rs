use thiserror::Error;

use crate::syntax::NodeId;

/// Errors surfaced by the completion cache and its host facade.
///
/// Resolution failures (an unknown namespace, a missing type) are not errors;
/// they come back as `None` or as an empty result view.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The root handed to cache construction is not a node of the translation unit.
    #[error("invalid root node {0}: not a node of this translation unit")]
    InvalidRoot(NodeId),

    /// Indexed access past the end of a result view.
    #[error("index {index} out of range for result of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A cache or result handle that was never issued or was already released.
    #[error("invalid or released handle: {0}")]
    InvalidHandle(String),

    /// The live completion collaborator failed.
    #[error("completion backend failed: {0}")]
    Backend(String),

    /// An entry needs a display label or, failing that, insert text.
    #[error("entry has neither display text nor insert text")]
    EmptyLabel,

    #[error("unknown access filter `{0}` (expected all, public, non-private or same-scope)")]
    UnknownFilter(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;
