//! Engine error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the session layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog has no words; there is nothing to show.
    #[error("the word catalog is empty")]
    CatalogEmpty,

    /// The named word is not a catalog entry.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// Persistence failed. The in-memory state change was kept.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns `true` when the error leaves the session usable: the
    /// in-memory state is intact and only the backing store diverged.
    pub fn is_degraded_only(&self) -> bool {
        matches!(self, EngineError::Store(_))
    }
}
