//! The progress-store contract.
//!
//! Implemented by the `kelime-store` crate for the remote per-user
//! document store and the local blob. Error types live here so the
//! session layer can classify persistence failures without string
//! matching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LearnedWordDoc, ProgressRecord};

/// How a session is identified, which selects the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Durable identity; progress lives in the remote document store.
    Authenticated { user_id: String },
    /// No durable identity; progress lives in local storage only.
    Guest,
}

/// The single word touched by a persist, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WordChange {
    /// Write (or overwrite) the per-word document for a learned word.
    Learned(LearnedWordDoc),
    /// Delete the per-word document for an unlearned word.
    Unlearned { english: String },
}

/// A progress persistence backend. Exactly one is active per session;
/// switching modes means a fresh session and a fresh [`hydrate`].
///
/// [`hydrate`]: ProgressStore::hydrate
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Human-readable backend name (e.g. "remote").
    fn name(&self) -> &str;

    /// Read the progress summary, creating defaults where the backend has
    /// no record yet.
    async fn hydrate(&self) -> Result<ProgressRecord, StoreError>;

    /// Overwrite the progress summary wholesale and, when a word changed,
    /// write or delete that one per-word record. Never rewrites the whole
    /// per-word collection.
    async fn persist(
        &self,
        record: &ProgressRecord,
        change: Option<&WordChange>,
    ) -> Result<(), StoreError>;
}

/// Errors from a progress store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Authentication with the remote store failed.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Local storage could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),
}
