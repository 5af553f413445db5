//! Storage error types.
//!
//! These never reach the shopper: the store degrades to memory-only when
//! persistence fails. They exist so storage backends can report what went
//! wrong to the log line.

use thiserror::Error;

/// Errors that can occur in a cart storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized or parsed.
    #[error("Snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend cannot be reached or opened.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
