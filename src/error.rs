//! Error types for bucketset

use thiserror::Error;

use crate::Key;

/// Result type alias using SetError
pub type Result<T> = std::result::Result<T, SetError>;

/// Errors surfaced by set construction and insertion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// Key lies above the configured domain
    #[error("key {key} is outside the domain 0..={max_key}")]
    KeyOutOfDomain { key: Key, max_key: Key },

    /// Flat bucket and the overflow stash are both full
    #[error("bucket {bucket} is full ({capacity} slots)")]
    BucketFull { bucket: usize, capacity: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}
