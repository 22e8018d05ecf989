//! Error types for twobucket

use thiserror::Error;

use crate::types::Bucket;

/// Input errors raised while building puzzles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BucketError {
    #[error("Bucket {bucket} must have a positive capacity")]
    ZeroCapacity { bucket: Bucket },

    #[error("Unknown bucket: {0} (expected \"one\" or \"two\")")]
    UnknownBucket(String),
}

/// Result type alias for twobucket operations
pub type Result<T> = std::result::Result<T, BucketError>;
