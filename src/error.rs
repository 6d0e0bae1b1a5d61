//! Error types for inbox triage.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Compression error: {0}")]
    Compress(#[from] CompressError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Rule error: {0}")]
    Rule(#[from] regex::Error),
}

/// Errors from the external compression service boundary.
///
/// These never escape the triage pipeline: the compression gate logs
/// them and falls back to the uncompressed context.
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("Compression request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Compression service returned status {status}")]
    BadStatus { status: u16 },

    #[error("Invalid response from compression service: {reason}")]
    InvalidResponse { reason: String },

    #[error("Compression service returned an empty or unsuccessful payload")]
    EmptyPayload,
}

/// Follow-up store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
