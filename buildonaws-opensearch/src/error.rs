//! Error types for OpenSearch operations.

use thiserror::Error;

/// OpenSearch error type.
///
/// Every failure of a backend call ends up here: transport failures,
/// non-success statuses and bodies that do not decode.
#[derive(Error, Debug)]
pub enum OpenSearchError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Document not found.
    #[error("Document not found: {index}/{id}")]
    DocumentNotFound {
        /// Index name.
        index: String,
        /// Document ID.
        id: String,
    },

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("OpenSearch returned status {status}: {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason extracted from the error body.
        reason: String,
    },

    /// Client error from opensearch crate.
    #[error("Client error: {0}")]
    Client(#[from] opensearch::Error),
}

/// Result type alias for OpenSearch operations.
pub type Result<T> = std::result::Result<T, OpenSearchError>;
