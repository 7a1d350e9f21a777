//! Error types for the provider.

use crate::diag::{Diagnostic, Diagnostics};
use crate::schema::BACKEND_ADDRESS_FIELD;
use buildonaws_opensearch::OpenSearchError;
use thiserror::Error;

/// Errors raised while loading provider configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration source could not be read.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// The configuration source could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting carried a value of the wrong shape.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Provider error type.
///
/// Operation failures keep the backend error as their source so the
/// underlying cause reaches the user verbatim.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The backend address is not a well-formed URL.
    #[error("Invalid URL for the backend address: '{address}'")]
    InvalidBackendAddress {
        /// The rejected address.
        address: String,
    },

    /// The liveness probe failed at bootstrap.
    #[error("Failure connecting with the backend: {0}")]
    Connectivity(#[source] OpenSearchError),

    /// Create failed.
    #[error("Error while creating character: {0}")]
    Create(#[source] OpenSearchError),

    /// Read failed.
    #[error("Error while reading character: {0}")]
    Read(#[source] OpenSearchError),

    /// Update failed.
    #[error("Error while updating character: {0}")]
    Update(#[source] OpenSearchError),

    /// Delete failed.
    #[error("Error while deleting character: {0}")]
    Delete(#[source] OpenSearchError),

    /// The data source search failed.
    #[error("Error while retrieving character: {0}")]
    Retrieve(#[source] OpenSearchError),

    /// A configuration object did not satisfy its schema.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(Diagnostics),

    /// A lifecycle operation was attempted from a state that does not allow it.
    #[error("Cannot {operation} character while it is {state}")]
    IllegalTransition {
        /// Attempted operation.
        operation: &'static str,
        /// Current lifecycle state.
        state: &'static str,
    },

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProviderError {
    /// Short summary shown to the user.
    pub fn summary(&self) -> &'static str {
        match self {
            ProviderError::InvalidBackendAddress { .. } => "Invalid URL for the backend address",
            ProviderError::Connectivity(_) => "Failure connecting with the backend",
            ProviderError::Create(_) => "Error while creating character",
            ProviderError::Read(_) => "Error while reading character",
            ProviderError::Update(_) => "Error while updating character",
            ProviderError::Delete(_) => "Error while deleting character",
            ProviderError::Retrieve(_) => "Error while retrieving character",
            ProviderError::InvalidConfig(_) => "Invalid configuration",
            ProviderError::IllegalTransition { .. } => "Invalid character lifecycle transition",
            ProviderError::Config(_) => "Error while loading provider configuration",
        }
    }

    /// Convert into the diagnostics reported to the plugin host.
    pub fn to_diagnostics(&self) -> Diagnostics {
        match self {
            ProviderError::InvalidBackendAddress { address } => Diagnostic::error(
                self.summary(),
                format!("Cannot connect with the backend using the URL: '{}'.", address),
            )
            .with_attribute(BACKEND_ADDRESS_FIELD)
            .into(),
            ProviderError::Connectivity(source)
            | ProviderError::Create(source)
            | ProviderError::Read(source)
            | ProviderError::Update(source)
            | ProviderError::Delete(source)
            | ProviderError::Retrieve(source) => {
                Diagnostic::error(self.summary(), format!("Reason: {}", source)).into()
            }
            ProviderError::InvalidConfig(diagnostics) => diagnostics.clone(),
            ProviderError::IllegalTransition { .. } => {
                Diagnostic::error(self.summary(), format!("Reason: {}", self)).into()
            }
            ProviderError::Config(source) => {
                Diagnostic::error(self.summary(), format!("Reason: {}", source)).into()
            }
        }
    }
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
