//! OpenSearch client configuration.

/// Address used when no backend address is configured.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// OpenSearch client configuration.
///
/// Built once at bootstrap and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSearchConfig {
    /// OpenSearch URL.
    pub url: String,
    /// TLS configuration.
    pub tls: TlsConfig,
}

impl OpenSearchConfig {
    /// Create a new configuration for a single node.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tls: TlsConfig::default(),
        }
    }

    /// Set TLS configuration.
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// TLS configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    /// Skip certificate verification (not recommended for production).
    pub danger_accept_invalid_certs: bool,
}

impl TlsConfig {
    /// Skip certificate verification (DANGER: only for development).
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.danger_accept_invalid_certs = true;
        self
    }
}
