//! Provider configuration and build information.

use crate::error::ConfigError;
use buildonaws_opensearch::DEFAULT_URL;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable overriding `backend_address`.
pub const BACKEND_ADDRESS_ENV: &str = "BUILDONAWS_BACKEND_ADDRESS";
/// Environment variable overriding `skip_tls_validation`.
pub const SKIP_TLS_VALIDATION_ENV: &str = "BUILDONAWS_SKIP_TLS_VALIDATION";

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON object.
    Json,
    /// TOML table.
    Toml,
}

impl FileFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Settings of the `provider "buildonaws"` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Address of the OpenSearch backend.
    #[serde(default)]
    pub backend_address: Option<String>,
    /// Skip TLS certificate validation.
    #[serde(default)]
    pub skip_tls_validation: Option<bool>,
}

impl ProviderConfig {
    /// Empty configuration; every setting takes its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend address.
    pub fn with_backend_address(mut self, address: impl Into<String>) -> Self {
        self.backend_address = Some(address.into());
        self
    }

    /// Set the TLS validation bypass.
    pub fn with_skip_tls_validation(mut self, skip: bool) -> Self {
        self.skip_tls_validation = Some(skip);
        self
    }

    /// Decode from the JSON object handed over by the plugin host.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse a provider block written in the given format.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e))),
        }
    }

    /// Load a provider block from a file, detecting the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("Failed to read file: {}", e)))?;

        Self::parse(&content, format)
    }

    /// Apply `BUILDONAWS_*` overrides from the given variables.
    pub fn with_env_overrides<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                BACKEND_ADDRESS_ENV => self.backend_address = Some(value.to_string()),
                SKIP_TLS_VALIDATION_ENV => {
                    self.skip_tls_validation = Some(parse_bool(SKIP_TLS_VALIDATION_ENV, value)?)
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Apply overrides from the process environment, reading `.env` first if present.
    pub fn with_process_env(self) -> Result<Self> {
        dotenvy::dotenv().ok();
        self.with_env_overrides(std::env::vars())
    }

    /// Backend address, falling back to the local default.
    pub fn backend_address(&self) -> &str {
        self.backend_address.as_deref().unwrap_or(DEFAULT_URL)
    }

    /// Whether TLS certificate validation is skipped.
    pub fn skip_tls_validation(&self) -> bool {
        self.skip_tls_validation.unwrap_or(false)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Version information reported in the provider metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Release version.
    pub version: String,
    /// Short commit hash.
    pub commit: String,
}

impl ProviderInfo {
    const DEFAULT_VERSION: &'static str = "0.0.0";
    const DEFAULT_COMMIT: &'static str = "devel";

    /// Build from a release tag and commit hash, either of which may be absent.
    ///
    /// A missing tag yields `0.0.0`. A commit hash is shortened to 8
    /// characters; one with 7 or fewer characters yields `devel`.
    pub fn new(tag: Option<&str>, commit: Option<&str>) -> Self {
        let version = match tag {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => Self::DEFAULT_VERSION.to_string(),
        };

        let commit = match commit {
            Some(commit) if commit.chars().count() > 7 => commit.chars().take(8).collect(),
            _ => Self::DEFAULT_COMMIT.to_string(),
        };

        Self { version, commit }
    }

    /// Values stamped at build time through `BUILDONAWS_TAG` and `BUILDONAWS_COMMIT`.
    pub fn from_build() -> Self {
        Self::new(option_env!("BUILDONAWS_TAG"), option_env!("BUILDONAWS_COMMIT"))
    }
}

impl Default for ProviderInfo {
    fn default() -> Self {
        Self::from_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new();
        assert_eq!(config.backend_address(), "http://localhost:9200");
        assert!(!config.skip_tls_validation());
    }

    #[test]
    fn test_from_value() {
        let config = ProviderConfig::from_value(json!({
            "backend_address": "https://search.example.com:9200",
            "skip_tls_validation": true
        }))
        .unwrap();

        assert_eq!(config.backend_address(), "https://search.example.com:9200");
        assert!(config.skip_tls_validation());

        let err = ProviderConfig::from_value(json!({ "region": "us-east-1" })).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_parse_toml_and_json() {
        let config = ProviderConfig::parse(
            r#"
                backend_address = "http://opensearch:9200"
                skip_tls_validation = false
            "#,
            FileFormat::Toml,
        )
        .unwrap();
        assert_eq!(config.backend_address.as_deref(), Some("http://opensearch:9200"));
        assert_eq!(config.skip_tls_validation, Some(false));

        let config = ProviderConfig::parse("{}", FileFormat::Json).unwrap();
        assert_eq!(config, ProviderConfig::default());

        assert!(ProviderConfig::parse("backend_address = ", FileFormat::Toml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "backend_address = \"http://127.0.0.1:9200\"").unwrap();

        let config = ProviderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.backend_address(), "http://127.0.0.1:9200");

        let err = ProviderConfig::from_file("provider.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ProviderConfig::new()
            .with_backend_address("http://localhost:9200")
            .with_env_overrides([
                ("BUILDONAWS_BACKEND_ADDRESS", "https://override:9200"),
                ("BUILDONAWS_SKIP_TLS_VALIDATION", "TRUE"),
                ("UNRELATED", "x"),
            ])
            .unwrap();

        assert_eq!(config.backend_address(), "https://override:9200");
        assert!(config.skip_tls_validation());

        let err = ProviderConfig::new()
            .with_env_overrides([("BUILDONAWS_SKIP_TLS_VALIDATION", "maybe")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_provider_info() {
        assert_eq!(
            ProviderInfo::new(None, None),
            ProviderInfo {
                version: "0.0.0".to_string(),
                commit: "devel".to_string(),
            }
        );

        let info = ProviderInfo::new(Some("v1.2.3"), Some("0123456789abcdef"));
        assert_eq!(info.version, "v1.2.3");
        assert_eq!(info.commit, "01234567");

        assert_eq!(ProviderInfo::new(Some(""), Some("0123456")).commit, "devel");
        assert_eq!(ProviderInfo::new(Some(""), Some("01234567")).commit, "01234567");
    }
}
