//! Provider bootstrap: metadata, configuration and the backend probe.

use crate::config::{ProviderConfig, ProviderInfo};
use crate::datasource::CharacterDataSource;
use crate::error::{ProviderError, Result};
use crate::resource::CharacterResource;
use crate::schema::{self, Schema};
use buildonaws_log::{debug, info};
use buildonaws_opensearch::{OpenSearchClient, OpenSearchConfig, TlsConfig};
use serde_json::Value;

/// Type name of the provider. Resource and data source names derive from it.
pub const PROVIDER_TYPE_NAME: &str = "buildonaws";

/// Metadata reported to the plugin host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    /// Provider type name.
    pub type_name: &'static str,
    /// Release version.
    pub version: String,
    /// Short commit hash.
    pub commit: String,
}

/// The BuildOnAWS provider before configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOnAwsProvider {
    info: ProviderInfo,
}

impl BuildOnAwsProvider {
    /// Create a provider carrying the given build information.
    pub fn new(info: ProviderInfo) -> Self {
        Self { info }
    }

    /// Provider metadata.
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME,
            version: self.info.version.clone(),
            commit: self.info.commit.clone(),
        }
    }

    /// Provider block schema.
    pub fn schema(&self) -> Schema {
        schema::provider_schema()
    }

    /// Validate a provider block and decode it.
    pub fn parse_config(&self, config: &Value) -> Result<ProviderConfig> {
        let diags = self.schema().validate_config(config);
        if diags.has_error() {
            return Err(ProviderError::InvalidConfig(diags));
        }

        Ok(ProviderConfig::from_value(config.clone())?)
    }

    /// Resource type names served by this provider.
    pub fn resources(&self) -> Vec<String> {
        vec![CharacterResource::type_name()]
    }

    /// Data source type names served by this provider.
    pub fn data_sources(&self) -> Vec<String> {
        vec![CharacterDataSource::type_name()]
    }

    /// Build the backend client and probe it.
    ///
    /// The address is checked before any network call. A failed probe is
    /// fatal.
    pub async fn configure(&self, config: &ProviderConfig) -> Result<ConfiguredProvider> {
        info!("Configuring the BuildOnAWS provider");

        let address = config.backend_address();
        if config.backend_address.is_some() {
            debug!("Backend URL set: {}", address);
        }
        validate_backend_address(address)?;

        let mut tls = TlsConfig::default();
        if config.skip_tls_validation() {
            debug!("NOT doing TLS certificate validation");
            tls = tls.danger_accept_invalid_certs();
        }

        let client = OpenSearchClient::new(OpenSearchConfig::new(address).with_tls(tls))
            .map_err(ProviderError::Connectivity)?;

        let ping = client.ping().await.map_err(ProviderError::Connectivity)?;

        debug!(
            "ping_request_status" = ping.status,
            "ping_request_header" = ping.headers;
            "Response from the ping request"
        );

        Ok(ConfiguredProvider { client })
    }
}

/// A provider with a live backend client.
///
/// Controllers are handed the client directly.
#[derive(Debug, Clone)]
pub struct ConfiguredProvider {
    client: OpenSearchClient,
}

impl ConfiguredProvider {
    /// The backend client.
    pub fn client(&self) -> &OpenSearchClient {
        &self.client
    }

    /// Controller for `buildonaws_character` resources.
    pub fn character_resource(&self) -> CharacterResource {
        CharacterResource::new(self.client.clone())
    }

    /// Controller for `buildonaws_character` data sources.
    pub fn character_data_source(&self) -> CharacterDataSource {
        CharacterDataSource::new(self.client.clone())
    }
}

fn validate_backend_address(address: &str) -> Result<()> {
    let invalid = || ProviderError::InvalidBackendAddress {
        address: address.to_string(),
    };

    let url = url::Url::parse(address).map_err(|_| invalid())?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(invalid()),
    }
}
