//! The `buildonaws_character` data source.

use crate::diag::Diagnostics;
use crate::error::{ConfigError, ProviderError, Result};
use crate::mapper;
use crate::model::{CharacterDataSourceModel, CharacterSource};
use crate::provider::PROVIDER_TYPE_NAME;
use crate::schema::{self, IDENTITY_FIELD, Schema};
use buildonaws_log::debug;
use buildonaws_opensearch::OpenSearchClient;
use serde_json::Value;

/// Outcome of a data source read.
///
/// A lookup that matched nothing still succeeds, with a warning attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRead {
    /// State to record.
    pub state: CharacterDataSourceModel,
    /// Warnings raised during the read.
    pub diagnostics: Diagnostics,
}

/// Controller for the character data source.
#[derive(Debug, Clone)]
pub struct CharacterDataSource {
    client: OpenSearchClient,
}

impl CharacterDataSource {
    /// Create a controller bound to a configured client.
    pub fn new(client: OpenSearchClient) -> Self {
        Self { client }
    }

    /// `buildonaws_character`
    pub fn type_name() -> String {
        format!("{}_character", PROVIDER_TYPE_NAME)
    }

    /// Data source schema.
    pub fn schema() -> Schema {
        schema::character_data_source_schema()
    }

    /// Validate a data source configuration and decode it.
    pub fn config_from_value(config: &Value) -> Result<CharacterDataSourceModel> {
        let diags = Self::schema().validate_config(config);
        if diags.has_error() {
            return Err(ProviderError::InvalidConfig(diags));
        }

        serde_json::from_value(config.clone())
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Look up a character by its identity.
    ///
    /// When several characters share the identity, the first hit in store
    /// order wins.
    pub async fn read(&self, config: CharacterDataSourceModel) -> Result<DataSourceRead> {
        let identity = config.identity;

        let result = self
            .client
            .search()
            .match_field(IDENTITY_FIELD, identity.as_str())
            .execute_with_meta::<CharacterSource>()
            .await
            .map_err(ProviderError::Retrieve)?;

        debug!("hits" = result.total, "took_ms" = result.took_ms; "Character lookup finished");

        let Some(hit) = result.first() else {
            let mut diagnostics = Diagnostics::new();
            diagnostics.add_warning(
                "Datasource was not loaded",
                format!("Reason: no character with the identity '{}'.", identity),
            );

            return Ok(DataSourceRead {
                state: CharacterDataSourceModel::lookup(identity),
                diagnostics,
            });
        };

        let record = mapper::from_document(&mapper::document_from_hit(hit));

        Ok(DataSourceRead {
            state: mapper::data_source_from_record(&record),
            diagnostics: Diagnostics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_from_value() {
        let config = CharacterDataSource::config_from_value(&json!({ "identity": "Wade Wilson" }))
            .unwrap();
        assert_eq!(config, CharacterDataSourceModel::lookup("Wade Wilson"));
    }

    #[test]
    fn test_config_requires_identity() {
        let err = CharacterDataSource::config_from_value(&json!({ "fullname": "Deadpool" }))
            .unwrap_err();
        assert_eq!(err.summary(), "Invalid configuration");
    }
}
