//! The `buildonaws_character` resource.

use crate::error::{ConfigError, ProviderError, Result};
use crate::mapper;
use crate::model::{BACKEND_INDEX, CharacterPatch, CharacterResourceModel, CharacterSource};
use crate::provider::PROVIDER_TYPE_NAME;
use crate::schema::{self, Schema};
use buildonaws_log::{debug, warn};
use buildonaws_opensearch::{OpenSearchClient, OpenSearchError};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Controller for the character resource.
///
/// Every operation is a single call against the backend. Nothing is
/// cached between calls; the state handed in by the host is the only input.
#[derive(Debug, Clone)]
pub struct CharacterResource {
    client: OpenSearchClient,
}

impl CharacterResource {
    /// Create a controller bound to a configured client.
    pub fn new(client: OpenSearchClient) -> Self {
        Self { client }
    }

    /// `buildonaws_character`
    pub fn type_name() -> String {
        format!("{}_character", PROVIDER_TYPE_NAME)
    }

    /// Resource schema.
    pub fn schema() -> Schema {
        schema::character_resource_schema()
    }

    /// Validate a resource configuration and decode it into a plan.
    pub fn plan_from_config(config: &Value) -> Result<CharacterResourceModel> {
        let diags = Self::schema().validate_config(config);
        if diags.has_error() {
            return Err(ProviderError::InvalidConfig(diags));
        }

        serde_json::from_value(config.clone())
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Store a new character and return the resulting state.
    ///
    /// Any identifier carried by the plan is ignored; the store assigns one.
    pub async fn create(&self, plan: CharacterResourceModel) -> Result<CharacterResourceModel> {
        let document = mapper::to_document(&mapper::record_from_resource(&plan));

        let id = self
            .client
            .index_auto_id(&document.source)
            .await
            .map_err(ProviderError::Create)?;

        debug!("character_id" = id; "Character created");

        Ok(CharacterResourceModel {
            id: Some(id),
            last_updated: Some(timestamp()),
            ..plan
        })
    }

    /// Refresh a state from the store.
    ///
    /// Every mutable attribute is overwritten; `id` and `last_updated` are kept.
    pub async fn read(&self, mut state: CharacterResourceModel) -> Result<CharacterResourceModel> {
        let id = require_id(&state).map_err(ProviderError::Read)?;

        let source = self
            .client
            .get::<CharacterSource>(&id)
            .await
            .map_err(ProviderError::Read)?
            .ok_or_else(|| {
                ProviderError::Read(OpenSearchError::DocumentNotFound {
                    index: BACKEND_INDEX.to_string(),
                    id: id.clone(),
                })
            })?;

        let record = mapper::from_document(&mapper::document_from_source(&id, source));
        mapper::refresh_resource(&mut state, &record);

        debug!("character_id" = id; "Character read");

        Ok(state)
    }

    /// Patch the stored character with the planned attributes.
    ///
    /// All four attributes are sent, empty ones included. The change is not
    /// read back.
    pub async fn update(&self, plan: CharacterResourceModel) -> Result<CharacterResourceModel> {
        let id = require_id(&plan).map_err(ProviderError::Update)?;
        let document = mapper::to_document(&mapper::record_from_resource(&plan));

        self.client
            .partial_update::<CharacterSource>(&id, CharacterPatch::from(&document.source))
            .await
            .map_err(ProviderError::Update)?;

        debug!("character_id" = id; "Character updated");

        Ok(CharacterResourceModel {
            last_updated: Some(timestamp()),
            ..plan
        })
    }

    /// Remove the stored character.
    ///
    /// A document that is already gone is logged and otherwise ignored.
    pub async fn delete(&self, state: &CharacterResourceModel) -> Result<()> {
        let id = require_id(state).map_err(ProviderError::Delete)?;

        let deleted = self
            .client
            .delete::<CharacterSource>(&id)
            .await
            .map_err(ProviderError::Delete)?;

        if deleted {
            debug!("character_id" = id; "Character deleted");
        } else {
            warn!("character_id" = id; "Character was already absent from the backend");
        }

        Ok(())
    }

    /// Adopt an existing document by its identifier.
    pub async fn import_state(&self, id: &str) -> Result<CharacterResourceModel> {
        self.read(CharacterResourceModel::with_id(id)).await
    }
}

fn require_id(model: &CharacterResourceModel) -> std::result::Result<String, OpenSearchError> {
    model
        .document_id()
        .map(str::to_string)
        .ok_or_else(|| OpenSearchError::Validation("Character has no identifier".to_string()))
}

/// Current time, RFC 3339 in UTC.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}
