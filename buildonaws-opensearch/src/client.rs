//! OpenSearch client implementation.

use crate::{
    config::OpenSearchConfig,
    document::Document,
    error::{OpenSearchError, Result},
    search::SearchBuilder,
};
use buildonaws_log::{debug, info};
use opensearch::{
    OpenSearch,
    http::{
        StatusCode,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// OpenSearch client for document operations.
///
/// Cloning is cheap; clones share the same transport.
#[derive(Clone)]
pub struct OpenSearchClient {
    client: Arc<OpenSearch>,
    config: Arc<OpenSearchConfig>,
}

/// Outcome of a successful liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingResponse {
    /// HTTP status returned by the node.
    pub status: u16,
    /// Response headers, rendered as `name: value`.
    pub headers: Vec<String>,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client.
    ///
    /// No request is sent; use [`OpenSearchClient::ping`] to probe the node.
    pub fn new(config: OpenSearchConfig) -> Result<Self> {
        info!("Initializing OpenSearch client for: {}", config.url);

        let url = opensearch::http::Url::parse(&config.url)
            .map_err(|e| OpenSearchError::Validation(format!("Invalid URL: {}", e)))?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        #[cfg(any(feature = "rustls", feature = "native-tls"))]
        if config.tls.danger_accept_invalid_certs {
            debug!("Certificate validation disabled for {}", config.url);
            builder = builder.cert_validation(opensearch::cert::CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| OpenSearchError::Connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        debug!("OpenSearch client initialized");

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenSearchConfig {
        &self.config
    }

    /// Create a search builder.
    pub fn search(&self) -> SearchBuilder {
        SearchBuilder::new(self.client.clone())
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Index a document and let the store assign its ID.
    ///
    /// Calling this twice with the same document creates two documents.
    pub async fn index_auto_id<T: Document>(&self, doc: &T) -> Result<String> {
        let index = T::index_name();
        debug!("Indexing document with auto-generated ID in index {}", index);

        let response = self
            .client
            .index(opensearch::IndexParts::Index(index))
            .body(doc)
            .send()
            .await?;

        let status = response.status_code();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let body: IndexResponse = serde_json::from_str(&text)?;
        Ok(body.id)
    }

    /// Get a document by ID.
    ///
    /// Returns `Ok(None)` when the store reports the document as missing.
    pub async fn get<T: Document>(&self, id: &str) -> Result<Option<T>> {
        let index = T::index_name();
        debug!("Getting document {} from index {}", id, index);

        let response = self
            .client
            .get(opensearch::GetParts::IndexId(index, id))
            .send()
            .await?;

        let status = response.status_code();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let body: GetResponse<T> = serde_json::from_str(&text)?;

        if !body.found {
            return Ok(None);
        }

        body.source
            .map(Some)
            .ok_or_else(|| OpenSearchError::Validation("No _source in response".to_string()))
    }

    /// Partially update a document with the given fields.
    ///
    /// The patch is sent as `{"doc": partial}`; fields not present are kept.
    pub async fn partial_update<T: Document>(&self, id: &str, partial: impl Serialize) -> Result<()> {
        let index = T::index_name();
        debug!("Partial update of document {} in index {}", id, index);

        let response = self
            .client
            .update(opensearch::UpdateParts::IndexId(index, id))
            .body(json!({ "doc": partial }))
            .send()
            .await?;

        let status = response.status_code();

        if status == StatusCode::NOT_FOUND {
            return Err(OpenSearchError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            });
        }

        if !status.is_success() {
            let text = response.text().await?;
            return Err(status_error(status, &text));
        }

        Ok(())
    }

    /// Delete a document by ID.
    ///
    /// Returns `false` when there was nothing to delete.
    pub async fn delete<T: Document>(&self, id: &str) -> Result<bool> {
        let index = T::index_name();
        debug!("Deleting document {} from index {}", id, index);

        let response = self
            .client
            .delete(opensearch::DeleteParts::IndexId(index, id))
            .send()
            .await?;

        let status = response.status_code();

        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        if !status.is_success() {
            let text = response.text().await?;
            return Err(status_error(status, &text));
        }

        Ok(true)
    }

    // =========================================================================
    // Utility Methods
    // =========================================================================

    /// Ping the node.
    ///
    /// Fails on transport errors and on any non-success status.
    pub async fn ping(&self) -> Result<PingResponse> {
        let response = self.client.ping().send().await?;

        let status = response.status_code();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
            .collect();

        if !status.is_success() {
            return Err(OpenSearchError::Status {
                status: status.as_u16(),
                reason: "Ping failed".to_string(),
            });
        }

        Ok(PingResponse {
            status: status.as_u16(),
            headers,
        })
    }
}

impl std::fmt::Debug for OpenSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchClient")
            .field("url", &self.config.url)
            .finish()
    }
}

#[derive(Deserialize)]
struct IndexResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Deserialize)]
struct GetResponse<T> {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source", default = "Option::default")]
    source: Option<T>,
}

fn status_error(status: StatusCode, text: &str) -> OpenSearchError {
    OpenSearchError::Status {
        status: status.as_u16(),
        reason: error_reason(text, "Unknown error"),
    }
}

/// Extract `error.reason` from an error body, falling back to `fallback`.
pub(crate) fn error_reason(text: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| match body.get("error") {
            Some(Value::String(reason)) => Some(reason.clone()),
            Some(error) => error
                .get("reason")
                .and_then(|r| r.as_str())
                .map(|r| r.to_string()),
            None => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}
