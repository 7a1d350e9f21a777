//! Search builder and results.

use crate::{
    document::{Document, DocumentMeta, DocumentWithMeta},
    error::{OpenSearchError, Result},
    query::MatchQuery,
};
use buildonaws_log::debug;
use opensearch::OpenSearch;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Search builder for constructing and executing searches.
#[derive(Clone)]
pub struct SearchBuilder {
    client: Arc<OpenSearch>,
    query: Option<Value>,
}

impl SearchBuilder {
    /// Create a new search builder.
    pub(crate) fn new(client: Arc<OpenSearch>) -> Self {
        Self {
            client,
            query: None,
        }
    }

    /// Set the query.
    pub fn query(mut self, query: MatchQuery) -> Self {
        self.query = Some(query.to_json());
        self
    }

    /// Match query on a field.
    pub fn match_field(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.query(MatchQuery::new(field, value))
    }

    /// Build the search body.
    pub fn build_body(&self) -> Value {
        let mut body = serde_json::Map::new();

        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.clone());
        }

        Value::Object(body)
    }

    /// Execute the search against the document's index and return documents
    /// with metadata.
    ///
    /// The response body is decoded strictly: a body without a `hits`
    /// section is an error, not an empty result.
    pub async fn execute_with_meta<T: Document>(self) -> Result<SearchResult<T>> {
        let index = T::index_name();
        debug!("Searching index: {}", index);

        let body = self.build_body();

        let response = self
            .client
            .search(opensearch::SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await?;

        let status = response.status_code();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(OpenSearchError::Status {
                status: status.as_u16(),
                reason: crate::client::error_reason(&text, "Search failed"),
            });
        }

        let raw: RawSearchResponse<T> = serde_json::from_str(&text)?;

        let hits = raw
            .hits
            .hits
            .into_iter()
            .map(|hit| DocumentWithMeta {
                doc: hit.source,
                meta: DocumentMeta {
                    id: hit.id,
                    index: hit.index,
                    score: hit.score,
                },
            })
            .collect();

        Ok(SearchResult {
            total: raw.hits.total.map(|t| t.value).unwrap_or(0),
            hits,
            took_ms: raw.took.unwrap_or(0),
        })
    }
}

/// Search result.
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    /// Total matching documents.
    pub total: u64,
    /// Matching documents with metadata, in the order the store ranked them.
    pub hits: Vec<Hit<T>>,
    /// Time taken in milliseconds.
    pub took_ms: u64,
}

impl<T> SearchResult<T> {
    /// The best ranked hit, if any.
    pub fn first(&self) -> Option<&Hit<T>> {
        self.hits.first()
    }
}

/// A search hit.
pub type Hit<T> = DocumentWithMeta<T>;

#[derive(Deserialize)]
struct RawSearchResponse<T> {
    #[serde(default)]
    took: Option<u64>,
    hits: RawHits<T>,
}

#[derive(Deserialize)]
struct RawHits<T> {
    #[serde(default)]
    total: Option<RawTotal>,
    hits: Vec<RawHit<T>>,
}

#[derive(Deserialize)]
struct RawTotal {
    value: u64,
}

#[derive(Deserialize)]
struct RawHit<T> {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_index", default)]
    index: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: T,
}
