//! OpenSearch document client for the BuildOnAWS provider.
//!
//! This crate wraps the `opensearch` client with the handful of calls the
//! provider needs:
//! - Indexing a document with a store-assigned ID
//! - Getting, partially updating and deleting a document by ID
//! - Searching with a match query
//! - Pinging the node at bootstrap
//!
//! Each call is a single round trip. Nothing is retried; every failure is
//! returned as an [`OpenSearchError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use buildonaws_opensearch::{OpenSearchClient, OpenSearchConfig, Document};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Hero {
//!     name: String,
//!     city: String,
//! }
//!
//! impl Document for Hero {
//!     fn index_name() -> &'static str {
//!         "heroes"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSearchClient::new(OpenSearchConfig::new("http://localhost:9200"))?;
//!     client.ping().await?;
//!
//!     let hero = Hero {
//!         name: "Daredevil".to_string(),
//!         city: "New York".to_string(),
//!     };
//!     let id = client.index_auto_id(&hero).await?;
//!     let stored: Option<Hero> = client.get(&id).await?;
//!
//!     let results = client
//!         .search()
//!         .match_field("name", "Daredevil")
//!         .execute_with_meta::<Hero>()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod document;
mod error;
mod query;
mod search;

pub use client::{OpenSearchClient, PingResponse};
pub use config::{DEFAULT_URL, OpenSearchConfig, TlsConfig};
pub use document::{Document, DocumentMeta, DocumentWithMeta};
pub use error::{OpenSearchError, Result};
pub use query::MatchQuery;
pub use search::{Hit, SearchBuilder, SearchResult};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        Document, OpenSearchClient, OpenSearchConfig, OpenSearchError, Result, SearchBuilder,
    };
}
