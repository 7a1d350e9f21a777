//! Document trait and helpers.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for documents that can be indexed in OpenSearch.
///
/// # Example
///
/// ```rust
/// use buildonaws_opensearch::Document;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Villain {
///     name: String,
///     lair: String,
/// }
///
/// impl Document for Villain {
///     fn index_name() -> &'static str {
///         "villains"
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Returns the index holding this document type.
    fn index_name() -> &'static str;
}

/// Document metadata returned alongside a search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMeta {
    /// Document ID.
    pub id: String,
    /// Index name.
    pub index: String,
    /// Document score (relevance).
    pub score: Option<f64>,
}

/// A document with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWithMeta<T> {
    /// The document data.
    pub doc: T,
    /// Document metadata.
    pub meta: DocumentMeta,
}
