//! Query DSL pieces used by the provider.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Match query for full-text search on one field.
///
/// Rendered in the short form `{"match": {field: query}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQuery {
    /// Field to search.
    pub field: String,
    /// Search query.
    pub query: String,
}

impl MatchQuery {
    /// Create a match query.
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }

    /// Convert query to JSON.
    pub fn to_json(&self) -> Value {
        let mut clause = serde_json::Map::new();
        clause.insert(self.field.clone(), Value::String(self.query.clone()));
        json!({ "match": clause })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_query_short_form() {
        let query = MatchQuery::new("identity", "Wade Wilson");
        assert_eq!(
            query.to_json(),
            json!({ "match": { "identity": "Wade Wilson" } })
        );
    }
}
