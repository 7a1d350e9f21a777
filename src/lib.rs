// BuildOnAWS - a Terraform provider for comic book characters
//
// Characters are kept as documents in an OpenSearch index and managed through
// the `buildonaws_character` resource and data source.

// Re-export the provider surface
pub use buildonaws_provider::*;

// Re-export the member crates
pub use buildonaws_log as log;
pub use buildonaws_opensearch as opensearch;

/// Prelude module for convenient imports
///
/// Import everything you need with a single use statement:
///
/// ```rust,ignore
/// use buildonaws::prelude::*;
/// ```
pub mod prelude {
    pub use buildonaws_opensearch::{OpenSearchClient, OpenSearchConfig, OpenSearchError};
    pub use buildonaws_provider::prelude::*;
    pub use buildonaws_provider::{
        ConfiguredProvider, DataSourceRead, ProviderInfo, Schema, Severity,
    };
}
