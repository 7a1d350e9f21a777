//! Character resource and data source for the BuildOnAWS provider.
//!
//! Characters from comic books are stored as documents in the `buildonaws`
//! OpenSearch index. This crate provides:
//! - [`BuildOnAwsProvider`]: metadata, the provider block schema and bootstrap
//! - [`CharacterResource`]: create, read, update, delete and import
//! - [`CharacterDataSource`]: lookup by identity
//! - [`CharacterLifecycle`]: a checked state machine over the resource
//!
//! # Example
//!
//! ```rust,no_run
//! use buildonaws_provider::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ProviderConfig::new()
//!         .with_backend_address("http://localhost:9200")
//!         .with_process_env()?;
//!
//!     let provider = BuildOnAwsProvider::default().configure(&config).await?;
//!     let resource = provider.character_resource();
//!
//!     let plan = CharacterResourceModel::new(
//!         "Daredevil",
//!         "Matt Murdock",
//!         "The man without fear",
//!         CharacterType::SuperHero,
//!     );
//!     let state = resource.create(plan).await?;
//!     let state = resource.read(state).await?;
//!
//!     let found = provider
//!         .character_data_source()
//!         .read(CharacterDataSourceModel::lookup("Matt Murdock"))
//!         .await?;
//!     assert_eq!(found.state.id, state.id.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod datasource;
pub mod diag;
pub mod error;
pub mod lifecycle;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod resource;
pub mod schema;

pub use config::{FileFormat, ProviderConfig, ProviderInfo};
pub use datasource::{CharacterDataSource, DataSourceRead};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{ConfigError, ProviderError, Result};
pub use lifecycle::CharacterLifecycle;
pub use model::{
    BACKEND_INDEX, Character, CharacterDataSourceModel, CharacterDocument, CharacterPatch,
    CharacterResourceModel, CharacterSource, CharacterType,
};
pub use provider::{BuildOnAwsProvider, ConfiguredProvider, PROVIDER_TYPE_NAME, ProviderMetadata};
pub use resource::CharacterResource;
pub use schema::Schema;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        BuildOnAwsProvider, CharacterDataSource, CharacterDataSourceModel, CharacterLifecycle,
        CharacterResource, CharacterResourceModel, CharacterType, Diagnostics, ProviderConfig,
        ProviderError, Result,
    };
}
