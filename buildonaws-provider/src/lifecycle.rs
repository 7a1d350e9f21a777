//! Lifecycle of a single managed character.
//!
//! ```text
//!   Absent --create--> Managed --delete--> Deleted
//!                       |   ^                 |
//!                refresh/update     create ---+--> Managed
//! ```
//!
//! Operations attempted from any other state fail with
//! [`ProviderError::IllegalTransition`] without touching the backend.

use crate::error::{ProviderError, Result};
use crate::model::CharacterResourceModel;
use crate::resource::CharacterResource;

/// Where a character stands with respect to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CharacterLifecycle {
    /// Not created yet.
    #[default]
    Absent,
    /// Stored in the backend, with its latest known state.
    Managed(CharacterResourceModel),
    /// Removed from the backend.
    Deleted {
        /// Identifier the character had.
        id: String,
    },
}

impl CharacterLifecycle {
    /// Start from nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing document.
    pub async fn import(resource: &CharacterResource, id: &str) -> Result<Self> {
        let state = resource.import_state(id).await?;
        Ok(CharacterLifecycle::Managed(state))
    }

    /// Name of the current state.
    pub fn state_name(&self) -> &'static str {
        match self {
            CharacterLifecycle::Absent => "absent",
            CharacterLifecycle::Managed(_) => "managed",
            CharacterLifecycle::Deleted { .. } => "deleted",
        }
    }

    /// Latest known state while managed.
    pub fn state(&self) -> Option<&CharacterResourceModel> {
        match self {
            CharacterLifecycle::Managed(state) => Some(state),
            _ => None,
        }
    }

    /// Create the character.
    pub async fn create(
        &mut self,
        resource: &CharacterResource,
        plan: CharacterResourceModel,
    ) -> Result<()> {
        if let CharacterLifecycle::Managed(_) = self {
            return Err(self.illegal("create"));
        }

        let state = resource.create(plan).await?;
        *self = CharacterLifecycle::Managed(state);
        Ok(())
    }

    /// Reload the state from the backend.
    pub async fn refresh(&mut self, resource: &CharacterResource) -> Result<()> {
        let current = match self {
            CharacterLifecycle::Managed(current) => current,
            other => return Err(other.illegal("refresh")),
        };

        *current = resource.read(current.clone()).await?;
        Ok(())
    }

    /// Apply a new plan. The identifier always comes from the current state.
    pub async fn update(
        &mut self,
        resource: &CharacterResource,
        plan: CharacterResourceModel,
    ) -> Result<()> {
        let current = match self {
            CharacterLifecycle::Managed(current) => current,
            other => return Err(other.illegal("update")),
        };

        let plan = CharacterResourceModel {
            id: current.id.clone(),
            ..plan
        };
        *current = resource.update(plan).await?;
        Ok(())
    }

    /// Delete the character.
    pub async fn delete(&mut self, resource: &CharacterResource) -> Result<()> {
        let current = match self {
            CharacterLifecycle::Managed(current) => current,
            other => return Err(other.illegal("delete")),
        };

        resource.delete(current).await?;

        let id = current.id.clone().unwrap_or_default();
        *self = CharacterLifecycle::Deleted { id };
        Ok(())
    }

    fn illegal(&self, operation: &'static str) -> ProviderError {
        ProviderError::IllegalTransition {
            operation,
            state: self.state_name(),
        }
    }
}
