// Domain services
// This module contains business logic implementations.
pub mod practice;
pub mod provider;

use thiserror::Error;
use provider_service_data::repository::RepositoryError;

/// Errors raised by the domain services.
///
/// Missing records are not errors: lookups return `Option` and updates
/// return [`UpdateOutcome`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage failed underneath the service
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result of an update-by-id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<T> {
    /// The record existed and now holds the new values
    Updated(T),
    /// No record has the requested id; nothing was written
    NotFound,
}

// Re-export service traits and factory functions
pub use practice::{
    create_default_practice_service, create_in_memory_practice_service, PracticeService,
    PracticeServiceTrait,
};
pub use provider::{
    create_default_provider_service, create_in_memory_provider_service, ProviderService,
    ProviderServiceTrait,
};
