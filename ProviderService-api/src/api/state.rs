use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use provider_service_data::database::{DatabaseConfig, DatabaseError, DatabasePool, DatabaseType};
use provider_service_data::repository::InMemoryStorage;
use provider_service_domain::health::HealthService as DomainHealthService;
use provider_service_domain::services::{
    create_default_practice_service, create_default_provider_service,
    create_in_memory_practice_service, create_in_memory_provider_service,
};

use super::handlers::{health::HealthService, practice::PracticeService, provider::ProviderService};

/// Services shared by every handler.
///
/// Each field is extracted on its own through `State<...>` via [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
    pub practices: PracticeService,
    pub providers: ProviderService,
    pub health: HealthService,
}

impl AppState {
    /// Services backed by a SQLite pool
    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            practices: Arc::new(create_default_practice_service(pool.clone())),
            providers: Arc::new(create_default_provider_service(pool.clone())),
            health: Arc::new(DomainHealthService::new(pool)),
        }
    }

    /// Services backed by one shared in-memory store
    pub fn in_memory() -> Self {
        let storage = InMemoryStorage::new();
        Self {
            practices: Arc::new(create_in_memory_practice_service(storage.clone())),
            providers: Arc::new(create_in_memory_provider_service(storage)),
            health: Arc::new(DomainHealthService::in_memory()),
        }
    }

    /// Build the storage selected by the configuration
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.db_type {
            DatabaseType::Sqlite => {
                let pool = DatabasePool::connect(config)?;
                info!("Using SQLite storage: {}", pool.connection_info()?);
                Ok(Self::with_pool(pool))
            }
            DatabaseType::Memory => {
                info!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory())
            }
        }
    }
}
