use async_trait::async_trait;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::{NewProviderRecord, ProviderRecord};
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for providers
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ProviderRepositoryTrait: Send + Sync {
    /// Every stored provider in storage order
    async fn find_all(&self) -> Result<Vec<ProviderRecord>, RepositoryError>;

    /// The provider with this id, if any
    async fn find_by_id(&self, id: i64) -> Result<Option<ProviderRecord>, RepositoryError>;

    /// Providers whose specialty contains `fragment`, case-insensitively
    async fn find_by_specialty_containing(&self, fragment: String) -> Result<Vec<ProviderRecord>, RepositoryError>;

    /// Store a new provider under a freshly assigned id
    async fn insert(&self, provider: NewProviderRecord) -> Result<ProviderRecord, RepositoryError>;

    /// Insert-or-update keyed on `provider.id`
    async fn save(&self, provider: ProviderRecord) -> Result<ProviderRecord, RepositoryError>;

    /// Overwrite the provider with `provider.id`; `None` when it does not exist
    async fn update(&self, provider: ProviderRecord) -> Result<Option<ProviderRecord>, RepositoryError>;

    /// Remove the provider; returns whether a row existed
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// SQLite-backed provider repository
#[derive(Debug, Clone)]
pub struct ProviderRepository {
    pool: DatabasePool,
}

impl ProviderRepository {
    /// Create a new repository over a shared pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderRepositoryTrait for ProviderRepository {
    async fn find_all(&self) -> Result<Vec<ProviderRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, DatabaseStorage::find_all_providers).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProviderRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::find_provider_by_id(conn, id)
        })
        .await
    }

    async fn find_by_specialty_containing(&self, fragment: String) -> Result<Vec<ProviderRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::find_providers_by_specialty(conn, &fragment)
        })
        .await
    }

    async fn insert(&self, provider: NewProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        debug!("Storing new provider in database");
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::insert_provider(conn, provider)
        })
        .await
    }

    async fn save(&self, provider: ProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::save_provider(conn, provider)
        })
        .await
    }

    async fn update(&self, provider: ProviderRecord) -> Result<Option<ProviderRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::update_provider(conn, provider)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::delete_provider(conn, id)
        })
        .await
    }
}
