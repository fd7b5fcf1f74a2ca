use async_trait::async_trait;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::{NewPracticeRecord, PracticeRecord};
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for practices
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PracticeRepositoryTrait: Send + Sync {
    /// Every stored practice in storage order
    async fn find_all(&self) -> Result<Vec<PracticeRecord>, RepositoryError>;

    /// The practice with this id, if any
    async fn find_by_id(&self, id: i64) -> Result<Option<PracticeRecord>, RepositoryError>;

    /// Store a new practice under a freshly assigned id
    async fn insert(&self, practice: NewPracticeRecord) -> Result<PracticeRecord, RepositoryError>;

    /// Insert-or-update keyed on `practice.id`
    async fn save(&self, practice: PracticeRecord) -> Result<PracticeRecord, RepositoryError>;

    /// Overwrite the practice with `practice.id`; `None` when it does not exist
    async fn update(&self, practice: PracticeRecord) -> Result<Option<PracticeRecord>, RepositoryError>;

    /// Remove the practice; returns whether a row existed
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// SQLite-backed practice repository
#[derive(Debug, Clone)]
pub struct PracticeRepository {
    pool: DatabasePool,
}

impl PracticeRepository {
    /// Create a new repository over a shared pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PracticeRepositoryTrait for PracticeRepository {
    async fn find_all(&self) -> Result<Vec<PracticeRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, DatabaseStorage::find_all_practices).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PracticeRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::find_practice_by_id(conn, id)
        })
        .await
    }

    async fn insert(&self, practice: NewPracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        debug!("Storing new practice in database");
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::insert_practice(conn, practice)
        })
        .await
    }

    async fn save(&self, practice: PracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::save_practice(conn, practice)
        })
        .await
    }

    async fn update(&self, practice: PracticeRecord) -> Result<Option<PracticeRecord>, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::update_practice(conn, practice)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        DatabaseStorage::with_connection(&self.pool, move |conn| {
            DatabaseStorage::delete_practice(conn, id)
        })
        .await
    }
}
