use async_trait::async_trait;
use tracing::{error, info};

use provider_service_data::database::DatabasePool;
use provider_service_data::repository::{
    InMemoryStorage, PracticeRepository, PracticeRepositoryTrait, RepositoryError,
};

use crate::entities::conversions;
use crate::entities::practice::{Practice, PracticeDetails};
use super::{ServiceError, UpdateOutcome};

/// Trait for practice service operations
#[async_trait]
pub trait PracticeServiceTrait {
    /// List every practice in storage order
    async fn list_practices(&self) -> Result<Vec<Practice>, ServiceError>;

    /// Get a practice by ID
    async fn get_practice(&self, id: i64) -> Result<Option<Practice>, ServiceError>;

    /// Create a practice; storage assigns the id
    async fn create_practice(&self, details: PracticeDetails) -> Result<Practice, ServiceError>;

    /// Overwrite all writable fields of an existing practice
    async fn update_practice(
        &self,
        id: i64,
        details: PracticeDetails,
    ) -> Result<UpdateOutcome<Practice>, ServiceError>;

    /// Delete a practice; a missing id is not an error
    async fn delete_practice(&self, id: i64) -> Result<(), ServiceError>;
}

/// Practice service for domain logic
pub struct PracticeService<R: PracticeRepositoryTrait> {
    repository: R,
}

impl<R: PracticeRepositoryTrait> PracticeService<R> {
    /// Create a new practice service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Log and wrap a repository failure
    fn map_repo_error(&self, err: RepositoryError) -> ServiceError {
        error!("Practice storage operation failed: {}", err);
        ServiceError::Repository(err)
    }
}

#[async_trait]
impl<R: PracticeRepositoryTrait> PracticeServiceTrait for PracticeService<R> {
    async fn list_practices(&self) -> Result<Vec<Practice>, ServiceError> {
        let records = self
            .repository
            .find_all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(records
            .into_iter()
            .map(conversions::convert_to_domain_practice)
            .collect())
    }

    async fn get_practice(&self, id: i64) -> Result<Option<Practice>, ServiceError> {
        let record = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(record.map(conversions::convert_to_domain_practice))
    }

    async fn create_practice(&self, details: PracticeDetails) -> Result<Practice, ServiceError> {
        let record = self
            .repository
            .insert(conversions::convert_to_data_new_practice(details))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Created practice: id={}", record.id);
        Ok(conversions::convert_to_domain_practice(record))
    }

    async fn update_practice(
        &self,
        id: i64,
        details: PracticeDetails,
    ) -> Result<UpdateOutcome<Practice>, ServiceError> {
        let Some(existing) = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
        else {
            info!("Practice not found for update: id={}", id);
            return Ok(UpdateOutcome::NotFound);
        };

        let Some(saved) = self
            .repository
            .update(conversions::apply_practice_details(existing, details))
            .await
            .map_err(|e| self.map_repo_error(e))?
        else {
            info!("Practice deleted during update: id={}", id);
            return Ok(UpdateOutcome::NotFound);
        };

        info!("Updated practice: id={}", saved.id);
        Ok(UpdateOutcome::Updated(conversions::convert_to_domain_practice(saved)))
    }

    async fn delete_practice(&self, id: i64) -> Result<(), ServiceError> {
        let existed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Deleted practice: id={}, existed={}", id, existed);
        Ok(())
    }
}

/// Create a practice service backed by the SQLite pool
pub fn create_default_practice_service(pool: DatabasePool) -> impl PracticeServiceTrait + Send + Sync {
    PracticeService::new(PracticeRepository::new(pool))
}

/// Create a practice service over shared in-memory storage
pub fn create_in_memory_practice_service(storage: InMemoryStorage) -> impl PracticeServiceTrait + Send + Sync {
    PracticeService::new(storage)
}
