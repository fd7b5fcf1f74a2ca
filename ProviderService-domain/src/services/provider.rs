use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, error, info};

use provider_service_data::database::DatabasePool;
use provider_service_data::models::ProviderRecord;
use provider_service_data::repository::{
    InMemoryStorage, PracticeRepository, PracticeRepositoryTrait, ProviderRepository,
    ProviderRepositoryTrait, RepositoryError,
};

use crate::entities::conversions;
use crate::entities::practice::Practice;
use crate::entities::provider::{Provider, ProviderDetails};
use super::{ServiceError, UpdateOutcome};

/// Trait for provider service operations
#[async_trait]
pub trait ProviderServiceTrait {
    /// List every provider in storage order
    async fn list_providers(&self) -> Result<Vec<Provider>, ServiceError>;

    /// Get a provider by ID
    async fn get_provider(&self, id: i64) -> Result<Option<Provider>, ServiceError>;

    /// Providers whose specialty contains `fragment`, ignoring case.
    /// An empty fragment matches every provider.
    async fn search_by_specialty(&self, fragment: &str) -> Result<Vec<Provider>, ServiceError>;

    /// Create a provider; storage assigns the id
    async fn create_provider(&self, details: ProviderDetails) -> Result<Provider, ServiceError>;

    /// Overwrite all writable fields of an existing provider, including the practice reference
    async fn update_provider(
        &self,
        id: i64,
        details: ProviderDetails,
    ) -> Result<UpdateOutcome<Provider>, ServiceError>;

    /// Delete a provider; a missing id is not an error
    async fn delete_provider(&self, id: i64) -> Result<(), ServiceError>;
}

/// Provider service for domain logic.
///
/// Holds the practice repository as well, to resolve each provider's
/// practice reference into the nested [`Practice`] on the way out.
pub struct ProviderService<R: ProviderRepositoryTrait, P: PracticeRepositoryTrait> {
    providers: R,
    practices: P,
}

impl<R: ProviderRepositoryTrait, P: PracticeRepositoryTrait> ProviderService<R, P> {
    /// Create a new provider service
    pub fn new(providers: R, practices: P) -> Self {
        Self { providers, practices }
    }

    fn map_repo_error(&self, err: RepositoryError) -> ServiceError {
        error!("Provider storage operation failed: {}", err);
        ServiceError::Repository(err)
    }

    async fn resolve_practice(&self, practice_id: Option<i64>) -> Result<Option<Practice>, ServiceError> {
        let Some(id) = practice_id else {
            return Ok(None);
        };

        let record = self
            .practices
            .find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(record.map(conversions::convert_to_domain_practice))
    }

    async fn to_domain(&self, record: ProviderRecord) -> Result<Provider, ServiceError> {
        let practice = self.resolve_practice(record.practice_id).await?;
        Ok(conversions::convert_to_domain_provider(record, practice))
    }

    /// Resolve practices for a batch, looking each distinct id up once
    async fn to_domain_list(&self, records: Vec<ProviderRecord>) -> Result<Vec<Provider>, ServiceError> {
        let mut practices: HashMap<i64, Option<Practice>> = HashMap::new();
        for practice_id in records.iter().filter_map(|r| r.practice_id) {
            if !practices.contains_key(&practice_id) {
                let practice = self.resolve_practice(Some(practice_id)).await?;
                practices.insert(practice_id, practice);
            }
        }
        debug!("Resolved {} practices for {} providers", practices.len(), records.len());

        Ok(records
            .into_iter()
            .map(|record| {
                let practice = record
                    .practice_id
                    .and_then(|id| practices.get(&id).cloned().flatten());
                conversions::convert_to_domain_provider(record, practice)
            })
            .collect())
    }
}

#[async_trait]
impl<R, P> ProviderServiceTrait for ProviderService<R, P>
where
    R: ProviderRepositoryTrait,
    P: PracticeRepositoryTrait,
{
    async fn list_providers(&self) -> Result<Vec<Provider>, ServiceError> {
        let records = self
            .providers
            .find_all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        self.to_domain_list(records).await
    }

    async fn get_provider(&self, id: i64) -> Result<Option<Provider>, ServiceError> {
        let record = self
            .providers
            .find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        match record {
            Some(record) => Ok(Some(self.to_domain(record).await?)),
            None => Ok(None),
        }
    }

    async fn search_by_specialty(&self, fragment: &str) -> Result<Vec<Provider>, ServiceError> {
        let records = self
            .providers
            .find_by_specialty_containing(fragment.to_string())
            .await
            .map_err(|e| self.map_repo_error(e))?;

        debug!("Specialty search {:?} matched {} providers", fragment, records.len());
        self.to_domain_list(records).await
    }

    async fn create_provider(&self, details: ProviderDetails) -> Result<Provider, ServiceError> {
        let record = self
            .providers
            .insert(conversions::convert_to_data_new_provider(details))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Created provider: id={}, practice_id={:?}", record.id, record.practice_id);
        self.to_domain(record).await
    }

    async fn update_provider(
        &self,
        id: i64,
        details: ProviderDetails,
    ) -> Result<UpdateOutcome<Provider>, ServiceError> {
        let Some(existing) = self
            .providers
            .find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
        else {
            info!("Provider not found for update: id={}", id);
            return Ok(UpdateOutcome::NotFound);
        };

        let Some(saved) = self
            .providers
            .update(conversions::apply_provider_details(existing, details))
            .await
            .map_err(|e| self.map_repo_error(e))?
        else {
            info!("Provider deleted during update: id={}", id);
            return Ok(UpdateOutcome::NotFound);
        };

        info!("Updated provider: id={}", saved.id);
        Ok(UpdateOutcome::Updated(self.to_domain(saved).await?))
    }

    async fn delete_provider(&self, id: i64) -> Result<(), ServiceError> {
        let existed = self
            .providers
            .delete_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Deleted provider: id={}, existed={}", id, existed);
        Ok(())
    }
}

/// Create a provider service backed by the SQLite pool
pub fn create_default_provider_service(pool: DatabasePool) -> impl ProviderServiceTrait + Send + Sync {
    ProviderService::new(
        ProviderRepository::new(pool.clone()),
        PracticeRepository::new(pool),
    )
}

/// Create a provider service over shared in-memory storage
pub fn create_in_memory_provider_service(storage: InMemoryStorage) -> impl ProviderServiceTrait + Send + Sync {
    ProviderService::new(storage.clone(), storage)
}
