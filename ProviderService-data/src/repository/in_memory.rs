use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::{NewPracticeRecord, NewProviderRecord, PracticeRecord, ProviderRecord};
use super::errors::RepositoryError;
use super::practice::PracticeRepositoryTrait;
use super::provider::ProviderRepositoryTrait;

#[derive(Debug, Default)]
struct Tables {
    practices: BTreeMap<i64, PracticeRecord>,
    providers: BTreeMap<i64, ProviderRecord>,
    last_practice_id: i64,
    last_provider_id: i64,
}

impl Tables {
    fn check_practice_reference(&self, practice_id: Option<i64>) -> Result<(), RepositoryError> {
        match practice_id {
            Some(id) if !self.practices.contains_key(&id) => Err(RepositoryError::Constraint(
                format!("practice {} does not exist", id),
            )),
            _ => Ok(()),
        }
    }
}

/// In-memory storage for practices and providers.
///
/// Both repository traits are implemented over the same tables, so a clone
/// used as the practice repository and a clone used as the provider
/// repository see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PracticeRepositoryTrait for InMemoryStorage {
    async fn find_all(&self) -> Result<Vec<PracticeRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.practices.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PracticeRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.practices.get(&id).cloned())
    }

    async fn insert(&self, practice: NewPracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        let mut tables = self.tables.lock()?;
        tables.last_practice_id += 1;
        let practice = practice.with_id(tables.last_practice_id);
        tables.practices.insert(practice.id, practice.clone());
        Ok(practice)
    }

    async fn save(&self, practice: PracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        let mut tables = self.tables.lock()?;
        tables.last_practice_id = tables.last_practice_id.max(practice.id);
        tables.practices.insert(practice.id, practice.clone());
        Ok(practice)
    }

    async fn update(&self, practice: PracticeRecord) -> Result<Option<PracticeRecord>, RepositoryError> {
        let mut tables = self.tables.lock()?;
        let Some(slot) = tables.practices.get_mut(&practice.id) else {
            return Ok(None);
        };
        *slot = practice.clone();
        Ok(Some(practice))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock()?;
        if tables.practices.remove(&id).is_none() {
            return Ok(false);
        }

        for provider in tables.providers.values_mut() {
            if provider.practice_id == Some(id) {
                provider.practice_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ProviderRepositoryTrait for InMemoryStorage {
    async fn find_all(&self) -> Result<Vec<ProviderRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.providers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProviderRecord>, RepositoryError> {
        let tables = self.tables.lock()?;
        Ok(tables.providers.get(&id).cloned())
    }

    async fn find_by_specialty_containing(&self, fragment: String) -> Result<Vec<ProviderRecord>, RepositoryError> {
        let needle = fragment.to_lowercase();
        let tables = self.tables.lock()?;

        Ok(tables
            .providers
            .values()
            .filter(|provider| {
                provider
                    .specialty
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, provider: NewProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        let mut tables = self.tables.lock()?;
        tables.check_practice_reference(provider.practice_id)?;

        tables.last_provider_id += 1;
        let provider = provider.with_id(tables.last_provider_id);
        tables.providers.insert(provider.id, provider.clone());
        Ok(provider)
    }

    async fn save(&self, provider: ProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        let mut tables = self.tables.lock()?;
        tables.check_practice_reference(provider.practice_id)?;

        tables.last_provider_id = tables.last_provider_id.max(provider.id);
        tables.providers.insert(provider.id, provider.clone());
        Ok(provider)
    }

    async fn update(&self, provider: ProviderRecord) -> Result<Option<ProviderRecord>, RepositoryError> {
        let mut tables = self.tables.lock()?;
        if !tables.providers.contains_key(&provider.id) {
            return Ok(None);
        }
        tables.check_practice_reference(provider.practice_id)?;

        tables.providers.insert(provider.id, provider.clone());
        Ok(Some(provider))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock()?;
        Ok(tables.providers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(specialty: Option<&str>, practice_id: Option<i64>) -> NewProviderRecord {
        NewProviderRecord {
            name: Some("Test Provider".to_string()),
            specialty: specialty.map(str::to_string),
            practice_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let storage = InMemoryStorage::new();

        let p1 = PracticeRepositoryTrait::insert(&storage, NewPracticeRecord::default()).await.unwrap();
        let p2 = PracticeRepositoryTrait::insert(&storage, NewPracticeRecord::default()).await.unwrap();
        let d1 = ProviderRepositoryTrait::insert(&storage, provider(None, None)).await.unwrap();

        assert_eq!((p1.id, p2.id, d1.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn test_unknown_practice_reference_is_rejected() {
        let storage = InMemoryStorage::new();

        let result = ProviderRepositoryTrait::insert(&storage, provider(Some("Cardiology"), Some(5))).await;

        assert!(matches!(result, Err(RepositoryError::Constraint(_))));
        assert!(ProviderRepositoryTrait::find_all(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_practice_clears_references() {
        let storage = InMemoryStorage::new();
        let practice = PracticeRepositoryTrait::insert(&storage, NewPracticeRecord::default()).await.unwrap();
        let stored = ProviderRepositoryTrait::insert(&storage, provider(None, Some(practice.id))).await.unwrap();

        assert!(PracticeRepositoryTrait::delete_by_id(&storage, practice.id).await.unwrap());
        assert!(!PracticeRepositoryTrait::delete_by_id(&storage, practice.id).await.unwrap());

        let reloaded = ProviderRepositoryTrait::find_by_id(&storage, stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.practice_id, None);
    }

    #[tokio::test]
    async fn test_specialty_search_ignores_case() {
        let storage = InMemoryStorage::new();
        for specialty in [Some("Cardiology"), Some("Dermatology"), Some("pediatric CARDIOLOGY"), None] {
            ProviderRepositoryTrait::insert(&storage, provider(specialty, None)).await.unwrap();
        }

        let found = storage.find_by_specialty_containing("cArDiO".to_string()).await.unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let all = storage.find_by_specialty_containing(String::new()).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_specialty_search_folds_non_ascii_letters() {
        let storage = InMemoryStorage::new();
        for specialty in [Some("Pédiatrie"), Some("Ärztliche Psychotherapie"), Some("Pediatrics")] {
            ProviderRepositoryTrait::insert(&storage, provider(specialty, None)).await.unwrap();
        }

        let found = storage.find_by_specialty_containing("PÉDIATRIE".to_string()).await.unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        let found = storage.find_by_specialty_containing("ärztliche".to_string()).await.unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_update_only_touches_existing_rows() {
        let storage = InMemoryStorage::new();
        let practice = PracticeRepositoryTrait::insert(&storage, NewPracticeRecord::default()).await.unwrap();
        PracticeRepositoryTrait::delete_by_id(&storage, practice.id).await.unwrap();

        let updated = PracticeRepositoryTrait::update(&storage, practice.clone()).await.unwrap();
        assert_eq!(updated, None);
        assert!(PracticeRepositoryTrait::find_all(&storage).await.unwrap().is_empty());

        let stored = ProviderRepositoryTrait::insert(&storage, provider(Some("Cardiology"), None)).await.unwrap();
        let renamed = ProviderRecord {
            specialty: Some("Dermatology".to_string()),
            ..stored.clone()
        };
        let updated = ProviderRepositoryTrait::update(&storage, renamed.clone()).await.unwrap();
        assert_eq!(updated, Some(renamed));

        let dangling = ProviderRecord {
            practice_id: Some(practice.id),
            ..stored
        };
        let result = ProviderRepositoryTrait::update(&storage, dangling).await;
        assert!(matches!(result, Err(RepositoryError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_save_keeps_counter_ahead_of_explicit_ids() {
        let storage = InMemoryStorage::new();
        PracticeRepositoryTrait::save(&storage, NewPracticeRecord::default().with_id(10)).await.unwrap();

        let next = PracticeRepositoryTrait::insert(&storage, NewPracticeRecord::default()).await.unwrap();
        assert_eq!(next.id, 11);
    }
}
