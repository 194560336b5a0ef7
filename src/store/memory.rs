// Copyright 2025 Cowboy AI, LLC.

//! In-memory store

use super::{sort_by_name, CatStore};
use crate::commands::CreateCat;
use crate::entity::{Breed, BreedId, Cat, CatId, CatRecord, EntityId, NewBreed};
use crate::errors::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    breeds: BTreeMap<BreedId, Breed>,
    cats: BTreeMap<CatId, CatRecord>,
    // Ids are handed out once and never reused, even after a delete.
    last_breed_id: i64,
    last_cat_id: i64,
}

impl Tables {
    fn join(&self, record: &CatRecord) -> Result<Cat, StoreError> {
        let breed = self
            .breeds
            .get(&record.breed_id)
            .cloned()
            .ok_or_else(|| StoreError::ForeignKeyViolation(format!(
                "cat {} references missing breed {}",
                record.id, record.breed_id
            )))?;
        Ok(Cat::new(record.id, record.name.clone(), record.age, breed))
    }

    fn require_breed(&self, id: BreedId) -> Result<(), StoreError> {
        if self.breeds.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(format!("breed {id} does not exist")))
        }
    }

    fn next_id<T>(last: &mut i64) -> Result<EntityId<T>, StoreError> {
        *last += 1;
        EntityId::new(*last)
            .ok_or_else(|| StoreError::Backend("id sequence exhausted".to_string()))
    }
}

/// Cats and breeds kept in ordered maps behind an async lock
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose catalog holds `breeds`, with ids assigned in order
    pub fn with_breeds(breeds: impl IntoIterator<Item = NewBreed>) -> Self {
        let mut tables = Tables::default();
        for breed in breeds {
            tables.last_breed_id += 1;
            if let Some(id) = BreedId::new(tables.last_breed_id) {
                tables.breeds.insert(
                    id,
                    Breed {
                        id,
                        name: breed.name,
                        description: breed.description,
                    },
                );
            }
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of stored cats
    pub async fn cat_count(&self) -> usize {
        self.tables.read().await.cats.len()
    }
}

#[async_trait]
impl CatStore for InMemoryCatStore {
    async fn find_breed(&self, id: BreedId) -> Result<Option<Breed>, StoreError> {
        Ok(self.tables.read().await.breeds.get(&id).cloned())
    }

    async fn find_cat(&self, id: CatId) -> Result<Option<Cat>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .cats
            .get(&id)
            .map(|record| tables.join(record))
            .transpose()
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, StoreError> {
        let tables = self.tables.read().await;
        tables.cats.values().map(|record| tables.join(record)).collect()
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, StoreError> {
        let mut breeds: Vec<Breed> = self.tables.read().await.breeds.values().cloned().collect();
        sort_by_name(&mut breeds);
        Ok(breeds)
    }

    async fn create_cat(&self, cat: &CreateCat) -> Result<Cat, StoreError> {
        let mut tables = self.tables.write().await;
        tables.require_breed(cat.breed_id)?;
        let id: CatId = Tables::next_id(&mut tables.last_cat_id)?;
        let record = CatRecord {
            id,
            name: cat.name.clone(),
            age: cat.age,
            breed_id: cat.breed_id,
        };
        let created = tables.join(&record)?;
        tables.cats.insert(id, record);
        debug!(cat_id = %id, "inserted cat");
        Ok(created)
    }

    async fn update_cat(&self, cat: &CatRecord) -> Result<Cat, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.cats.contains_key(&cat.id) {
            return Err(StoreError::RowNotFound {
                entity: "cat",
                id: cat.id.get(),
            });
        }
        tables.require_breed(cat.breed_id)?;
        let updated = tables.join(cat)?;
        tables.cats.insert(cat.id, cat.clone());
        Ok(updated)
    }

    async fn delete_cat(&self, id: CatId) -> Result<Cat, StoreError> {
        let mut tables = self.tables.write().await;
        let record = tables.cats.remove(&id).ok_or(StoreError::RowNotFound {
            entity: "cat",
            id: id.get(),
        })?;
        tables.join(&record)
    }

    async fn create_breed(&self, breed: &NewBreed) -> Result<Breed, StoreError> {
        let mut tables = self.tables.write().await;
        let id: BreedId = Tables::next_id(&mut tables.last_breed_id)?;
        let stored = Breed {
            id,
            name: breed.name.clone(),
            description: breed.description.clone(),
        };
        tables.breeds.insert(id, stored.clone());
        Ok(stored)
    }

    async fn count_breeds(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.breeds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> InMemoryCatStore {
        InMemoryCatStore::with_breeds([
            NewBreed::new("Siamese", "Known for their blue eyes."),
            NewBreed::new("Munchkin", "Short legs and playful."),
        ])
    }

    fn create(name: &str, breed_id: i64) -> CreateCat {
        CreateCat {
            name: name.to_string(),
            age: 2,
            breed_id: BreedId::new(breed_id).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids_and_joins_breed() {
        let store = store();
        let first = store.create_cat(&create("Kitty", 1)).await.unwrap();
        let second = store.create_cat(&create("Mochi", 2)).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(second.breed.name, "Munchkin");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = store();
        let first = store.create_cat(&create("Kitty", 1)).await.unwrap();
        store.delete_cat(first.id).await.unwrap();
        let second = store.create_cat(&create("Mochi", 1)).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_missing_rows_report_row_not_found() {
        let store = store();
        let missing = CatId::new(99).unwrap();
        let record = CatRecord {
            id: missing,
            name: "Luna".to_string(),
            age: 3,
            breed_id: BreedId::new(1).unwrap(),
        };

        assert!(store.update_cat(&record).await.unwrap_err().is_row_not_found());
        assert!(store.delete_cat(missing).await.unwrap_err().is_row_not_found());
        assert_eq!(store.find_cat(missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_foreign_key_is_enforced() {
        let store = store();
        let err = store.create_cat(&create("Ghost", 42)).await.unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert_eq!(store.cat_count().await, 0);
    }

    #[tokio::test]
    async fn test_breeds_listed_by_name() {
        let names: Vec<String> = store()
            .list_breeds()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names, vec!["Munchkin".to_string(), "Siamese".to_string()]);
    }
}
