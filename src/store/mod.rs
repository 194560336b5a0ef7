// Copyright 2025 Cowboy AI, LLC.

//! # Relational store
//!
//! The store owns the cat and breed tables: it assigns ids, enforces the
//! cat → breed foreign key and reports "row not found" distinctly from any
//! other failure. Every method is a single atomic call; nothing here spans
//! two calls.
//!
//! ## Implementations
//!
//! - **InMemoryCatStore**: maps behind a lock, for tests and throwaway runs
//! - **SqliteCatStore**: `rusqlite` connection with schema migration

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryCatStore;
pub use sqlite::SqliteCatStore;

use crate::commands::CreateCat;
use crate::entity::{Breed, BreedId, Cat, CatId, CatRecord, NewBreed};
use crate::errors::StoreError;
use async_trait::async_trait;
use tracing::{info, warn};

/// Persistence collaborator for cats and breeds
///
/// Reads of cats always return the breed joined in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatStore: Send + Sync {
    /// Look up a breed by id
    async fn find_breed(&self, id: BreedId) -> Result<Option<Breed>, StoreError>;

    /// Look up a cat by id
    async fn find_cat(&self, id: CatId) -> Result<Option<Cat>, StoreError>;

    /// All cats, in no particular order
    async fn list_cats(&self) -> Result<Vec<Cat>, StoreError>;

    /// All breeds, ascending by name
    async fn list_breeds(&self) -> Result<Vec<Breed>, StoreError>;

    /// Insert a cat and assign it a fresh id
    async fn create_cat(&self, cat: &CreateCat) -> Result<Cat, StoreError>;

    /// Replace name, age and breed of an existing cat
    ///
    /// Returns `Err(StoreError::RowNotFound)` if the cat doesn't exist.
    async fn update_cat(&self, cat: &CatRecord) -> Result<Cat, StoreError>;

    /// Delete a cat, returning it as it was
    ///
    /// Returns `Err(StoreError::RowNotFound)` if the cat doesn't exist.
    async fn delete_cat(&self, id: CatId) -> Result<Cat, StoreError>;

    /// Insert a catalog breed
    async fn create_breed(&self, breed: &NewBreed) -> Result<Breed, StoreError>;

    /// Number of catalog breeds
    async fn count_breeds(&self) -> Result<usize, StoreError>;
}

/// Insert `breeds` when the catalog is empty, returning how many were added
pub async fn seed_breeds_if_empty(
    store: &dyn CatStore,
    breeds: &[NewBreed],
) -> Result<usize, StoreError> {
    if store.count_breeds().await? > 0 {
        return Ok(0);
    }
    for breed in breeds {
        store.create_breed(breed).await?;
    }
    info!(count = breeds.len(), "seeded breed catalog");
    Ok(breeds.len())
}

/// Count the catalog breeds, warning when there are none
///
/// No operation adds breeds, so an empty catalog means every create is rejected.
pub async fn check_breed_catalog(store: &dyn CatStore) -> Result<usize, StoreError> {
    let count = store.count_breeds().await?;
    if count == 0 {
        warn!("breed catalog is empty, every cat create will be rejected; set CATTERY_SEED_BREEDS");
    } else {
        info!(count, "breed catalog ready");
    }
    Ok(count)
}

/// Sort breeds the way every option list is returned
pub(crate) fn sort_by_name(breeds: &mut [Breed]) {
    breeds.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_only_fills_empty_catalog() {
        let store = InMemoryCatStore::new();
        let breeds = vec![
            NewBreed::new("Siamese", "Known for their blue eyes."),
            NewBreed::new("Bombay", "Sleek black coat."),
        ];

        assert_eq!(seed_breeds_if_empty(&store, &breeds).await.unwrap(), 2);
        assert_eq!(seed_breeds_if_empty(&store, &breeds).await.unwrap(), 0);
        assert_eq!(store.count_breeds().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_check_breed_catalog_counts_breeds() {
        let store = InMemoryCatStore::new();
        assert_eq!(check_breed_catalog(&store).await.unwrap(), 0);

        seed_breeds_if_empty(&store, &[NewBreed::new("Bombay", "Sleek black coat.")])
            .await
            .unwrap();
        assert_eq!(check_breed_catalog(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_check_breed_catalog_propagates_store_errors() {
        let mut store = MockCatStore::new();
        store
            .expect_count_breeds()
            .times(1)
            .returning(|| Err(StoreError::Backend("locked".to_string())));

        assert!(check_breed_catalog(&store).await.is_err());
    }

    #[test]
    fn test_sort_by_name_breaks_ties_by_id() {
        let breed = |id: i64, name: &str| Breed {
            id: BreedId::new(id).unwrap(),
            name: name.to_string(),
            description: String::new(),
        };
        let mut breeds = vec![breed(3, "Tabby"), breed(2, "Persian"), breed(1, "Tabby")];
        sort_by_name(&mut breeds);

        let ids: Vec<i64> = breeds.iter().map(|b| b.id.get()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
