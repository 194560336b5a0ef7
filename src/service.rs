// Copyright 2025 Cowboy AI, LLC.

//! Cat lifecycle operations
//!
//! [`CatService`] runs validated commands against a [`CatStore`], consulting
//! the [`BreedSelectionPolicy`] before any write that attaches a breed.
//!
//! "Not found" is signalled two ways, and the difference is part of the
//! contract:
//!
//! - `update` and `delete` return `Ok(None)` when the cat is absent
//! - `breed_options_for_update` fails with [`DomainError::CatNotFound`]
//!
//! Only the store's "row not found" is caught here. Every other store
//! failure propagates as [`DomainError::Store`].

use crate::commands::{CreateCat, UpdateCat};
use crate::entity::{Breed, BreedId, Cat, CatId};
use crate::errors::{DomainError, DomainResult, StoreError};
use crate::policy::{AllowAllBreeds, BreedSelectionPolicy};
use crate::store::CatStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates cat commands and queries over a store and a policy
#[derive(Clone)]
pub struct CatService {
    store: Arc<dyn CatStore>,
    policy: Arc<dyn BreedSelectionPolicy>,
}

impl CatService {
    /// Create a service over the given collaborators
    pub fn new(store: Arc<dyn CatStore>, policy: Arc<dyn BreedSelectionPolicy>) -> Self {
        Self { store, policy }
    }

    /// Create a service where every catalog breed is selectable
    pub fn with_default_policy(store: Arc<dyn CatStore>) -> Self {
        Self::new(store, Arc::new(AllowAllBreeds))
    }

    async fn load_breed(&self, breed_id: BreedId) -> DomainResult<Breed> {
        self.store
            .find_breed(breed_id)
            .await?
            .ok_or(DomainError::InvalidBreedSelection { breed_id })
    }

    /// Create a cat after checking its breed
    pub async fn create(&self, command: CreateCat) -> DomainResult<Cat> {
        let breed = self.load_breed(command.breed_id).await?;
        if !self.policy.can_select_for_create(&breed) {
            warn!(breed_id = %breed.id, "breed rejected for create");
            return Err(DomainError::InvalidBreedSelection { breed_id: breed.id });
        }

        let cat = self.store.create_cat(&command).await?;
        info!(cat_id = %cat.id, breed_id = %cat.breed_id, "cat created");
        Ok(cat)
    }

    /// Replace name, age and breed of a cat
    ///
    /// Returns `Ok(None)` if the cat does not exist. The breed is checked
    /// first, so a bad breed on a missing cat still fails.
    pub async fn update(&self, command: UpdateCat) -> DomainResult<Option<Cat>> {
        let breed = self.load_breed(command.breed_id).await?;
        let target = command.as_record();
        if !self.policy.can_select_for_update(&breed, &target) {
            warn!(cat_id = %command.id, breed_id = %breed.id, "breed rejected for update");
            return Err(DomainError::InvalidBreedSelection { breed_id: breed.id });
        }

        match self.store.update_cat(&target).await {
            Ok(cat) => {
                info!(cat_id = %cat.id, "cat updated");
                Ok(Some(cat))
            }
            Err(StoreError::RowNotFound { .. }) => {
                debug!(cat_id = %command.id, "update target absent");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a cat, returning it as it was, or `Ok(None)` if it was absent
    pub async fn delete(&self, id: CatId) -> DomainResult<Option<Cat>> {
        match self.store.delete_cat(id).await {
            Ok(cat) => {
                info!(cat_id = %id, "cat deleted");
                Ok(Some(cat))
            }
            Err(StoreError::RowNotFound { .. }) => {
                debug!(cat_id = %id, "delete target absent");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a single cat
    pub async fn find_one(&self, id: CatId) -> DomainResult<Option<Cat>> {
        Ok(self.store.find_cat(id).await?)
    }

    /// Every cat
    pub async fn find_all(&self) -> DomainResult<Vec<Cat>> {
        Ok(self.store.list_cats().await?)
    }

    /// Breeds a new cat may be given, sorted by name
    pub async fn breed_options_for_create(&self) -> DomainResult<Vec<Breed>> {
        let breeds = self.store.list_breeds().await?;
        Ok(breeds
            .into_iter()
            .filter(|breed| self.policy.can_select_for_create(breed))
            .collect())
    }

    /// Breeds the cat `id` may be switched to, sorted by name
    ///
    /// Fails with [`DomainError::CatNotFound`] before the catalog is read
    /// if the cat does not exist.
    pub async fn breed_options_for_update(&self, id: CatId) -> DomainResult<Vec<Breed>> {
        let cat = self
            .store
            .find_cat(id)
            .await?
            .ok_or(DomainError::CatNotFound { id })?;
        let record = cat.record();

        let breeds = self.store.list_breeds().await?;
        Ok(breeds
            .into_iter()
            .filter(|breed| self.policy.can_select_for_update(breed, &record))
            .collect())
    }
}
