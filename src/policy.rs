// Copyright 2025 Cowboy AI, LLC.

//! Breed selection policy
//!
//! Decides whether a breed may be attached to a cat. Decisions are pure:
//! no I/O, no side effects, never fail. A `false` answer means "this breed
//! is not a valid choice", and the caller picks the error to report.

use crate::entity::{Breed, BreedId, CatRecord};
use std::collections::BTreeSet;

/// Strategy deciding which breeds are selectable
pub trait BreedSelectionPolicy: Send + Sync {
    /// May `breed` be used when creating a brand-new cat?
    fn can_select_for_create(&self, breed: &Breed) -> bool;

    /// May `breed` be assigned to `cat`?
    ///
    /// `cat` is either the stored cat or the cat as an update would leave it.
    fn can_select_for_update(&self, breed: &Breed, cat: &CatRecord) -> bool;
}

/// Every catalog breed is selectable
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllBreeds;

impl BreedSelectionPolicy for AllowAllBreeds {
    fn can_select_for_create(&self, _breed: &Breed) -> bool {
        true
    }

    fn can_select_for_update(&self, _breed: &Breed, _cat: &CatRecord) -> bool {
        true
    }
}

/// Retired breeds can no longer be chosen, for new cats or on update
///
/// Cats stored with a retired breed are left alone until they are updated.
///
/// # Examples
///
/// ```rust
/// use cattery::policy::{BreedSelectionPolicy, RetiredBreedsPolicy};
/// use cattery::{Breed, BreedId};
///
/// let retired = BreedId::new(2).unwrap();
/// let policy = RetiredBreedsPolicy::new([retired]);
/// let breed = Breed {
///     id: retired,
///     name: "Ragdoll".to_string(),
///     description: "Gentle and affectionate.".to_string(),
/// };
///
/// assert!(!policy.can_select_for_create(&breed));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RetiredBreedsPolicy {
    retired: BTreeSet<BreedId>,
}

impl RetiredBreedsPolicy {
    /// Create a policy retiring the given breeds
    pub fn new(retired: impl IntoIterator<Item = BreedId>) -> Self {
        Self {
            retired: retired.into_iter().collect(),
        }
    }

    /// Is the breed retired?
    pub fn is_retired(&self, id: BreedId) -> bool {
        self.retired.contains(&id)
    }
}

impl BreedSelectionPolicy for RetiredBreedsPolicy {
    fn can_select_for_create(&self, breed: &Breed) -> bool {
        !self.is_retired(breed.id)
    }

    fn can_select_for_update(&self, breed: &Breed, _cat: &CatRecord) -> bool {
        !self.is_retired(breed.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CatId;

    fn breed(id: i64, name: &str) -> Breed {
        Breed {
            id: BreedId::new(id).unwrap(),
            name: name.to_string(),
            description: format!("{name} description"),
        }
    }

    fn cat_with_breed(breed_id: i64) -> CatRecord {
        CatRecord {
            id: CatId::new(1).unwrap(),
            name: "Luna".to_string(),
            age: 3,
            breed_id: BreedId::new(breed_id).unwrap(),
        }
    }

    #[test]
    fn test_allow_all_accepts_everything() {
        let policy = AllowAllBreeds;
        let siamese = breed(1, "Siamese");

        assert!(policy.can_select_for_create(&siamese));
        assert!(policy.can_select_for_update(&siamese, &cat_with_breed(2)));
    }

    #[test]
    fn test_retired_breed_rejected_for_create() {
        let policy = RetiredBreedsPolicy::new([BreedId::new(2).unwrap()]);

        assert!(policy.can_select_for_create(&breed(1, "Siamese")));
        assert!(!policy.can_select_for_create(&breed(2, "Ragdoll")));
    }

    #[test]
    fn test_retired_breed_rejected_for_update() {
        let policy = RetiredBreedsPolicy::new([BreedId::new(2).unwrap()]);
        let ragdoll = breed(2, "Ragdoll");

        assert!(!policy.can_select_for_update(&ragdoll, &cat_with_breed(2)));
        assert!(!policy.can_select_for_update(&ragdoll, &cat_with_breed(1)));
        assert!(policy.can_select_for_update(&breed(1, "Siamese"), &cat_with_breed(2)));
    }

    #[test]
    fn test_empty_retirement_list_behaves_like_allow_all() {
        let policy = RetiredBreedsPolicy::default();
        let siamese = breed(1, "Siamese");

        assert!(policy.can_select_for_create(&siamese));
        assert!(policy.can_select_for_update(&siamese, &cat_with_breed(3)));
    }
}
