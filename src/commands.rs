// Copyright 2025 Cowboy AI, LLC.

//! Commands that change cat records
//!
//! Commands are only ever built by the validation gate, so every field has
//! already passed its range and length rules by the time a command exists.

use crate::entity::{BreedId, CatId, CatRecord};

/// Create a brand-new cat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCat {
    /// Name of the cat
    pub name: String,
    /// Age of the cat
    pub age: u16,
    /// Breed to attach
    pub breed_id: BreedId,
}

/// Replace the name, age and breed of an existing cat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCat {
    /// The cat to update
    pub id: CatId,
    /// New name
    pub name: String,
    /// New age
    pub age: u16,
    /// New breed
    pub breed_id: BreedId,
}

impl UpdateCat {
    /// The cat as it will look once the update is applied
    pub fn as_record(&self) -> CatRecord {
        CatRecord {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            breed_id: self.breed_id,
        }
    }
}
