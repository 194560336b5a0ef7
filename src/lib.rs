//! # Cattery
//!
//! Cat records with a normalized breed catalog, served as a JSON REST API.
//!
//! The crate is split along the path a request takes:
//! - **Validation**: untyped JSON bodies become [`CreateCat`] / [`UpdateCat`] commands
//! - **Policy**: [`BreedSelectionPolicy`] decides which breeds may be attached
//! - **Service**: [`CatService`] runs lifecycle operations against a store
//! - **Store**: [`CatStore`] persists cats and breeds (in memory or SQLite)
//! - **HTTP**: axum routes mapping outcomes to status codes
//!
//! ## Design Principles
//!
//! 1. **Type Safety**: cat and breed ids are distinct phantom-typed integers
//! 2. **Validated Commands**: a command only exists once its fields passed every rule
//! 3. **Pluggable Policy**: breed rules change without touching the service
//! 4. **Explicit Absence**: update and delete report a missing cat as `None`
//!
//! ## Example
//!
//! ```rust
//! use cattery::{CatService, InMemoryCatStore, NewBreed};
//! use cattery::validation::validate_create;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryCatStore::with_breeds([NewBreed::new("Munchkin", "Short legs and playful.")]);
//! let service = CatService::with_default_policy(Arc::new(store));
//!
//! let command = validate_create(&json!({"name": "Mochi", "age": 1, "breedId": 1})).unwrap();
//! let cat = service.create(command).await.unwrap();
//! assert_eq!(cat.breed.name, "Munchkin");
//! # });
//! ```

#![warn(missing_docs)]

mod commands;
mod entity;
mod errors;
mod service;

pub mod config;
pub mod http;
pub mod openapi;
pub mod policy;
pub mod store;
pub mod validation;

pub use commands::{CreateCat, UpdateCat};
pub use entity::{Breed, BreedId, BreedMarker, Cat, CatId, CatMarker, CatRecord, EntityId, NewBreed};
pub use errors::{DomainError, DomainResult, StoreError};
pub use policy::{AllowAllBreeds, BreedSelectionPolicy, RetiredBreedsPolicy};
pub use service::CatService;
pub use store::{check_breed_catalog, seed_breeds_if_empty, CatStore, InMemoryCatStore, SqliteCatStore};
pub use validation::{ValidationErrors, Violation};
