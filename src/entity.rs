// Copyright 2025 Cowboy AI, LLC.

//! Entity types with identity: cats and the breed catalog
//!
//! Ids are assigned by the store on insert and never change afterwards.
//! A cat references exactly one breed; the breed is joined in on every
//! read path and is not stored redundantly on the cat row.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A typed, store-assigned entity ID using phantom types for type safety
///
/// The raw value is always a positive integer. The phantom type parameter
/// keeps cat ids and breed ids from being mixed up at compile time.
///
/// # Examples
///
/// ```rust
/// use cattery::{BreedId, CatId};
///
/// let cat_id = CatId::new(7).unwrap();
/// assert_eq!(cat_id.get(), 7);
///
/// // Zero and negative values are never valid ids
/// assert!(BreedId::new(0).is_none());
/// assert!(BreedId::new(-3).is_none());
/// ```
pub struct EntityId<T> {
    id: i64,
    _phantom: PhantomData<T>,
}

impl<T> EntityId<T> {
    /// Wrap a raw id, rejecting zero and negative values
    pub fn new(id: i64) -> Option<Self> {
        (id > 0).then_some(Self {
            id,
            _phantom: PhantomData,
        })
    }

    /// Get the underlying integer
    pub fn get(self) -> i64 {
        self.id
    }
}

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.id)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<EntityId<T>> for i64 {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.id)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("id must be positive, got {raw}")))
    }
}

impl<T> JsonSchema for EntityId<T> {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "EntityId".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = <i64 as JsonSchema>::json_schema(gen).into_object();
        schema.number().minimum = Some(1.0);
        schema.into()
    }
}

/// Marker for cat ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatMarker;

/// Marker for breed ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreedMarker;

/// Identifier of a cat
pub type CatId = EntityId<CatMarker>;

/// Identifier of a breed
pub type BreedId = EntityId<BreedMarker>;

/// A cat breed catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Breed {
    /// The unique identifier of the breed
    pub id: BreedId,
    /// Display name, also the sort key of option lists
    pub name: String,
    /// Free-text description
    pub description: String,
}

/// A breed that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewBreed {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
}

impl NewBreed {
    /// Create a new breed definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The stored columns of a cat, without the joined breed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatRecord {
    /// The unique identifier of the cat
    pub id: CatId,
    /// Name of the cat
    pub name: String,
    /// Age of the cat
    pub age: u16,
    /// Foreign key to the breed catalog
    pub breed_id: BreedId,
}

/// A cat with its breed resolved
///
/// # Examples
///
/// ```rust
/// use cattery::{Breed, BreedId, Cat, CatId};
///
/// let breed = Breed {
///     id: BreedId::new(1).unwrap(),
///     name: "Munchkin".to_string(),
///     description: "Short legs and playful.".to_string(),
/// };
/// let cat = Cat::new(CatId::new(5).unwrap(), "Mochi", 1, breed);
///
/// assert_eq!(cat.breed_id, cat.breed.id);
/// assert_eq!(cat.record().name, "Mochi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    /// The unique identifier of the cat
    pub id: CatId,
    /// Name of the cat
    pub name: String,
    /// Age of the cat
    pub age: u16,
    /// Foreign key to the breed catalog
    pub breed_id: BreedId,
    /// The breed referenced by `breed_id`
    pub breed: Breed,
}

impl Cat {
    /// Build a cat whose `breed_id` is taken from the joined breed
    pub fn new(id: CatId, name: impl Into<String>, age: u16, breed: Breed) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            breed_id: breed.id,
            breed,
        }
    }

    /// The stored columns of this cat
    pub fn record(&self) -> CatRecord {
        CatRecord {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            breed_id: self.breed_id,
        }
    }
}
