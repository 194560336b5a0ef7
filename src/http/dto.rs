// Copyright 2025 Cowboy AI, LLC.

//! Wire shapes of the cats API

use crate::entity::{Breed, Cat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A cat as returned by every cat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatResponse {
    /// The unique identifier of a cat
    pub id: i64,
    /// The name of a cat
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    /// The age of a cat
    #[schemars(range(min = 1, max = 9999))]
    pub age: u16,
    /// The breed id of a cat
    pub breed_id: i64,
    /// The breed of a cat
    pub breed: BreedResponse,
}

/// A catalog breed, inlined in cat responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BreedResponse {
    /// The unique identifier of a cat breed
    pub id: i64,
    /// The name of a cat breed
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    /// The description of a cat breed
    #[schemars(length(min = 1, max = 1000))]
    pub description: String,
}

/// One entry of a breed option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BreedOptionResponse {
    /// The unique identifier of a cat breed
    pub id: i64,
    /// The name of a cat breed
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
}

/// Body of `POST /cats`
///
/// Only used to describe the body; inbound JSON goes through
/// [`validate_create`](crate::validation::validate_create).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatRequest {
    /// The name of a cat
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    /// The age of a cat
    #[schemars(range(min = 1, max = 9999))]
    pub age: u16,
    /// The breed to attach
    #[schemars(range(min = 1))]
    pub breed_id: i64,
}

/// Body of `PUT /cats/{id}`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatRequest {
    /// The new name
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    /// The new age
    #[schemars(range(min = 1, max = 9999))]
    pub age: u16,
    /// The new breed
    #[schemars(range(min = 1))]
    pub breed_id: i64,
}

/// Body of `GET /healthz`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers
    pub status: String,
    /// RFC 3339 time of the answer
    pub timestamp: String,
}

impl From<Breed> for BreedResponse {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id.get(),
            name: breed.name,
            description: breed.description,
        }
    }
}

impl From<Breed> for BreedOptionResponse {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id.get(),
            name: breed.name,
        }
    }
}

impl From<Cat> for CatResponse {
    fn from(cat: Cat) -> Self {
        Self {
            id: cat.id.get(),
            name: cat.name,
            age: cat.age,
            breed_id: cat.breed_id.get(),
            breed: cat.breed.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BreedId, CatId};
    use serde_json::json;

    fn siamese() -> Breed {
        Breed {
            id: BreedId::new(2).unwrap(),
            name: "Siamese".to_string(),
            description: "Known for their blue eyes.".to_string(),
        }
    }

    #[test]
    fn test_breed_option_drops_description() {
        let option = BreedOptionResponse::from(siamese());
        assert_eq!(
            serde_json::to_value(option).unwrap(),
            json!({"id": 2, "name": "Siamese"})
        );
    }

    #[test]
    fn test_cat_response_shape() {
        let cat = Cat::new(CatId::new(1).unwrap(), "Kitty", 2, siamese());
        assert_eq!(
            serde_json::to_value(CatResponse::from(cat)).unwrap(),
            json!({
                "id": 1,
                "name": "Kitty",
                "age": 2,
                "breedId": 2,
                "breed": {"id": 2, "name": "Siamese", "description": "Known for their blue eyes."}
            })
        );
    }
}
