//! Lifecycle operations against the in-memory store

use cattery::validation::{validate_create, validate_update};
use cattery::{
    Breed, BreedId, BreedSelectionPolicy, CatId, CatRecord, CatService, CreateCat, DomainError,
    InMemoryCatStore, NewBreed, UpdateCat,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn catalog() -> Vec<NewBreed> {
    vec![
        NewBreed::new("Munchkin", "Short legs and playful."),
        NewBreed::new("Siamese", "Known for their blue eyes."),
        NewBreed::new("Abyssinian", "Ticked coat and curious."),
        NewBreed::new("Persian", "Long hair and calm."),
    ]
}

fn setup() -> (InMemoryCatStore, CatService) {
    let store = InMemoryCatStore::with_breeds(catalog());
    let service = CatService::with_default_policy(Arc::new(store.clone()));
    (store, service)
}

fn create(name: &str, age: u16, breed_id: i64) -> CreateCat {
    CreateCat {
        name: name.to_string(),
        age,
        breed_id: BreedId::new(breed_id).unwrap(),
    }
}

fn update(id: i64, name: &str, age: u16, breed_id: i64) -> UpdateCat {
    UpdateCat {
        id: CatId::new(id).unwrap(),
        name: name.to_string(),
        age,
        breed_id: BreedId::new(breed_id).unwrap(),
    }
}

/// New cats get breeds of up to seven letters; on update the breed name must be shorter than the cat's
struct ShortBreedNames;

impl BreedSelectionPolicy for ShortBreedNames {
    fn can_select_for_create(&self, breed: &Breed) -> bool {
        breed.name.len() <= 7
    }

    fn can_select_for_update(&self, breed: &Breed, cat: &CatRecord) -> bool {
        breed.name.len() < cat.name.len()
    }
}

#[tokio::test]
async fn test_create_mochi_as_munchkin() {
    let (_, service) = setup();
    let command = validate_create(&json!({"name": "Mochi", "age": 1, "breedId": 1})).unwrap();

    let cat = service.create(command).await.unwrap();

    assert!(cat.id.get() > 0);
    assert_eq!(cat.name, "Mochi");
    assert_eq!(cat.age, 1);
    assert_eq!(cat.breed_id.get(), 1);
    assert_eq!(
        cat.breed,
        Breed {
            id: BreedId::new(1).unwrap(),
            name: "Munchkin".to_string(),
            description: "Short legs and playful.".to_string(),
        }
    );
    assert_eq!(service.find_one(cat.id).await.unwrap(), Some(cat));
}

#[tokio::test]
async fn test_create_with_missing_breed_persists_nothing() {
    let (store, service) = setup();

    let err = service.create(create("Ghost", 2, 77)).await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidBreedSelection { .. }));
    assert_eq!(store.cat_count().await, 0);
}

#[tokio::test]
async fn test_update_of_missing_cat_changes_nothing() {
    let (store, service) = setup();
    let kept = service.create(create("Kitty", 2, 2)).await.unwrap();

    let result = service.update(update(99, "Luna", 3, 1)).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(store.cat_count().await, 1);
    assert_eq!(service.find_one(kept.id).await.unwrap(), Some(kept));
}

#[tokio::test]
async fn test_update_replaces_every_field() {
    let (_, service) = setup();
    let cat = service.create(create("Kitty", 2, 2)).await.unwrap();

    let updated = service
        .update(update(cat.id.get(), "Tom", 5, 4))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, cat.id);
    assert_eq!(updated.name, "Tom");
    assert_eq!(updated.age, 5);
    assert_eq!(updated.breed.name, "Persian");
}

#[tokio::test]
async fn test_delete_twice() {
    let (_, service) = setup();
    let cat = service.create(create("Kitty", 2, 2)).await.unwrap();

    assert_eq!(service.delete(cat.id).await.unwrap(), Some(cat.clone()));
    assert_eq!(service.delete(cat.id).await.unwrap(), None);
    assert_eq!(service.find_one(cat.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_all_returns_every_cat() {
    let (_, service) = setup();
    service.create(create("Kitty", 2, 2)).await.unwrap();
    service.create(create("Mochi", 1, 1)).await.unwrap();

    let mut names: Vec<String> = service
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    names.sort();

    assert_eq!(names, vec!["Kitty".to_string(), "Mochi".to_string()]);
}

#[tokio::test]
async fn test_breed_options_for_update_of_missing_cat() {
    let (_, service) = setup();

    let err = service
        .breed_options_for_update(CatId::new(5).unwrap())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_custom_policy_sees_the_cat() {
    let store = InMemoryCatStore::with_breeds(catalog());
    let service = CatService::new(Arc::new(store), Arc::new(ShortBreedNames));

    // "Abyssinian" is too long for create
    let err = service.create(create("Kitty", 2, 3)).await.unwrap_err();
    assert!(err.is_validation_error());

    let cat = service.create(create("Bartholomew", 2, 2)).await.unwrap();
    let names: Vec<String> = service
        .breed_options_for_update(cat.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["Abyssinian", "Munchkin", "Persian", "Siamese"]);

    // The in-flight name decides, not the stored one
    let err = service
        .update(update(cat.id.get(), "Bo", 2, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidBreedSelection { .. }));
}

#[tokio::test]
async fn test_validation_gate_runs_before_the_service() {
    let errors = validate_update(
        CatId::new(1).unwrap(),
        &json!({"name": "a".repeat(300), "age": "old", "breedId": 1}),
    )
    .unwrap_err();

    assert_eq!(
        errors.messages(),
        vec![
            "name must be shorter than or equal to 255 characters".to_string(),
            "age must be an integer number".to_string(),
            "age must not be less than 1".to_string(),
            "age must not be greater than 9999".to_string(),
        ]
    );
}

fn is_sorted_by_name(breeds: &[Breed]) -> bool {
    breeds.windows(2).all(|w| w[0].name <= w[1].name)
}

proptest! {
    #[test]
    fn create_succeeds_exactly_for_known_breeds(breed_id in 1i64..8, age in 1u16..=9999) {
        tokio_test::block_on(async {
            let (store, service) = setup();
            let result = service.create(create("Whiskers", age, breed_id)).await;

            if breed_id <= catalog().len() as i64 {
                let cat = result.unwrap();
                prop_assert_eq!(cat.breed.id.get(), breed_id);
                prop_assert_eq!(cat.age, age);
                prop_assert_eq!(store.cat_count().await, 1);
            } else {
                let is_invalid = matches!(result, Err(DomainError::InvalidBreedSelection { .. }));
                prop_assert!(is_invalid);
                prop_assert_eq!(store.cat_count().await, 0);
            }
            Ok(())
        })?;
    }

    #[test]
    fn breed_options_are_sorted_subsets(names in proptest::collection::vec("[A-Za-z]{1,12}", 0..16)) {
        tokio_test::block_on(async {
            let breeds: Vec<NewBreed> = names.iter().map(|n| NewBreed::new(n.clone(), "desc")).collect();
            let total = breeds.len();
            let store = InMemoryCatStore::with_breeds(breeds);
            let service = CatService::new(Arc::new(store), Arc::new(ShortBreedNames));

            let options = service.breed_options_for_create().await.unwrap();
            prop_assert!(options.len() <= total);
            prop_assert!(is_sorted_by_name(&options));

            if total > 0 {
                let cat = service
                    .create(CreateCat {
                        name: "Cat".to_string(),
                        age: 1,
                        breed_id: BreedId::new(1).unwrap(),
                    })
                    .await;
                if let Ok(cat) = cat {
                    let options = service.breed_options_for_update(cat.id).await.unwrap();
                    prop_assert!(options.len() <= total);
                    prop_assert!(is_sorted_by_name(&options));
                }
            }
            Ok(())
        })?;
    }
}
