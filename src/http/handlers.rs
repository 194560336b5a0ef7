// Copyright 2025 Cowboy AI, LLC.

use super::dto::{BreedOptionResponse, CatResponse, HealthResponse};
use super::response::ApiError;
use super::AppState;
use crate::entity::{Breed, CatId};
use crate::errors::DomainError;
use crate::openapi;
use crate::validation::{validate_create, validate_update};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

type ApiResult<T> = Result<T, ApiError>;

/// Parse a path id the way the route contract demands: optional minus sign, then digits
///
/// Anything else is a 400. Zero and negative ids parse fine and are
/// treated as ids that no cat can have.
pub(crate) fn parse_path_id(raw: &str) -> ApiResult<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::bad_request(
            "Validation failed (numeric string is expected)",
        ));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request("Validation failed (numeric string is expected)"))
}

fn options(breeds: Vec<Breed>) -> Json<Vec<BreedOptionResponse>> {
    Json(breeds.into_iter().map(Into::into).collect())
}

pub(crate) async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub(crate) async fn openapi_document() -> Json<Value> {
    Json(openapi::document())
}

pub(crate) async fn find_all(State(state): State<AppState>) -> ApiResult<Json<Vec<CatResponse>>> {
    let cats = state.service.find_all().await?;
    Ok(Json(cats.into_iter().map(Into::into).collect()))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CatResponse>)> {
    let Json(body) = body?;
    let command = validate_create(&body).map_err(DomainError::from)?;
    let cat = state.service.create(command).await?;
    Ok((StatusCode::CREATED, Json(cat.into())))
}

pub(crate) async fn find_one(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<CatResponse>> {
    let cat = match CatId::new(parse_path_id(&raw_id)?) {
        Some(id) => state.service.find_one(id).await?,
        None => None,
    };
    cat.map(|cat| Json(cat.into())).ok_or_else(ApiError::cat_not_found)
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CatResponse>> {
    let raw_id = parse_path_id(&raw_id)?;
    let Json(body) = body?;
    let Some(id) = CatId::new(raw_id) else {
        // The body is still judged first so bad input reports as 400.
        validate_create(&body).map_err(DomainError::from)?;
        return Err(ApiError::cat_not_found());
    };

    let command = validate_update(id, &body).map_err(DomainError::from)?;
    state
        .service
        .update(command)
        .await?
        .map(|cat| Json(cat.into()))
        .ok_or_else(ApiError::cat_not_found)
}

pub(crate) async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<CatResponse>> {
    let cat = match CatId::new(parse_path_id(&raw_id)?) {
        Some(id) => state.service.delete(id).await?,
        None => None,
    };
    cat.map(|cat| Json(cat.into())).ok_or_else(ApiError::cat_not_found)
}

pub(crate) async fn breed_options_for_create(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BreedOptionResponse>>> {
    Ok(options(state.service.breed_options_for_create().await?))
}

pub(crate) async fn breed_options_for_update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<BreedOptionResponse>>> {
    let id = CatId::new(parse_path_id(&raw_id)?).ok_or_else(ApiError::cat_not_found)?;
    Ok(options(state.service.breed_options_for_update(id).await?))
}
