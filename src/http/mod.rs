// Copyright 2025 Cowboy AI, LLC.

//! # HTTP boundary
//!
//! JSON over HTTP on top of [`CatService`]:
//!
//! | Route | Method | Success |
//! |---|---|---|
//! | `/cats` | `GET` | 200, every cat |
//! | `/cats` | `POST` | 201, created cat |
//! | `/cats/breed-options` | `GET` | 200, breeds selectable for a new cat |
//! | `/cats/{id}` | `GET`, `PUT`, `DELETE` | 200, the cat |
//! | `/cats/{id}/breed-options` | `GET` | 200, breeds selectable for that cat |
//! | `/healthz` | `GET` | 200 |
//! | `/openapi.json` | `GET` | 200, OpenAPI 3 document |
//!
//! Failures are `{statusCode, error, message}` bodies; see [`response`].

pub mod dto;
mod handlers;
pub mod response;
mod request_tracing;

use crate::service::CatService;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

/// Shared state of every handler
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle operations
    pub service: CatService,
}

impl AppState {
    /// Wrap a service
    pub fn new(service: CatService) -> Self {
        Self { service }
    }
}

/// Build the router with request tracing applied to every route
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/openapi.json", get(handlers::openapi_document))
        .route("/cats", get(handlers::find_all).post(handlers::create))
        .route(
            "/cats/breed-options",
            get(handlers::breed_options_for_create),
        )
        .route(
            "/cats/:id",
            get(handlers::find_one)
                .put(handlers::update)
                .delete(handlers::remove),
        )
        .route(
            "/cats/:id/breed-options",
            get(handlers::breed_options_for_update),
        )
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .with_state(state)
}
