// Copyright 2025 Cowboy AI, LLC.

//! OpenAPI 3 description of the HTTP API
//!
//! Component schemas come from the `schemars` derives on the wire types, so
//! the document cannot drift from what the handlers serialize.

use crate::http::dto::{
    BreedOptionResponse, CatResponse, CreateCatRequest, HealthResponse, UpdateCatRequest,
};
use crate::http::response::ErrorResponse;
use schemars::gen::SchemaSettings;
use schemars::schema::Schema;
use serde_json::{json, Value};

/// Document title
pub const TITLE: &str = "Cats example";

/// Document version
pub const VERSION: &str = "1.0";

fn json_content(schema: &Schema) -> Value {
    json!({"application/json": {"schema": schema}})
}

fn response(description: &str, schema: &Schema) -> Value {
    json!({"description": description, "content": json_content(schema)})
}

fn array_of(schema: &Schema) -> Value {
    json!({"type": "array", "items": schema})
}

/// Build the OpenAPI document
pub fn document() -> Value {
    let mut generator = SchemaSettings::openapi3().into_generator();
    let cat = generator.subschema_for::<CatResponse>();
    let option = generator.subschema_for::<BreedOptionResponse>();
    let create = generator.subschema_for::<CreateCatRequest>();
    let update = generator.subschema_for::<UpdateCatRequest>();
    let health = generator.subschema_for::<HealthResponse>();
    let error = generator.subschema_for::<ErrorResponse>();
    let schemas = generator.take_definitions();

    let id_parameter = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": {"type": "integer"}
    });
    let invalid_id = response("Invalid ID supplied", &error);
    let not_found = response("Cat not found", &error);
    let cat_list = json!({
        "description": "Cat found",
        "content": {"application/json": {"schema": array_of(&cat)}}
    });
    let option_list = json!({
        "description": "Selectable breeds",
        "content": {"application/json": {"schema": array_of(&option)}}
    });

    let cats = json!({
        "get": {"operationId": "listCats", "responses": {"200": cat_list}},
        "post": {
            "operationId": "createCat",
            "requestBody": {"required": true, "content": json_content(&create)},
            "responses": {
                "201": response("Cat created", &cat),
                "400": response("Invalid input", &error)
            }
        }
    });
    let create_options = json!({
        "get": {"operationId": "listBreedOptionsForCreate", "responses": {"200": option_list.clone()}}
    });
    let cat_by_id = json!({
        "get": {
            "operationId": "getCat",
            "parameters": [id_parameter.clone()],
            "responses": {"200": response("Cat found", &cat), "400": invalid_id.clone(), "404": not_found.clone()}
        },
        "put": {
            "operationId": "updateCat",
            "parameters": [id_parameter.clone()],
            "requestBody": {"required": true, "content": json_content(&update)},
            "responses": {"200": response("Cat updated", &cat), "400": invalid_id.clone(), "404": not_found.clone()}
        },
        "delete": {
            "operationId": "deleteCat",
            "parameters": [id_parameter.clone()],
            "responses": {"200": response("Cat deleted", &cat), "400": invalid_id.clone(), "404": not_found.clone()}
        }
    });
    let update_options = json!({
        "get": {
            "operationId": "listBreedOptionsForUpdate",
            "parameters": [id_parameter],
            "responses": {"200": option_list, "400": invalid_id, "404": not_found}
        }
    });
    let healthz = json!({
        "get": {"operationId": "healthz", "responses": {"200": response("Service is up", &health)}}
    });

    json!({
        "openapi": "3.0.0",
        "info": {"title": TITLE, "version": VERSION},
        "paths": {
            "/cats": cats,
            "/cats/breed-options": create_options,
            "/cats/{id}": cat_by_id,
            "/cats/{id}/breed-options": update_options,
            "/healthz": healthz
        },
        "components": {"schemas": schemas}
    })
}
