//! Record CRUD handlers: list, read, create, update, delete. Each request
//! re-describes its table, validates the input locally, then executes.

use crate::catalog;
use crate::coerce::validate_fields;
use crate::error::ApiError;
use crate::response;
use crate::service::RecordService;
use crate::sql::Page;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Row ids come from the URL path and must be well-formed 32-bit integers
/// before any SQL is built.
fn parse_id(id_str: &str) -> Result<i32, ApiError> {
    id_str.parse().map_err(|_| ApiError::InvalidId)
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(ApiError::BadBody),
    }
}

/// Offset and limit take effect only when present in the query string; a
/// value that does not parse as a non-negative integer falls back to the
/// default (0 for offset, 5 for limit).
fn parse_page(params: &HashMap<String, String>) -> Page {
    Page {
        offset: params
            .get("offset")
            .map(|v| v.parse().ok().filter(|n: &i32| *n >= 0).unwrap_or(0)),
        limit: params
            .get("limit")
            .map(|v| v.parse().ok().filter(|n: &i64| *n >= 0).unwrap_or(5)),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let table = catalog::describe_table(&state.pool, &table_name).await?;
    let records = RecordService::list(&state.pool, &table, parse_page(&params)).await?;
    Ok(response::records(records))
}

pub async fn read(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let table = catalog::describe_table(&state.pool, &table_name).await?;
    let record = RecordService::read(&state.pool, &table, id).await?;
    Ok(response::record(record))
}

pub async fn create(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let table = catalog::describe_table(&state.pool, &table_name).await?;
    let body = body_to_map(body)?;
    let fields = validate_fields(&table, &body)?;
    let id = RecordService::create(&state.pool, &table, &fields).await?;
    Ok(response::inserted(table.identity()?, id))
}

pub async fn update(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let table = catalog::describe_table(&state.pool, &table_name).await?;
    let body = body_to_map(body)?;
    let fields = validate_fields(&table, &body)?;
    let count = RecordService::update(&state.pool, &table, id, &fields).await?;
    Ok(response::updated(count))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let table = catalog::describe_table(&state.pool, &table_name).await?;
    let count = RecordService::delete(&state.pool, &table, id).await?;
    Ok(response::deleted(count))
}
