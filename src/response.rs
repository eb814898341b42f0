//! Standard response envelope: every success body is wrapped in
//! `{"response": ...}`, every error in `{"error": "..."}` (see error.rs).

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TableList {
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct RecordList {
    pub records: Vec<Value>,
}

#[derive(Serialize)]
pub struct SingleRecord {
    pub record: Value,
}

#[derive(Serialize)]
pub struct Updated {
    pub updated: u64,
}

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

pub fn tables(names: Vec<String>) -> (StatusCode, Json<Envelope<TableList>>) {
    (StatusCode::OK, Json(Envelope { response: TableList { tables: names } }))
}

pub fn records(records: Vec<Value>) -> (StatusCode, Json<Envelope<RecordList>>) {
    (StatusCode::OK, Json(Envelope { response: RecordList { records } }))
}

pub fn record(record: Value) -> (StatusCode, Json<Envelope<SingleRecord>>) {
    (StatusCode::OK, Json(Envelope { response: SingleRecord { record } }))
}

/// Insert result: the identity column name mapped to the generated id.
pub fn inserted(identity: &str, id: i32) -> (StatusCode, Json<Envelope<Value>>) {
    (StatusCode::OK, Json(Envelope { response: serde_json::json!({ identity: id }) }))
}

pub fn updated(count: u64) -> (StatusCode, Json<Envelope<Updated>>) {
    (StatusCode::OK, Json(Envelope { response: Updated { updated: count } }))
}

pub fn deleted(count: u64) -> (StatusCode, Json<Envelope<Deleted>>) {
    (StatusCode::OK, Json(Envelope { response: Deleted { deleted: count } }))
}
