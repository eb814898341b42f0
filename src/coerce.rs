//! Bridges SQL values and JSON in both directions: row decoding with NULL
//! collapsing on the way out, field validation against column kinds on the
//! way in. Every write is validated here before any SQL text exists.

use crate::catalog::{ColumnKind, TableDescriptor};
use crate::error::ApiError;
use crate::sql::SqlParam;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// Decode one row into a JSON record. Nullable kinds collapse SQL NULL to
/// JSON null; non-nullable kinds decode the bare value.
pub fn record_from_row(table: &TableDescriptor, row: &PgRow) -> Result<Value, ApiError> {
    let mut record = Map::new();
    for col in &table.columns {
        let name = col.name.as_str();
        let value = match col.kind {
            ColumnKind::Text => {
                Value::String(row.try_get::<String, _>(name).map_err(ApiError::Dml)?)
            }
            ColumnKind::NullableText => {
                match row.try_get::<Option<String>, _>(name).map_err(ApiError::Dml)? {
                    Some(s) => Value::String(s),
                    None => Value::Null,
                }
            }
            ColumnKind::Int => {
                Value::Number(row.try_get::<i32, _>(name).map_err(ApiError::Dml)?.into())
            }
            ColumnKind::NullableInt => {
                match row.try_get::<Option<i32>, _>(name).map_err(ApiError::Dml)? {
                    Some(n) => Value::Number(n.into()),
                    None => Value::Null,
                }
            }
        };
        record.insert(col.name.clone(), value);
    }
    Ok(Value::Object(record))
}

/// Validate a request body against the table's column kinds and convert it to
/// bind parameters, in descriptor order so built statements are
/// deterministic. Keys that name no represented column are dropped before any
/// SQL is constructed, on insert and update alike.
///
/// There is no numeric write path: reads return integers, but a JSON number
/// is rejected for every column kind.
pub fn validate_fields(
    table: &TableDescriptor,
    body: &Map<String, Value>,
) -> Result<Vec<(String, SqlParam)>, ApiError> {
    let mut fields = Vec::new();
    for col in &table.columns {
        let Some(value) = body.get(&col.name) else {
            continue;
        };
        match value {
            Value::String(s) => match col.kind {
                ColumnKind::Text | ColumnKind::NullableText => {
                    fields.push((col.name.clone(), SqlParam::Text(s.clone())));
                }
                _ => return Err(ApiError::InvalidFieldType(col.name.clone())),
            },
            Value::Null => match col.kind {
                ColumnKind::NullableText => fields.push((col.name.clone(), SqlParam::NullText)),
                ColumnKind::NullableInt => fields.push((col.name.clone(), SqlParam::NullInt)),
                _ => return Err(ApiError::InvalidFieldType(col.name.clone())),
            },
            Value::Number(_) => return Err(ApiError::InvalidFieldType(col.name.clone())),
            other => {
                tracing::debug!(column = %col.name, value = ?other, "skipping field of unsupported JSON type");
            }
        }
    }
    Ok(fields)
}
