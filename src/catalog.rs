//! Schema catalog: enumerates tables and derives typed column descriptors
//! from information_schema. Metadata is read fresh on every request, so there
//! is no cache and no invalidation.

use crate::error::ApiError;
use sqlx::PgPool;

/// Semantic type of a column, resolved once during table description.
/// Dispatch everywhere else is a match over this tag. Columns of any other
/// SQL type are absent from the descriptor and invisible to reads, writes,
/// and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    NullableText,
    Int,
    NullableInt,
}

impl ColumnKind {
    pub fn is_nullable(self) -> bool {
        matches!(self, ColumnKind::NullableText | ColumnKind::NullableInt)
    }

    pub fn is_int(self) -> bool {
        matches!(self, ColumnKind::Int | ColumnKind::NullableInt)
    }
}

#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
}

#[derive(Clone, Debug)]
pub struct TableDescriptor {
    pub table_name: String,
    /// Represented columns in ordinal order.
    pub columns: Vec<ColumnDescriptor>,
    /// First integer column in ordinal order, used as the implicit primary
    /// key for by-id operations. Not necessarily a declared PK constraint;
    /// None when the table has no integer column.
    pub identity: Option<String>,
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Identity column name, or a server error when the table has none;
    /// by-id reads, writes, and keyset paging all require it.
    pub fn identity(&self) -> Result<&str, ApiError> {
        self.identity
            .as_deref()
            .ok_or_else(|| ApiError::NoIdentity(self.table_name.clone()))
    }
}

/// Schema searched for tables. From env `DBGATE_SCHEMA`, default `public`.
pub fn api_schema() -> String {
    std::env::var("DBGATE_SCHEMA").unwrap_or_else(|_| "public".into())
}

/// All base table names in the configured schema, sorted.
pub async fn list_tables(pool: &PgPool) -> Result<Vec<String>, ApiError> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = $1 AND table_type = 'BASE TABLE' ORDER BY table_name",
    )
    .bind(api_schema())
    .fetch_all(pool)
    .await
    .map_err(ApiError::Connectivity)?;
    Ok(names)
}

/// Describe one table: typed columns plus the identity column. A name with no
/// column metadata is an unknown table (404), not a server error.
pub async fn describe_table(pool: &PgPool, name: &str) -> Result<TableDescriptor, ApiError> {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
         WHERE table_schema = $1 AND table_name = $2 ORDER BY ordinal_position",
    )
    .bind(api_schema())
    .bind(name)
    .fetch_all(pool)
    .await
    .map_err(ApiError::Schema)?;

    if rows.is_empty() {
        return Err(ApiError::UnknownTable(name.to_string()));
    }
    Ok(build_descriptor(name, rows))
}

/// Map one information_schema column to a kind. Types outside the supported
/// short-text / 32-bit-integer surface map to None and are omitted.
fn map_kind(data_type: &str, nullable: bool) -> Option<ColumnKind> {
    match data_type {
        "text" | "character varying" => Some(if nullable {
            ColumnKind::NullableText
        } else {
            ColumnKind::Text
        }),
        "integer" => Some(if nullable {
            ColumnKind::NullableInt
        } else {
            ColumnKind::Int
        }),
        _ => None,
    }
}

fn build_descriptor(name: &str, rows: Vec<(String, String, String)>) -> TableDescriptor {
    let mut columns = Vec::new();
    let mut identity = None;
    for (column_name, data_type, is_nullable) in rows {
        let nullable = is_nullable == "YES";
        let Some(kind) = map_kind(&data_type, nullable) else {
            continue;
        };
        if identity.is_none() && kind.is_int() {
            identity = Some(column_name.clone());
        }
        columns.push(ColumnDescriptor { name: column_name, kind });
    }
    TableDescriptor {
        table_name: name.to_string(),
        columns,
        identity,
    }
}
