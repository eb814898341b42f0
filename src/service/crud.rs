//! Generic record execution against PostgreSQL. One pooled connection per
//! statement; any database error surfaces immediately, no retries.

use crate::catalog::TableDescriptor;
use crate::coerce::record_from_row;
use crate::error::ApiError;
use crate::sql::{self, Page, QueryBuf, SqlParam};
use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::{PgPool, Row};

pub struct RecordService;

impl RecordService {
    /// List records, optionally filtered past an identity offset and capped.
    pub async fn list(
        pool: &PgPool,
        table: &TableDescriptor,
        page: Page,
    ) -> Result<Vec<Value>, ApiError> {
        let q = sql::select_all(table, page)?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = Self::query(&q).fetch_all(pool).await.map_err(ApiError::Dml)?;
        rows.iter().map(|row| record_from_row(table, row)).collect()
    }

    /// Fetch one record by identity value. Zero rows is a not-found, not a
    /// server error.
    pub async fn read(
        pool: &PgPool,
        table: &TableDescriptor,
        id: i32,
    ) -> Result<Value, ApiError> {
        let q = sql::select_by_id(table, id)?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = Self::query(&q)
            .fetch_optional(pool)
            .await
            .map_err(ApiError::Dml)?;
        match row {
            Some(row) => record_from_row(table, &row),
            None => Err(ApiError::RecordNotFound),
        }
    }

    /// Insert one record from a validated field set; returns the generated
    /// identity value.
    pub async fn create(
        pool: &PgPool,
        table: &TableDescriptor,
        fields: &[(String, SqlParam)],
    ) -> Result<i32, ApiError> {
        let q = sql::insert(table, fields)?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = Self::query(&q).fetch_one(pool).await.map_err(ApiError::Dml)?;
        row.try_get(0).map_err(ApiError::Dml)
    }

    /// Update one record by identity value; returns the affected-row count.
    /// Zero means "id not found" and is not an error.
    pub async fn update(
        pool: &PgPool,
        table: &TableDescriptor,
        id: i32,
        fields: &[(String, SqlParam)],
    ) -> Result<u64, ApiError> {
        let Some(q) = sql::update(table, id, fields)? else {
            return Ok(0);
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = Self::query(&q).execute(pool).await.map_err(ApiError::Dml)?;
        Ok(result.rows_affected())
    }

    /// Delete one record by identity value; returns the affected-row count.
    pub async fn delete(
        pool: &PgPool,
        table: &TableDescriptor,
        id: i32,
    ) -> Result<u64, ApiError> {
        let q = sql::delete(table, id)?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = Self::query(&q).execute(pool).await.map_err(ApiError::Dml)?;
        Ok(result.rows_affected())
    }

    fn query(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = sql::bind(query, p);
        }
        query
    }
}
