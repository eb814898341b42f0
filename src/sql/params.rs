//! Bind parameters for dynamically built statements.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound into a built statement. Nulls stay typed so nullable text
/// and nullable integer columns bind with the correct parameter type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    NullText,
    NullInt,
}

/// Attach one parameter to a query with its native sqlx binding.
pub fn bind<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q SqlParam,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        SqlParam::Text(s) => query.bind(s.as_str()),
        SqlParam::Int(n) => query.bind(*n),
        SqlParam::NullText => query.bind(None::<&str>),
        SqlParam::NullInt => query.bind(None::<i32>),
    }
}
