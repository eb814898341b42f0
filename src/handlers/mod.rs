//! HTTP handlers: thin glue from requests to catalog, coercion, and SQL.

pub mod records;
pub mod tables;
