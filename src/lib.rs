//! dbgate: generic REST API over a runtime-discovered PostgreSQL schema.

pub mod catalog;
pub mod coerce;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use catalog::{ColumnDescriptor, ColumnKind, TableDescriptor};
pub use error::ApiError;
pub use routes::api_routes;
pub use service::RecordService;
pub use state::AppState;
