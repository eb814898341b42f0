//! Shared application state. The pool is the only cross-request resource;
//! schema metadata is re-read per request, so nothing else is shared.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
