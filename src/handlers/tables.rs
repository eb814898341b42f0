//! Table enumeration handler.

use crate::catalog;
use crate::error::ApiError;
use crate::response;
use crate::state::AppState;
use axum::extract::State;

pub async fn list_tables(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let names = catalog::list_tables(&state.pool).await?;
    Ok(response::tables(names))
}
