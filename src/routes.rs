//! Route table: one generic set of routes serves every discovered table.
//! Handlers resolve the table by name per request.

use crate::error::ApiError;
use crate::handlers::records::{create, delete as delete_record, list, read, update};
use crate::handlers::tables::list_tables;
use crate::state::AppState;
use axum::{http::Uri, routing::get, Router};

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn unknown_path(uri: Uri) -> ApiError {
    ApiError::UnknownTable(uri.path().to_string())
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_tables).fallback(method_not_allowed))
        .route(
            "/:table",
            get(list).post(create).fallback(method_not_allowed),
        )
        .route(
            "/:table/:id",
            get(read)
                .put(update)
                .delete(delete_record)
                .fallback(method_not_allowed),
        )
        .fallback(unknown_path)
        .with_state(state)
}
