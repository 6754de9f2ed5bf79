//! Implementation of the greeting API. Useful for checking that the
//! service is up without touching the database.

use crate::infra::state::AppState;
use axum::{routing::get, Router};
use tracing::instrument;

/// The hello API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(hello))
}

/// A handler for requests to the root endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Success", body = String, content_type = "text/plain"),
    )
)]
#[instrument]
pub async fn hello() -> &'static str {
    tracing::debug!("Saying hello");
    "hello world!"
}
