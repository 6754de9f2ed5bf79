//! The HTTP API.

use axum::Router;

use crate::infra::state::AppState;

pub mod hello;
pub mod item;

/// Constructs the full REST API.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(hello::hello_api::routes())
        .merge(item::item_api::routes())
        .with_state(state)
}
