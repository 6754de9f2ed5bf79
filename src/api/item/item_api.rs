//! The item API implementation.

use crate::{
    api::item::{
        item_repository::{Item, NewItem},
        item_service,
    },
    infra::{
        error::{ApiResult, ClientError, ErrorBody},
        extract::{Json, Path},
        state::AppState,
    },
};
use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::instrument;

/// The item API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", put(update_item).delete(delete_item))
}

/// Creates a new item.
#[utoipa::path(
    post,
    path = "/items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Created", body = Item,
            headers(("Location" = String, description = "The URI of the created item"))),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn create_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewItem>,
) -> ApiResult<(StatusCode, HeaderMap, Json<Item>)> {
    let mut tx = state.begin_tx().await?;
    let item = item_service::create_item(&mut tx, new_item).await?;
    tx.commit().await?;
    let mut hm = HeaderMap::new();
    hm.append(
        HeaderName::from_static("location"),
        HeaderValue::from_str(&format!("/items/{}", item.id)).expect("invalid location"),
    );
    Ok((StatusCode::CREATED, hm, Json(item)))
}

/// Updates an item.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "The id of the item to update")),
    request_body = NewItem,
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn update_item(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(new_item): Json<NewItem>,
) -> ApiResult<Json<Item>> {
    let mut tx = state.begin_tx().await?;
    let item = item_service::update_item(&mut tx, id, new_item)
        .await?
        .ok_or(ClientError::NotFound)?;
    tx.commit().await?;
    Ok(Json(item))
}

/// Deletes an item.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i32, Path, description = "The id of the item to delete")),
    responses(
        (status = 204, description = "No Content"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn delete_item(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> ApiResult<StatusCode> {
    let mut tx = state.begin_tx().await?;
    item_service::delete_item(&mut tx, id)
        .await?
        .ok_or(ClientError::NotFound)?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists all items.
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Success", body = [Item]),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let mut tx = state.begin_tx().await?;
    let items = item_service::list_items(&mut tx).await?;
    tx.commit().await?;
    Ok(Json(items))
}
