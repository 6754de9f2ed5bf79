//! A service for interacting with items.
//!
//! Mutating operations look the item up by id first, so a missing id is
//! reported before any write is attempted.

use crate::{
    api::item::item_repository::{self, Item, NewItem},
    infra::{database::Tx, error::ApiResult},
};
use tracing::instrument;

/// Creates a new item.
#[instrument(skip(tx))]
pub async fn create_item(tx: &mut Tx, new_item: NewItem) -> ApiResult<Item> {
    item_repository::create_item(tx, new_item).await
}

/// Updates an item, or returns [`None`] if it does not exist.
#[instrument(skip(tx))]
pub async fn update_item(tx: &mut Tx, id: i32, new_item: NewItem) -> ApiResult<Option<Item>> {
    if item_repository::fetch_item(tx, id).await?.is_none() {
        return Ok(None);
    }
    let item = item_repository::update_item(tx, id, new_item).await?;
    Ok(Some(item))
}

/// Deletes an item, or returns [`None`] if it does not exist.
#[instrument(skip(tx))]
pub async fn delete_item(tx: &mut Tx, id: i32) -> ApiResult<Option<()>> {
    if item_repository::fetch_item(tx, id).await?.is_none() {
        return Ok(None);
    }
    item_repository::delete_item(tx, id).await?;
    Ok(Some(()))
}

/// Lists all items.
#[instrument(skip(tx))]
pub async fn list_items(tx: &mut Tx) -> ApiResult<Vec<Item>> {
    item_repository::list_items(tx).await
}
