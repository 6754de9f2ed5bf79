//! Types and functions for storing and loading items from the database.

use crate::infra::{
    database::Tx,
    error::{ApiResult, ClientError},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::{instrument, Instrument};
use utoipa::ToSchema;

/// A new item.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// The item's name.
    #[schema(example = "Buy milk")]
    pub name: Option<String>,
    /// Whether the item has been completed. Defaults to false.
    #[serde(default)]
    pub is_complete: bool,
}

/// An existing item.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// The item's id.
    pub id: i32,
    /// The item's name.
    #[schema(example = "Buy milk")]
    pub name: Option<String>,
    /// Whether the item has been completed.
    pub is_complete: bool,
}

/// Creates a new item.
///
/// The id is assigned by the database and any id in the input is ignored.
#[instrument(skip(tx))]
pub async fn create_item(tx: &mut Tx, new_item: NewItem) -> ApiResult<Item> {
    tracing::info!("Creating item {:?}", new_item);
    let item = sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (name, is_complete)
        VALUES ($1, $2)
        RETURNING id, name, is_complete
        "#,
    )
    .bind(&new_item.name)
    .bind(new_item.is_complete)
    .fetch_one(tx.as_mut())
    .await?;
    tracing::info!("Created item {:?}", item);
    Ok(item)
}

/// Reads an item.
#[instrument(skip(tx))]
pub async fn fetch_item(tx: &mut Tx, id: i32) -> ApiResult<Option<Item>> {
    tracing::info!("Reading item");
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, is_complete FROM items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(tx.as_mut())
    .instrument(tracing::info_span!("fetch_optional"))
    .await?;
    tracing::info!("Found item: {:?}", item);
    Ok(item)
}

/// Updates an item.
///
/// Overwrites name and is_complete; the id never changes.
#[instrument(skip(tx))]
pub async fn update_item(tx: &mut Tx, id: i32, new_item: NewItem) -> ApiResult<Item> {
    tracing::info!("Updating item {:?}", new_item);
    let item = sqlx::query_as::<_, Item>(
        r#"
        UPDATE items
        SET name = $1, is_complete = $2
        WHERE id = $3
        RETURNING id, name, is_complete
        "#,
    )
    .bind(&new_item.name)
    .bind(new_item.is_complete)
    .bind(id)
    .fetch_one(tx.as_mut())
    .await?;
    tracing::info!("Updated item {:?}", item);
    Ok(item)
}

/// Deletes an item.
#[instrument(skip(tx))]
pub async fn delete_item(tx: &mut Tx, id: i32) -> ApiResult<()> {
    tracing::info!("Deleting item {:?}", id);
    let rows = sqlx::query(
        r#"
        DELETE FROM items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(tx.as_mut())
    .await?;

    if rows.rows_affected() == 0 {
        tracing::warn!("Item not found");
        return Err(ClientError::NotFound)?;
    }

    tracing::info!("Deleted item");

    Ok(())
}

/// Lists all items in insertion order.
#[instrument(skip(tx))]
pub async fn list_items(tx: &mut Tx) -> ApiResult<Vec<Item>> {
    tracing::info!("Listing items");
    let items = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, is_complete FROM items
        ORDER BY id
        "#,
    )
    .fetch_all(tx.as_mut())
    .instrument(tracing::info_span!("fetch_all"))
    .await?;
    tracing::info!("Listed {} items", items.len());
    Ok(items)
}
