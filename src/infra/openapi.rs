//! OpenAPI configuration.

use crate::api::hello::hello_api;
use crate::api::item::{item_api, item_repository};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API"),
    paths(
        hello_api::hello,
        item_api::list_items,
        item_api::create_item,
        item_api::update_item,
        item_api::delete_item,
    ),
    components(
        schemas(
            item_repository::NewItem,
            item_repository::Item,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
