//! REST API implementation.
//!
//! # Examples
//!
//! Saying hello.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = todo_api::app::spawn_app().await;
//! let response = reqwest::get(format!("{}/", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!("hello world!", response.text().await.unwrap());
//! # });
//! ```

use crate::infra::config::Config;
use crate::infra::database::DbPool;
use crate::infra::error::PanicHandler;
use crate::infra::middleware::MakeRequestIdSpan;
use crate::infra::openapi::ApiDoc;
use crate::infra::state::AppState;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()))
        .merge(crate::api::api(state))
        // Layers
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            crate::infra::middleware::log_request_response,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server.
pub async fn run_app(addr: TcpListener, db: PgPool, config: Config) -> Result<(), hyper::Error> {
    let state = AppState::new(db, config.database.retry);
    let app = app(state).into_make_service();

    tracing::info!("Starting axum on {}", addr.local_addr().unwrap());
    let exit_result = axum::serve(addr, app)
        .with_graceful_shutdown(crate::infra::shutdown::shutdown_signal())
        .await;

    match exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    Ok(())
}

/// Spawn a server on a random port.
pub async fn spawn_app() -> String {
    let config = crate::infra::config::load_config().unwrap();
    let db = crate::infra::database::init_db(&config.database);
    spawn_app_with_db(db).await
}

/// Spawn a server on a random port with a custom database.
pub async fn spawn_app_with_db(db: DbPool) -> String {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = crate::infra::config::load_config().unwrap();
    tokio::spawn(run_app(listener, db, config));
    format!("http://{address}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::item::item_repository::Item,
        infra::{database::DbPool, error::ErrorBody},
    };
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(db: DbPool) -> Router {
        let config = crate::infra::config::load_config().unwrap();
        let state = AppState::new(db, config.database.retry);
        app(state)
    }

    #[sqlx::test]
    async fn item_lifecycle_via_http(db: DbPool) {
        let url = spawn_app_with_db(db).await;
        let client = reqwest::ClientBuilder::default().build().unwrap();

        // Create an item
        let response = client
            .post(format!("{url}/items"))
            .json(&serde_json::json!({"name": "Buy milk", "isComplete": false}))
            .send()
            .await
            .unwrap();
        assert_eq!(201, response.status());
        assert_eq!("/items/1", response.headers()["location"]);
        let item: Item = response.json().await.unwrap();
        assert_eq!(
            Item {
                id: 1,
                name: Some("Buy milk".to_string()),
                is_complete: false,
            },
            item,
        );

        // It shows up in the list
        let items: Vec<Item> = client
            .get(format!("{url}/items"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(vec![item], items);

        // Complete it
        let response = client
            .put(format!("{url}/items/1"))
            .json(&serde_json::json!({"name": "Buy milk", "isComplete": true}))
            .send()
            .await
            .unwrap();
        assert_eq!(200, response.status());
        let item: Item = response.json().await.unwrap();
        assert_eq!(
            Item {
                id: 1,
                name: Some("Buy milk".to_string()),
                is_complete: true,
            },
            item,
        );

        // Delete it
        let response = client
            .delete(format!("{url}/items/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(204, response.status());

        // The list is empty again
        let items: Vec<Item> = client
            .get(format!("{url}/items"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(items.is_empty());

        // Deleting it again is a 404 with an empty body
        let response = client
            .delete(format!("{url}/items/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(404, response.status());
        assert_eq!("", response.text().await.unwrap());
    }

    #[sqlx::test]
    async fn create_defaults_to_incomplete(db: DbPool) {
        let url = spawn_app_with_db(db).await;
        let client = reqwest::ClientBuilder::default().build().unwrap();
        let response = client
            .post(format!("{url}/items"))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(201, response.status());
        let item: Item = response.json().await.unwrap();
        assert_eq!(
            Item {
                id: 1,
                name: None,
                is_complete: false,
            },
            item,
        );
    }

    #[sqlx::test]
    async fn client_supplied_ids_are_ignored(db: DbPool) {
        let url = spawn_app_with_db(db).await;
        let client = reqwest::ClientBuilder::default().build().unwrap();
        let response = client
            .post(format!("{url}/items"))
            .json(&serde_json::json!({"id": 999, "name": "x", "isComplete": false}))
            .send()
            .await
            .unwrap();
        assert_eq!(201, response.status());
        let item: Item = response.json().await.unwrap();
        assert_eq!(1, item.id);
    }

    #[sqlx::test]
    async fn updating_a_missing_item_gives_404(db: DbPool) {
        let url = spawn_app_with_db(db).await;
        let client = reqwest::ClientBuilder::default().build().unwrap();
        let response = client
            .put(format!("{url}/items/999"))
            .json(&serde_json::json!({"name": "ghost", "isComplete": false}))
            .send()
            .await
            .unwrap();
        assert_eq!(404, response.status());
        assert_eq!("", response.text().await.unwrap());
    }

    #[sqlx::test]
    async fn hello_oneshot(db: DbPool) {
        let app = test_app(db);
        let req = Request::get("/").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!("hello world!", body);
    }

    #[sqlx::test]
    async fn malformed_payload_gives_400(db: DbPool) {
        let app = test_app(db);
        let req = Request::post("/items")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let body = res.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(!body.message().is_empty());
    }

    #[sqlx::test]
    async fn missing_content_type_gives_400(db: DbPool) {
        let app = test_app(db);
        let req = Request::post("/items")
            .body(Body::from(r#"{"name": "x"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[sqlx::test]
    async fn non_numeric_id_gives_400(db: DbPool) {
        let app = test_app(db);
        let req = Request::delete("/items/abc").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[sqlx::test]
    async fn preflight_requests_are_allowed(db: DbPool) {
        let app = test_app(db);
        let req = Request::options("/items")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("*", res.headers()["access-control-allow-origin"]);
    }

    #[sqlx::test]
    async fn swagger_ui_oneshot(db: DbPool) {
        let app = test_app(db);
        let req = Request::get("/swagger-ui/index.html")
            .body(Body::empty())
            .unwrap();
        let result = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, result.status())
    }

    #[sqlx::test]
    async fn openapi_json_oneshot(db: DbPool) {
        let app = test_app(db);
        let req = Request::get("/openapi.json").body(Body::empty()).unwrap();
        let result = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, result.status())
    }
}
