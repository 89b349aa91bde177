#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use records_api::config::ServerConfig;
use records_api::router::build_app_router;
use records_api::state::AppState;
use records_db::models::user::CreateUser;
use records_db::repositories::UserRepo;
use records_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        report_font_dir: None,
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool).0
}

/// Like [`build_test_app`], but also hands back the event bus so tests can
/// subscribe to the workflow events a request publishes.
pub fn build_test_app_with_bus(pool: PgPool) -> (Router, Arc<EventBus>) {
    build_app_parts(pool, test_config())
}

/// Build the router over a custom configuration.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_parts(pool, config).0
}

fn build_app_parts(pool: PgPool, config: ServerConfig) -> (Router, Arc<EventBus>) {
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    (build_app_router(state, &config), event_bus)
}

/// Insert a user and return its id. `department` is an acronym such as `CSE`.
pub async fn create_user(pool: &PgPool, username: &str, department: Option<&str>) -> i64 {
    let department_id = match department {
        Some(acronym) => UserRepo::department_id_by_acronym(pool, acronym).await.unwrap(),
        None => None,
    };
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@x.edu"),
            role: None,
            department_id,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
