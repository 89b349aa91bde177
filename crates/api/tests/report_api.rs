//! HTTP-level tests for the per-user PDF report.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, create_user, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_for_unknown_user_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/report/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "User with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_with_missing_fonts_is_a_dependency_error(pool: PgPool) {
    let owner = create_user(&pool, "asha", Some("CSE")).await;
    let mut config = common::test_config();
    config.report_font_dir = Some("/definitely/not/a/font/dir".into());
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, &format!("/api/v1/report/{owner}")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "DEPENDENCY_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_renders_pdf_when_fonts_exist(pool: PgPool) {
    // Only meaningful on hosts with one of the searched font families.
    if records_api::report::render::load_fonts(None).is_err() {
        return;
    }
    let owner = create_user(&pool, "asha", Some("CSE")).await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/report/{owner}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert!(disposition.to_str().unwrap().starts_with("inline"));
}
