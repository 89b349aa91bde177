//! Handler for the per-user PDF report.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use records_core::error::CoreError;
use records_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::report::{self, render};
use crate::state::AppState;

/// GET /api/v1/report/{user_id}
///
/// Responds with an inline `application/pdf` of every approved record the
/// user owns. Rendering runs on the blocking pool.
pub async fn download(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Response> {
    let bundle = report::load_bundle(&state.pool, user_id).await?;
    let record_count = bundle.record_count();
    let font_dir = state.config.report_font_dir.clone();

    let bytes = tokio::task::spawn_blocking(move || render::render(&bundle, font_dir.as_deref()))
        .await
        .map_err(|e| AppError::InternalError(format!("Report task failed: {e}")))?
        .map_err(|e| AppError::Core(CoreError::Dependency(e.to_string())))?;

    tracing::info!(user_id, record_count, size = bytes.len(), "Report rendered");

    let disposition = format!("inline; filename=\"activity-report-{user_id}.pdf\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
