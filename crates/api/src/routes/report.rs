use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/report`.
///
/// ```text
/// GET /{user_id}    -> download (application/pdf)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{user_id}", get(report::download))
}
