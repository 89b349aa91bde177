//! Route tree shared by every record kind.

use axum::routing::{delete, get, post, put};
use axum::Router;
use records_db::models::record::RecordPayload;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/{kind-path}` for records of kind `P`.
///
/// ```text
/// POST   /add             -> submit
/// PUT    /update/{id}     -> edit (owner only, resets to pending)
/// GET    /pending         -> list_pending
/// GET    /approved        -> list_approved (?UserId=)
/// DELETE /delete/{id}     -> delete
/// POST   /approve/{id}    -> approve
/// POST   /reject/{id}     -> reject
/// GET    /{id}            -> get_by_id
/// ```
pub fn router<P: RecordPayload>() -> Router<AppState> {
    Router::new()
        .route("/add", post(records::submit::<P>))
        .route("/update/{id}", put(records::edit::<P>))
        .route("/pending", get(records::list_pending::<P>))
        .route("/approved", get(records::list_approved::<P>))
        .route("/delete/{id}", delete(records::delete::<P>))
        .route("/approve/{id}", post(records::approve::<P>))
        .route("/reject/{id}", post(records::reject::<P>))
        .route("/{id}", get(records::get_by_id::<P>))
}
