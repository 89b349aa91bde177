//! Handlers for the record routes, generic over the record kind.
//!
//! Mounted once per kind at `/api/v1/{kind-path}` by
//! [`routes::records`](crate::routes::records). Bodies are taken as raw
//! JSON and decoded here so that a missing or malformed field surfaces as
//! a `VALIDATION_ERROR` like every other input problem.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use records_core::error::CoreError;
use records_core::types::DbId;
use records_db::models::record::{
    ApproveRecord, DeleteOutcome, EditRecord, PendingRecord, RecordPayload, RejectRecord,
    SubmitRecord, SubmittableRecord,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// Query string of `GET /approved`.
#[derive(Debug, Deserialize)]
pub struct ApprovedParams {
    #[serde(rename = "UserId", alias = "user_id", alias = "userId")]
    pub user_id: Option<DbId>,
}

fn decode<T: DeserializeOwned>(body: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(body)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Invalid request body: {e}"))))
}

/// POST /api/v1/{kind}/add
pub async fn submit<P: RecordPayload>(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmittableRecord<P>>>)> {
    let input: SubmitRecord<P> = decode(body)?;
    let record = workflow::submit(&state, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/{kind}/update/{id}
pub async fn edit<P: RecordPayload>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<SubmittableRecord<P>>>> {
    let input: EditRecord<P::Patch> = decode(body)?;
    let record = workflow::edit::<P>(&state, id, input).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/{kind}/pending
pub async fn list_pending<P: RecordPayload>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PendingRecord<P>>>>> {
    let records = workflow::list_pending::<P>(&state).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/{kind}/approved?UserId=
pub async fn list_approved<P: RecordPayload>(
    State(state): State<AppState>,
    Query(params): Query<ApprovedParams>,
) -> AppResult<Json<DataResponse<Vec<SubmittableRecord<P>>>>> {
    let records = workflow::list_approved::<P>(&state, params.user_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/{kind}/{id}
pub async fn get_by_id<P: RecordPayload>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubmittableRecord<P>>>> {
    let record = workflow::get::<P>(&state, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/{kind}/approve/{id}
pub async fn approve<P: RecordPayload>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<SubmittableRecord<P>>>> {
    let input: ApproveRecord = decode(body)?;
    let record = workflow::approve::<P>(&state, id, input).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/{kind}/reject/{id}
pub async fn reject<P: RecordPayload>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<SubmittableRecord<P>>>> {
    let input: RejectRecord = decode(body)?;
    let record = workflow::reject::<P>(&state, id, input).await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/{kind}/delete/{id}
///
/// Succeeds even when nothing was deleted; `deleted` tells the two apart.
pub async fn delete<P: RecordPayload>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteOutcome>>> {
    let outcome = workflow::delete::<P>(&state, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
