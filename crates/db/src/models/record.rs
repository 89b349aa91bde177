//! The generic submittable record and its request DTOs.
//!
//! Every record kind is a [`SubmittableRecord<P>`] where `P` is the
//! kind-specific payload. The payload is stored as JSONB next to the
//! shared approval columns, so one repository serves every kind.

use std::fmt;

use records_core::approval::{ApprovalMeta, ApprovalState};
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};

/// A kind-specific payload that can flow through the approval workflow.
pub trait RecordPayload:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Partial-update shape, one [`Patch`] per field.
    type Patch: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: RecordKind;

    /// Whether an owner may hold at most one record of this kind.
    const SINGLE_PER_OWNER: bool = false;

    /// Validate a complete payload (on submit, and after an edit is merged).
    fn validate(&self) -> Result<(), CoreError>;

    /// Reject patches that would clear required fields.
    fn validate_patch(patch: &Self::Patch) -> Result<(), CoreError>;

    /// Labelled, formatted fields for notifications and reports.
    fn fields(&self) -> Vec<(&'static str, String)>;

    /// Reviewer address carried inside the payload itself, if the kind has one.
    fn reviewer_hint(&self) -> Option<&str> {
        None
    }

    /// Reviewer address set by a patch, if the kind has one.
    fn patched_reviewer_hint(_patch: &Self::Patch) -> Option<&str> {
        None
    }
}

/// A row from any record table.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittableRecord<P> {
    pub id: DbId,
    pub owner_id: DbId,
    pub state: ApprovalState,
    #[serde(flatten)]
    pub payload: P,
    #[serde(flatten)]
    pub approval: ApprovalMeta,
    pub reviewer_contact: Option<String>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'r, P: RecordPayload> FromRow<'r, PgRow> for SubmittableRecord<P> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let Json(payload) = row.try_get::<Json<P>, _>("payload")?;
        let approval = ApprovalMeta {
            pending: row.try_get("pending")?,
            approval_status: row.try_get("approval_status")?,
            approved_by: row.try_get("approved_by")?,
            approved_at: row.try_get("approved_at")?,
            rejected_by: row.try_get("rejected_by")?,
            rejected_at: row.try_get("rejected_at")?,
            rejection_reason: row.try_get("rejection_reason")?,
        };
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            state: approval.state(),
            payload,
            approval,
            reviewer_contact: row.try_get("reviewer_contact")?,
            created_by: row.try_get("created_by")?,
            updated_by: row.try_get("updated_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// A pending record enriched with owner display fields for reviewers.
#[derive(Debug, Clone, Serialize)]
pub struct PendingRecord<P> {
    #[serde(flatten)]
    pub record: SubmittableRecord<P>,
    pub username: String,
    pub department: String,
}

impl<'r, P: RecordPayload> FromRow<'r, PgRow> for PendingRecord<P> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            record: SubmittableRecord::from_row(row)?,
            username: row.try_get("username")?,
            department: row.try_get("department")?,
        })
    }
}

/// Request body for `POST /add`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRecord<P> {
    #[serde(default, alias = "Userid", alias = "UserId")]
    pub owner_id: Option<DbId>,
    #[serde(default)]
    pub reviewer_contact: Option<String>,
    #[serde(flatten)]
    pub payload: P,
}

/// Request body for `PUT /update/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRecord<Q> {
    /// The acting user; must match the stored owner.
    #[serde(default, alias = "Userid", alias = "UserId")]
    pub owner_id: Option<DbId>,
    #[serde(default)]
    pub reviewer_contact: Patch<String>,
    #[serde(flatten)]
    pub patch: Q,
}

/// Request body for `POST /approve/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveRecord {
    pub reviewer_id: DbId,
}

/// Request body for `POST /reject/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectRecord {
    pub reviewer_id: DbId,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Result of `DELETE /delete/{id}`. Deleting a missing id is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub id: DbId,
    pub deleted: bool,
}

/// Append `label: value` when the value is present and non-blank.
pub(crate) fn push_field<T: ToString>(
    fields: &mut Vec<(&'static str, String)>,
    label: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        let value = value.to_string();
        if !value.trim().is_empty() {
            fields.push((label, value));
        }
    }
}
