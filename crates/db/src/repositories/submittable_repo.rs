//! Repository shared by every record table.
//!
//! The table is chosen by `P::KIND`; all kinds have the same column set
//! with the kind-specific fields inside the JSONB `payload`. Approval
//! columns are only ever written from an [`ApprovalMeta`] computed by the
//! core state machine.

use std::marker::PhantomData;

use records_core::approval::ApprovalMeta;
use records_core::patch::Patch;
use records_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::record::{PendingRecord, RecordPayload, SubmittableRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, payload, pending, approval_status, approved_by, approved_at, \
    rejected_by, rejected_at, rejection_reason, reviewer_contact, created_by, updated_by, \
    created_at, updated_at";

/// Same columns, qualified for queries that join `users`.
const R_COLUMNS: &str = "r.id, r.owner_id, r.payload, r.pending, r.approval_status, \
    r.approved_by, r.approved_at, r.rejected_by, r.rejected_at, r.rejection_reason, \
    r.reviewer_contact, r.created_by, r.updated_by, r.created_at, r.updated_at";

/// CRUD and approval transitions for records of kind `P`.
pub struct SubmittableRepo<P>(PhantomData<P>);

impl<P: RecordPayload> SubmittableRepo<P> {
    fn table() -> &'static str {
        P::KIND.table()
    }

    /// Insert a freshly submitted record. The record starts `Pending`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        payload: &P,
        reviewer_contact: Option<&str>,
    ) -> Result<SubmittableRecord<P>, sqlx::Error> {
        let meta = ApprovalMeta::submitted();
        let query = format!(
            "INSERT INTO {table} \
                (owner_id, payload, reviewer_contact, pending, approval_status, created_by, updated_by) \
             VALUES ($1, jsonb_strip_nulls($2), $3, $4, $5, $1, $1) \
             RETURNING {COLUMNS}",
            table = Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(owner_id)
            .bind(Json(payload))
            .bind(reviewer_contact)
            .bind(meta.pending)
            .bind(meta.approval_status)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", Self::table());
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The owner's most recent record of this kind, in any state.
    pub async fn find_latest_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1",
            Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the owner already holds a record of this kind.
    pub async fn exists_for_owner(pool: &PgPool, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE owner_id = $1)",
            Self::table()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Load a record and lock its row for the rest of the transaction.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 FOR UPDATE",
            Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Merge a serialized patch into the stored payload and reset the
    /// record to `Pending`.
    ///
    /// `patch` must contain only touched keys: values to set and `null`
    /// for values to clear. Nulls are stripped after the merge, so cleared
    /// optional fields disappear from the payload.
    pub async fn apply_edit(
        conn: &mut PgConnection,
        id: DbId,
        patch: &serde_json::Value,
        reviewer_contact: &Patch<String>,
        actor_id: DbId,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let meta = ApprovalMeta::submitted();
        let query = format!(
            "UPDATE {table} SET
                payload = jsonb_strip_nulls(payload || $2::jsonb),
                reviewer_contact = CASE WHEN $3 THEN $4 ELSE reviewer_contact END,
                pending = $5,
                approval_status = $6,
                approved_by = NULL,
                approved_at = NULL,
                rejected_by = NULL,
                rejected_at = NULL,
                rejection_reason = NULL,
                updated_by = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}",
            table = Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(id)
            .bind(patch)
            .bind(!reviewer_contact.is_keep())
            .bind(reviewer_contact.as_set().map(String::as_str))
            .bind(meta.pending)
            .bind(meta.approval_status)
            .bind(actor_id)
            .fetch_optional(conn)
            .await
    }

    /// Persist an approve or reject decision.
    ///
    /// Guarded on `pending = true`, so of two concurrent decisions only the
    /// first is written. Returns `None` if the record is gone or was
    /// already decided.
    pub async fn record_decision(
        pool: &PgPool,
        id: DbId,
        meta: &ApprovalMeta,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET
                pending = $2,
                approval_status = $3,
                approved_by = $4,
                approved_at = $5,
                rejected_by = $6,
                rejected_at = $7,
                rejection_reason = $8,
                updated_at = NOW()
             WHERE id = $1 AND pending = true
             RETURNING {COLUMNS}",
            table = Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(id)
            .bind(meta.pending)
            .bind(meta.approval_status)
            .bind(meta.approved_by)
            .bind(meta.approved_at)
            .bind(meta.rejected_by)
            .bind(meta.rejected_at)
            .bind(&meta.rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a record, returning the removed row if it existed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {COLUMNS}",
            Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All pending records with the owner's username and department.
    ///
    /// Owners without a department show `N/A`.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<PendingRecord<P>>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS}, u.username, COALESCE(d.acronym, 'N/A') AS department
             FROM {table} r
             JOIN users u ON u.id = r.owner_id
             LEFT JOIN departments d ON d.id = u.department_id
             WHERE r.pending = true
             ORDER BY r.created_at ASC, r.id ASC",
            table = Self::table()
        );
        sqlx::query_as::<_, PendingRecord<P>>(&query)
            .fetch_all(pool)
            .await
    }

    /// Approved records for one owner, most recently approved first.
    pub async fn list_approved(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<SubmittableRecord<P>>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {}
             WHERE owner_id = $1 AND pending = false AND approval_status = true
             ORDER BY approved_at DESC NULLS LAST, id DESC",
            Self::table()
        );
        sqlx::query_as::<_, SubmittableRecord<P>>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
