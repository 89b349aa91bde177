//! Approval state machine shared by every submittable record kind.
//!
//! A record is always in exactly one of three states. The persisted shape
//! is the flag set `pending` / `approval_status` plus the reviewer metadata;
//! [`ApprovalMeta`] owns every transition so the repositories only ever
//! write values computed here.
//!
//! ```text
//!            submit / edit
//!   ┌──────────────────────────────┐
//!   ▼                              │
//! Pending ──approve──▶ Approved ───┤
//!   │                              │
//!   └─────reject────▶ Rejected ────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a free-text rejection reason.
pub const MAX_REJECTION_REASON_LEN: usize = 1000;

/// The three lifecycle states of a submittable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

/// Approval columns carried by every record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalMeta {
    pub pending: bool,
    pub approval_status: bool,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub rejected_by: Option<DbId>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
}

impl ApprovalMeta {
    /// Metadata for a freshly submitted (or freshly edited) record.
    pub fn submitted() -> Self {
        Self {
            pending: true,
            approval_status: false,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
        }
    }

    /// Derive the lifecycle state from the stored flags.
    ///
    /// `pending` wins over everything else; a non-pending, non-approved
    /// record is rejected.
    pub fn state(&self) -> ApprovalState {
        if self.pending {
            ApprovalState::Pending
        } else if self.approval_status {
            ApprovalState::Approved
        } else {
            ApprovalState::Rejected
        }
    }

    /// Force the record back to `Pending`, clearing approval and rejection
    /// metadata. Applied on every owner edit regardless of prior state.
    pub fn reset(&mut self) {
        *self = Self::submitted();
    }

    /// Approve a pending record.
    pub fn approve(&mut self, reviewer_id: DbId, at: Timestamp) -> Result<(), CoreError> {
        self.ensure_pending("approved")?;
        self.pending = false;
        self.approval_status = true;
        self.approved_by = Some(reviewer_id);
        self.approved_at = Some(at);
        Ok(())
    }

    /// Reject a pending record with an optional reason.
    pub fn reject(
        &mut self,
        reviewer_id: DbId,
        reason: Option<String>,
        at: Timestamp,
    ) -> Result<(), CoreError> {
        self.ensure_pending("rejected")?;
        let reason = normalize_reason(reason)?;
        self.pending = false;
        self.approval_status = false;
        self.rejected_by = Some(reviewer_id);
        self.rejected_at = Some(at);
        self.rejection_reason = reason;
        Ok(())
    }

    fn ensure_pending(&self, verb: &str) -> Result<(), CoreError> {
        match self.state() {
            ApprovalState::Pending => Ok(()),
            other => Err(CoreError::Conflict(format!(
                "Only pending records can be {verb}; record is {}",
                state_name(other)
            ))),
        }
    }
}

impl Default for ApprovalMeta {
    fn default() -> Self {
        Self::submitted()
    }
}

/// Reject mutations attempted by anyone other than the record owner.
pub fn ensure_owner(
    entity: &'static str,
    record_id: DbId,
    owner_id: DbId,
    actor_id: DbId,
) -> Result<(), CoreError> {
    if owner_id == actor_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "User {actor_id} is not allowed to modify {entity} {record_id}"
        )))
    }
}

fn normalize_reason(reason: Option<String>) -> Result<Option<String>, CoreError> {
    let Some(reason) = reason else {
        return Ok(None);
    };
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_REJECTION_REASON_LEN {
        return Err(CoreError::Validation(format!(
            "Rejection reason must be at most {MAX_REJECTION_REASON_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

fn state_name(state: ApprovalState) -> &'static str {
    match state {
        ApprovalState::Pending => "pending",
        ApprovalState::Approved => "approved",
        ApprovalState::Rejected => "rejected",
    }
}
