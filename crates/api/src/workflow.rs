//! Generic approval workflow over every record kind.
//!
//! Each operation validates, applies the transition through
//! [`SubmittableRepo`], and publishes a [`WorkflowEvent`] on the event bus.
//! Publishing never fails the request: mail delivery happens later in the
//! notification dispatcher.

use chrono::Utc;
use records_core::approval::ensure_owner;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::types::DbId;
use records_core::validation::validate_email;
use records_core::workflow::{NoticeContext, WorkflowAction, WorkflowEvent};
use records_db::models::record::{
    ApproveRecord, DeleteOutcome, EditRecord, PendingRecord, RecordPayload, RejectRecord,
    SubmitRecord, SubmittableRecord,
};
use records_db::models::student_details::StudentDetails;
use records_db::models::user::User;
use records_db::repositories::{SubmittableRepo, UserRepo};
use records_db::DbPool;
use records_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create a new record in `Pending`.
///
/// The reviewer contact is taken from the request, then from the payload
/// itself, then from the owner's student details. A record without any
/// reviewer contact is still created; its notice is skipped.
pub async fn submit<P: RecordPayload>(
    state: &AppState,
    input: SubmitRecord<P>,
) -> AppResult<SubmittableRecord<P>> {
    let owner_id = input
        .owner_id
        .ok_or_else(|| CoreError::Validation("owner_id is required".to_string()))?;
    let owner = find_user(&state.pool, owner_id).await?;

    input.payload.validate()?;
    let requested_contact = non_blank(input.reviewer_contact);
    validate_email("reviewer_contact", requested_contact.as_deref())?;

    if P::SINGLE_PER_OWNER && SubmittableRepo::<P>::exists_for_owner(&state.pool, owner_id).await? {
        return Err(CoreError::Validation(format!(
            "{} already exists for user {owner_id}",
            P::KIND.label()
        ))
        .into());
    }

    let reviewer_contact = match requested_contact {
        Some(contact) => Some(contact),
        None => match input.payload.reviewer_hint() {
            Some(hint) => non_blank(Some(hint.to_string())),
            None => tutor_email_of(&state.pool, owner_id).await?,
        },
    };

    let record = SubmittableRepo::<P>::create(
        &state.pool,
        owner_id,
        &input.payload,
        reviewer_contact.as_deref(),
    )
    .await
    .map_err(AppError::from_write)?;

    tracing::info!(
        record_id = record.id,
        owner_id,
        kind = %P::KIND,
        "Record submitted"
    );

    publish(state, WorkflowAction::Submitted, &record, Some(&owner), Some(owner_id));
    Ok(record)
}

/// Apply an owner's patch and send the record back to `Pending`.
///
/// The owner check, the merge, and validation of the merged payload run in
/// one transaction; an invalid merge is rolled back.
pub async fn edit<P: RecordPayload>(
    state: &AppState,
    id: DbId,
    input: EditRecord<P::Patch>,
) -> AppResult<SubmittableRecord<P>> {
    let actor_id = input
        .owner_id
        .ok_or_else(|| CoreError::Validation("owner_id is required".to_string()))?;

    P::validate_patch(&input.patch)?;
    let requested_contact = non_blank_patch(input.reviewer_contact);
    validate_email(
        "reviewer_contact",
        requested_contact.as_set().map(String::as_str),
    )?;

    let reviewer_contact = match (requested_contact, P::patched_reviewer_hint(&input.patch)) {
        (Patch::Keep, Some(hint)) => non_blank_patch(Patch::Set(hint.to_string())),
        (requested, _) => requested,
    };
    let patch = serde_json::to_value(&input.patch)
        .map_err(|e| CoreError::Internal(format!("Failed to serialize patch: {e}")))?;

    let mut tx = state.pool.begin().await?;

    let existing = SubmittableRepo::<P>::lock_for_update(&mut tx, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: P::KIND.entity(),
            id,
        })?;
    ensure_owner(P::KIND.entity(), id, existing.owner_id, actor_id)?;

    let record = SubmittableRepo::<P>::apply_edit(&mut tx, id, &patch, &reviewer_contact, actor_id)
        .await
        .map_err(AppError::from_write)?
        .ok_or(CoreError::NotFound {
            entity: P::KIND.entity(),
            id,
        })?;
    record.payload.validate()?;

    tx.commit().await?;

    tracing::info!(
        record_id = id,
        actor_id,
        kind = %P::KIND,
        previous_state = ?existing.state,
        "Record edited and reset to pending"
    );

    let owner = UserRepo::find_by_id(&state.pool, record.owner_id).await?;
    publish(state, WorkflowAction::Edited, &record, owner.as_ref(), Some(actor_id));
    Ok(record)
}

/// Approve a pending record.
pub async fn approve<P: RecordPayload>(
    state: &AppState,
    id: DbId,
    input: ApproveRecord,
) -> AppResult<SubmittableRecord<P>> {
    let record = find_record::<P>(&state.pool, id).await?;
    find_user(&state.pool, input.reviewer_id).await?;

    let mut meta = record.approval.clone();
    meta.approve(input.reviewer_id, Utc::now())?;
    let record = decide::<P>(&state.pool, id, &meta).await?;

    tracing::info!(
        record_id = id,
        reviewer_id = input.reviewer_id,
        kind = %P::KIND,
        "Record approved"
    );

    let owner = UserRepo::find_by_id(&state.pool, record.owner_id).await?;
    publish(state, WorkflowAction::Approved, &record, owner.as_ref(), Some(input.reviewer_id));
    Ok(record)
}

/// Reject a pending record with an optional reason.
pub async fn reject<P: RecordPayload>(
    state: &AppState,
    id: DbId,
    input: RejectRecord,
) -> AppResult<SubmittableRecord<P>> {
    let record = find_record::<P>(&state.pool, id).await?;
    find_user(&state.pool, input.reviewer_id).await?;

    let mut meta = record.approval.clone();
    meta.reject(input.reviewer_id, input.reason, Utc::now())?;
    let record = decide::<P>(&state.pool, id, &meta).await?;

    tracing::info!(
        record_id = id,
        reviewer_id = input.reviewer_id,
        kind = %P::KIND,
        "Record rejected"
    );

    let owner = UserRepo::find_by_id(&state.pool, record.owner_id).await?;
    publish(state, WorkflowAction::Rejected, &record, owner.as_ref(), Some(input.reviewer_id));
    Ok(record)
}

/// Hard-delete a record. A missing id is reported, not treated as an error.
pub async fn delete<P: RecordPayload>(state: &AppState, id: DbId) -> AppResult<DeleteOutcome> {
    let Some(record) = SubmittableRepo::<P>::delete(&state.pool, id).await? else {
        tracing::info!(record_id = id, kind = %P::KIND, "Delete of missing record ignored");
        return Ok(DeleteOutcome { id, deleted: false });
    };

    tracing::info!(record_id = id, owner_id = record.owner_id, kind = %P::KIND, "Record deleted");

    let owner = UserRepo::find_by_id(&state.pool, record.owner_id).await?;
    publish(state, WorkflowAction::Deleted, &record, owner.as_ref(), None);
    Ok(DeleteOutcome { id, deleted: true })
}

pub async fn list_pending<P: RecordPayload>(state: &AppState) -> AppResult<Vec<PendingRecord<P>>> {
    Ok(SubmittableRepo::<P>::list_pending(&state.pool).await?)
}

pub async fn list_approved<P: RecordPayload>(
    state: &AppState,
    owner_id: Option<DbId>,
) -> AppResult<Vec<SubmittableRecord<P>>> {
    let owner_id = owner_id.ok_or_else(|| AppError::BadRequest("UserId is required".to_string()))?;
    Ok(SubmittableRepo::<P>::list_approved(&state.pool, owner_id).await?)
}

pub async fn get<P: RecordPayload>(state: &AppState, id: DbId) -> AppResult<SubmittableRecord<P>> {
    find_record::<P>(&state.pool, id).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_record<P: RecordPayload>(pool: &DbPool, id: DbId) -> AppResult<SubmittableRecord<P>> {
    SubmittableRepo::<P>::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: P::KIND.entity(),
                id,
            })
        })
}

async fn find_user(pool: &DbPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Write a decision computed by the state machine. The write is guarded on
/// `pending`, so losing a race with another reviewer is a conflict.
async fn decide<P: RecordPayload>(
    pool: &DbPool,
    id: DbId,
    meta: &records_core::approval::ApprovalMeta,
) -> AppResult<SubmittableRecord<P>> {
    SubmittableRepo::<P>::record_decision(pool, id, meta)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "{} {id} is no longer pending",
                P::KIND.entity()
            )))
        })
}

/// The tutor email on the owner's student details, if any.
async fn tutor_email_of(pool: &DbPool, owner_id: DbId) -> AppResult<Option<String>> {
    let details = SubmittableRepo::<StudentDetails>::find_latest_for_owner(pool, owner_id).await?;
    Ok(non_blank(details.and_then(|d| d.payload.tutor_email)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim a patched contact; setting it to blank clears it.
fn non_blank_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Set(value) => match non_blank(Some(value)) {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        },
        other => other,
    }
}

/// Publish the workflow event for a transition.
fn publish<P: RecordPayload>(
    state: &AppState,
    action: WorkflowAction,
    record: &SubmittableRecord<P>,
    owner: Option<&User>,
    actor_id: Option<DbId>,
) {
    let fields = record.payload.fields();
    let ctx = NoticeContext {
        owner_name: owner.map(|u| u.username.as_str()).unwrap_or_default(),
        owner_email: owner.map(|u| u.email.as_str()),
        reviewer_contact: record.reviewer_contact.as_deref(),
        fields: &fields,
        rejection_reason: record.approval.rejection_reason.as_deref(),
    };
    let event = WorkflowEvent::new(action, P::KIND, record.id, record.owner_id, actor_id, &ctx);

    if !event.has_recipients() {
        tracing::warn!(
            record_id = record.id,
            kind = %P::KIND,
            event_type = action.event_type(),
            "No recipient for notice, notification skipped"
        );
    }

    state.event_bus.publish(PlatformEvent::from_workflow(&event));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patched_contact_is_trimmed() {
        assert_eq!(
            non_blank_patch(Patch::Set("  tutor@x.edu ".to_string())),
            Patch::Set("tutor@x.edu".to_string())
        );
    }

    #[test]
    fn blank_patched_contact_clears() {
        assert_eq!(non_blank_patch(Patch::Set("   ".to_string())), Patch::Clear);
        assert_eq!(non_blank_patch(Patch::Keep), Patch::Keep);
        assert_eq!(non_blank_patch(Patch::Clear), Patch::Clear);
    }
}
