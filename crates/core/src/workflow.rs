//! Workflow events emitted by record transitions.
//!
//! Handlers never send mail themselves. Each successful transition builds
//! a [`WorkflowEvent`] carrying a ready-to-send [`Notice`], and the event is
//! published to the notification side. Recipient selection lives here so
//! it can be tested without any I/O.

use serde::{Deserialize, Serialize};

use crate::records::RecordKind;
use crate::types::DbId;

/// Event type names, as published on the event bus.
pub const EVENT_SUBMITTED: &str = "record.submitted";
pub const EVENT_EDITED: &str = "record.edited";
pub const EVENT_APPROVED: &str = "record.approved";
pub const EVENT_REJECTED: &str = "record.rejected";
pub const EVENT_DELETED: &str = "record.deleted";

/// Signature line appended to every notice.
const SIGNATURE: &str = "Best Regards,\nStudent Record Management System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Submitted,
    Edited,
    Approved,
    Rejected,
    Deleted,
}

impl WorkflowAction {
    pub fn event_type(self) -> &'static str {
        match self {
            WorkflowAction::Submitted => EVENT_SUBMITTED,
            WorkflowAction::Edited => EVENT_EDITED,
            WorkflowAction::Approved => EVENT_APPROVED,
            WorkflowAction::Rejected => EVENT_REJECTED,
            WorkflowAction::Deleted => EVENT_DELETED,
        }
    }
}

/// A fully rendered email notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Everything needed to address and word a notice.
#[derive(Debug, Clone, Default)]
pub struct NoticeContext<'a> {
    pub owner_name: &'a str,
    pub owner_email: Option<&'a str>,
    pub reviewer_contact: Option<&'a str>,
    /// Labelled payload fields, already formatted.
    pub fields: &'a [(&'static str, String)],
    pub rejection_reason: Option<&'a str>,
}

/// A transition that happened to one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    pub action: WorkflowAction,
    pub kind: RecordKind,
    pub record_id: DbId,
    pub owner_id: DbId,
    pub actor_id: Option<DbId>,
    pub notice: Notice,
}

impl WorkflowEvent {
    pub fn new(
        action: WorkflowAction,
        kind: RecordKind,
        record_id: DbId,
        owner_id: DbId,
        actor_id: Option<DbId>,
        ctx: &NoticeContext<'_>,
    ) -> Self {
        Self {
            action,
            kind,
            record_id,
            owner_id,
            actor_id,
            notice: build_notice(action, kind, ctx),
        }
    }

    /// Whether there is anyone to notify.
    pub fn has_recipients(&self) -> bool {
        !self.notice.recipients.is_empty()
    }
}

/// Pick recipients for an action.
///
/// Submissions and edits go to the reviewer; decisions go to the owner;
/// deletions go to both.
pub fn recipients(action: WorkflowAction, ctx: &NoticeContext<'_>) -> Vec<String> {
    let candidates = match action {
        WorkflowAction::Submitted | WorkflowAction::Edited => vec![ctx.reviewer_contact],
        WorkflowAction::Approved | WorkflowAction::Rejected => vec![ctx.owner_email],
        WorkflowAction::Deleted => vec![ctx.owner_email, ctx.reviewer_contact],
    };

    let mut out: Vec<String> = Vec::new();
    for address in candidates.into_iter().flatten().map(str::trim) {
        if !address.is_empty() && !out.iter().any(|seen| seen.eq_ignore_ascii_case(address)) {
            out.push(address.to_string());
        }
    }
    out
}

fn build_notice(action: WorkflowAction, kind: RecordKind, ctx: &NoticeContext<'_>) -> Notice {
    let label = kind.label();
    let owner = if ctx.owner_name.is_empty() {
        "N/A"
    } else {
        ctx.owner_name
    };
    let details = format_fields(ctx.fields);

    let (subject, body) = match action {
        WorkflowAction::Submitted => (
            format!("New {label} Pending Approval"),
            format!(
                "Dear Tutor,\n\nA student has submitted a new {label} record for your approval.\n\n\
                 Student Name: {owner}\n{details}\n\
                 The record is currently pending your approval.\n\n{SIGNATURE}"
            ),
        ),
        WorkflowAction::Edited => (
            format!("{label} Updated - Requires Review"),
            format!(
                "Dear Tutor,\n\nA student has updated their {label} record. \
                 Please review the updated details.\n\n\
                 Student Name: {owner}\n{details}\n\
                 The record is now pending approval.\n\n{SIGNATURE}"
            ),
        ),
        WorkflowAction::Approved => (
            format!("{label} Approved"),
            format!(
                "Dear {owner},\n\nYour {label} record has been approved.\n\n{details}\n{SIGNATURE}"
            ),
        ),
        WorkflowAction::Rejected => {
            let reason = ctx.rejection_reason.unwrap_or("No reason provided.");
            (
                format!("{label} Rejected"),
                format!(
                    "Dear {owner},\n\nYour {label} record was not approved.\n\n\
                     Reason: {reason}\n\n{details}\n\
                     You may edit the record and submit it again.\n\n{SIGNATURE}"
                ),
            )
        }
        WorkflowAction::Deleted => (
            format!("{label} Deleted Notification"),
            format!(
                "Hello,\n\nThe {label} record of {owner} has been deleted.\n\n{details}\n\
                 If this was an error, please contact the system administrator.\n\n{SIGNATURE}"
            ),
        ),
    };

    Notice {
        recipients: recipients(action, ctx),
        subject,
        body,
    }
}

fn format_fields(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(fields: &'a [(&'static str, String)]) -> NoticeContext<'a> {
        NoticeContext {
            owner_name: "asha",
            owner_email: Some("asha@x.edu"),
            reviewer_contact: Some("tutor@x.edu"),
            fields,
            rejection_reason: None,
        }
    }

    #[test]
    fn submission_notifies_reviewer_only() {
        let fields = [("Provider", "Acme".to_string())];
        let event = WorkflowEvent::new(
            WorkflowAction::Submitted,
            RecordKind::Internship,
            11,
            7,
            Some(7),
            &ctx(&fields),
        );
        assert_eq!(event.notice.recipients, vec!["tutor@x.edu".to_string()]);
        assert_eq!(event.notice.subject, "New Internship Pending Approval");
        assert!(event.notice.body.contains("Provider: Acme"));
        assert!(event.notice.body.contains("Student Name: asha"));
    }

    #[test]
    fn decisions_notify_owner() {
        let fields: Vec<(&'static str, String)> = Vec::new();
        for action in [WorkflowAction::Approved, WorkflowAction::Rejected] {
            assert_eq!(recipients(action, &ctx(&fields)), vec!["asha@x.edu".to_string()]);
        }
    }

    #[test]
    fn deletion_notifies_owner_and_reviewer() {
        let fields: Vec<(&'static str, String)> = Vec::new();
        assert_eq!(
            recipients(WorkflowAction::Deleted, &ctx(&fields)),
            vec!["asha@x.edu".to_string(), "tutor@x.edu".to_string()]
        );
    }

    #[test]
    fn missing_reviewer_yields_no_recipients() {
        let fields: Vec<(&'static str, String)> = Vec::new();
        let context = NoticeContext {
            reviewer_contact: None,
            ..ctx(&fields)
        };
        let event = WorkflowEvent::new(
            WorkflowAction::Edited,
            RecordKind::Leave,
            1,
            7,
            Some(7),
            &context,
        );
        assert!(!event.has_recipients());
    }

    #[test]
    fn duplicate_and_blank_addresses_are_dropped() {
        let fields: Vec<(&'static str, String)> = Vec::new();
        let context = NoticeContext {
            owner_email: Some("Tutor@X.edu"),
            reviewer_contact: Some("tutor@x.edu"),
            ..ctx(&fields)
        };
        assert_eq!(recipients(WorkflowAction::Deleted, &context).len(), 1);

        let blank = NoticeContext {
            reviewer_contact: Some("  "),
            ..ctx(&fields)
        };
        assert!(recipients(WorkflowAction::Submitted, &blank).is_empty());
    }

    #[test]
    fn rejection_notice_carries_reason() {
        let fields: Vec<(&'static str, String)> = Vec::new();
        let context = NoticeContext {
            rejection_reason: Some("certificate missing"),
            ..ctx(&fields)
        };
        let event = WorkflowEvent::new(
            WorkflowAction::Rejected,
            RecordKind::Achievement,
            3,
            7,
            Some(2),
            &context,
        );
        assert!(event.notice.body.contains("Reason: certificate missing"));
    }

    #[test]
    fn event_types_are_namespaced() {
        assert_eq!(WorkflowAction::Deleted.event_type(), "record.deleted");
        assert_eq!(WorkflowAction::Submitted.event_type(), EVENT_SUBMITTED);
    }
}
