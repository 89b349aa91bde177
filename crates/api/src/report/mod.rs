//! Per-user activity report.
//!
//! [`load_bundle`] gathers the user's profile and every approved record
//! across all kinds; [`render::render`] turns the bundle into a PDF.

pub mod render;

use records_core::error::CoreError;
use records_core::records::RecordKind;
use records_core::types::{DbId, Timestamp};
use records_db::models::achievement::Achievement;
use records_db::models::event_attended::EventAttended;
use records_db::models::event_organized::EventOrganized;
use records_db::models::internship::Internship;
use records_db::models::leave::Leave;
use records_db::models::online_course::OnlineCourse;
use records_db::models::record::{RecordPayload, SubmittableRecord};
use records_db::models::scholarship::Scholarship;
use records_db::models::student_details::StudentDetails;
use records_db::models::user::UserProfile;
use records_db::repositories::{SubmittableRepo, UserRepo};
use records_db::DbPool;

use crate::error::{AppError, AppResult};

/// One approved record, flattened to labelled fields.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub approved_at: Option<Timestamp>,
    pub fields: Vec<(&'static str, String)>,
}

/// All approved records of one kind.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub kind: RecordKind,
    pub entries: Vec<ReportEntry>,
}

impl ReportSection {
    pub fn from_records<P: RecordPayload>(records: &[SubmittableRecord<P>]) -> Self {
        Self {
            kind: P::KIND,
            entries: records
                .iter()
                .map(|record| ReportEntry {
                    approved_at: record.approval.approved_at,
                    fields: record.payload.fields(),
                })
                .collect(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind.label()
    }
}

/// Everything the report shows for one user.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub profile: UserProfile,
    pub generated_at: Timestamp,
    pub sections: Vec<ReportSection>,
}

impl ReportBundle {
    pub fn record_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

/// Load the report bundle for a user. Unknown users are a 404.
pub async fn load_bundle(pool: &DbPool, user_id: DbId) -> AppResult<ReportBundle> {
    let profile = UserRepo::find_profile(pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let sections = vec![
        section::<StudentDetails>(pool, user_id).await?,
        section::<Internship>(pool, user_id).await?,
        section::<Scholarship>(pool, user_id).await?,
        section::<Leave>(pool, user_id).await?,
        section::<Achievement>(pool, user_id).await?,
        section::<EventAttended>(pool, user_id).await?,
        section::<EventOrganized>(pool, user_id).await?,
        section::<OnlineCourse>(pool, user_id).await?,
    ];

    Ok(ReportBundle {
        profile,
        generated_at: chrono::Utc::now(),
        sections,
    })
}

async fn section<P: RecordPayload>(
    pool: &DbPool,
    owner_id: DbId,
) -> Result<ReportSection, sqlx::Error> {
    let records = SubmittableRepo::<P>::list_approved(pool, owner_id).await?;
    Ok(ReportSection::from_records(&records))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use records_core::approval::{ApprovalMeta, ApprovalState};

    use super::*;

    fn approved_leave(reason: &str, day: u32) -> SubmittableRecord<Leave> {
        let approved_at = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        let mut approval = ApprovalMeta::submitted();
        approval.approve(2, approved_at).unwrap();
        SubmittableRecord {
            id: day as DbId,
            owner_id: 7,
            state: ApprovalState::Approved,
            payload: Leave {
                leave_type: "Medical".to_string(),
                reason: reason.to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                contact_during_leave: None,
            },
            approval,
            reviewer_contact: None,
            created_by: Some(7),
            updated_by: Some(7),
            created_at: approved_at,
            updated_at: approved_at,
        }
    }

    #[test]
    fn section_keeps_record_order_and_fields() {
        let records = vec![approved_leave("fever", 5), approved_leave("wedding", 3)];
        let section = ReportSection::from_records(&records);

        assert_eq!(section.kind, RecordKind::Leave);
        assert_eq!(section.title(), "Leave Request");
        assert_eq!(section.entries.len(), 2);
        assert!(section.entries[0]
            .fields
            .contains(&("Reason", "fever".to_string())));
        assert_eq!(
            section.entries[1].approved_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 3, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn record_count_sums_sections() {
        let bundle = ReportBundle {
            profile: UserProfile {
                id: 7,
                username: "asha".to_string(),
                email: "asha@x.edu".to_string(),
                role: "student".to_string(),
                department_name: None,
                department_acronym: None,
            },
            generated_at: Utc::now(),
            sections: vec![
                ReportSection::from_records(&[approved_leave("fever", 5)]),
                ReportSection::from_records::<Internship>(&[]),
            ],
        };
        assert_eq!(bundle.record_count(), 1);
    }
}
