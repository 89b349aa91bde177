//! The catalogue of submittable record kinds.
//!
//! Every kind shares the approval workflow; the kind only decides the
//! table it lives in, the URL segment it is served under, and how it is
//! labelled in notifications and reports.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    StudentDetails,
    Internship,
    Scholarship,
    Leave,
    Achievement,
    EventAttended,
    EventOrganized,
    OnlineCourse,
}

impl RecordKind {
    /// All kinds, in report order.
    pub const ALL: [RecordKind; 8] = [
        RecordKind::StudentDetails,
        RecordKind::Internship,
        RecordKind::Scholarship,
        RecordKind::Leave,
        RecordKind::Achievement,
        RecordKind::EventAttended,
        RecordKind::EventOrganized,
        RecordKind::OnlineCourse,
    ];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::StudentDetails => "student_details",
            RecordKind::Internship => "internships",
            RecordKind::Scholarship => "scholarships",
            RecordKind::Leave => "leaves",
            RecordKind::Achievement => "achievements",
            RecordKind::EventAttended => "events_attended",
            RecordKind::EventOrganized => "events_organized",
            RecordKind::OnlineCourse => "online_courses",
        }
    }

    /// URL segment under `/api/v1`.
    pub fn path(self) -> &'static str {
        match self {
            RecordKind::StudentDetails => "student-details",
            RecordKind::Internship => "internships",
            RecordKind::Scholarship => "scholarships",
            RecordKind::Leave => "leaves",
            RecordKind::Achievement => "achievements",
            RecordKind::EventAttended => "events-attended",
            RecordKind::EventOrganized => "events-organized",
            RecordKind::OnlineCourse => "online-courses",
        }
    }

    /// Human-readable label used in email subjects and report headings.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::StudentDetails => "Student Details",
            RecordKind::Internship => "Internship",
            RecordKind::Scholarship => "Scholarship",
            RecordKind::Leave => "Leave Request",
            RecordKind::Achievement => "Achievement",
            RecordKind::EventAttended => "Event Attended",
            RecordKind::EventOrganized => "Event Organized",
            RecordKind::OnlineCourse => "Online Course",
        }
    }

    /// Entity name used in `NotFound` errors and event sources.
    pub fn entity(self) -> &'static str {
        match self {
            RecordKind::StudentDetails => "StudentDetails",
            RecordKind::Internship => "Internship",
            RecordKind::Scholarship => "Scholarship",
            RecordKind::Leave => "Leave",
            RecordKind::Achievement => "Achievement",
            RecordKind::EventAttended => "EventAttended",
            RecordKind::EventOrganized => "EventOrganized",
            RecordKind::OnlineCourse => "OnlineCourse",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}
