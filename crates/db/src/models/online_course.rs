use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::require_text;
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineCourse {
    pub course_name: String,
    pub platform: String,
    pub course_type: Option<String>,
    pub status: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub certificate_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnlineCoursePatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub course_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub platform: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub course_type: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub completion_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub certificate_link: Patch<String>,
}

impl RecordPayload for OnlineCourse {
    type Patch = OnlineCoursePatch;
    const KIND: RecordKind = RecordKind::OnlineCourse;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("course_name", &self.course_name)?;
        require_text("platform", &self.platform)
    }

    fn validate_patch(patch: &OnlineCoursePatch) -> Result<(), CoreError> {
        patch.course_name.require("course_name")?;
        patch.platform.require("platform")
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Course", self.course_name.clone()),
            ("Platform", self.platform.clone()),
        ];
        push_field(&mut fields, "Type", self.course_type.as_ref());
        push_field(&mut fields, "Status", self.status.as_ref());
        push_field(&mut fields, "Completed On", self.completion_date);
        push_field(&mut fields, "Certificate", self.certificate_link.as_ref());
        fields
    }
}
