use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::{require_text, validate_date_range};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leave {
    pub leave_type: String,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contact_during_leave: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeavePatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub leave_type: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub reason: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub contact_during_leave: Patch<String>,
}

impl RecordPayload for Leave {
    type Patch = LeavePatch;
    const KIND: RecordKind = RecordKind::Leave;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("leave_type", &self.leave_type)?;
        require_text("reason", &self.reason)?;
        validate_date_range(self.start_date, self.end_date)
    }

    fn validate_patch(patch: &LeavePatch) -> Result<(), CoreError> {
        patch.leave_type.require("leave_type")?;
        patch.reason.require("reason")?;
        patch.start_date.require("start_date")?;
        patch.end_date.require("end_date")
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Leave Type", self.leave_type.clone()),
            ("Reason", self.reason.clone()),
            ("From", self.start_date.to_string()),
            ("To", self.end_date.to_string()),
        ];
        push_field(&mut fields, "Contact", self.contact_during_leave.as_ref());
        fields
    }
}
