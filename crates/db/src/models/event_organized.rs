use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::{require_text, validate_date_range, validate_non_negative_count};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOrganized {
    pub event_name: String,
    pub club_name: Option<String>,
    pub role: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participant_count: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventOrganizedPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub event_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub club_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub role: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub participant_count: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
}

impl RecordPayload for EventOrganized {
    type Patch = EventOrganizedPatch;
    const KIND: RecordKind = RecordKind::EventOrganized;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("event_name", &self.event_name)?;
        validate_date_range(self.start_date, self.end_date)?;
        validate_non_negative_count("participant_count", self.participant_count)
    }

    fn validate_patch(patch: &EventOrganizedPatch) -> Result<(), CoreError> {
        patch.event_name.require("event_name")?;
        patch.start_date.require("start_date")?;
        patch.end_date.require("end_date")?;
        validate_non_negative_count("participant_count", patch.participant_count.as_set().copied())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Event", self.event_name.clone())];
        push_field(&mut fields, "Club", self.club_name.as_ref());
        push_field(&mut fields, "Role", self.role.as_ref());
        fields.push(("From", self.start_date.to_string()));
        fields.push(("To", self.end_date.to_string()));
        push_field(&mut fields, "Participants", self.participant_count);
        push_field(&mut fields, "Description", self.description.as_ref());
        fields
    }
}
