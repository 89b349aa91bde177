use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::{require_text, validate_date_range};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttended {
    pub event_name: String,
    pub organizer: Option<String>,
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participation_status: Option<String>,
    pub achievement_details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventAttendedPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub event_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub organizer: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub event_type: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub location: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub participation_status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub achievement_details: Patch<String>,
}

impl RecordPayload for EventAttended {
    type Patch = EventAttendedPatch;
    const KIND: RecordKind = RecordKind::EventAttended;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("event_name", &self.event_name)?;
        validate_date_range(self.start_date, self.end_date)
    }

    fn validate_patch(patch: &EventAttendedPatch) -> Result<(), CoreError> {
        patch.event_name.require("event_name")?;
        patch.start_date.require("start_date")?;
        patch.end_date.require("end_date")
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Event", self.event_name.clone())];
        push_field(&mut fields, "Organizer", self.organizer.as_ref());
        push_field(&mut fields, "Type", self.event_type.as_ref());
        push_field(&mut fields, "Location", self.location.as_ref());
        fields.push(("From", self.start_date.to_string()));
        fields.push(("To", self.end_date.to_string()));
        push_field(&mut fields, "Participation", self.participation_status.as_ref());
        push_field(&mut fields, "Outcome", self.achievement_details.as_ref());
        fields
    }
}
