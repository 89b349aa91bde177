use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::{require_text, validate_date_range, validate_non_negative};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

fn default_status() -> String {
    "Ongoing".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Internship {
    pub provider_name: String,
    pub domain: String,
    pub mode: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub stipend_amount: Option<f64>,
    #[serde(default = "default_status")]
    pub status: String,
    pub description: Option<String>,
    pub referral_person_name: Option<String>,
    pub referral_person_role: Option<String>,
    pub referral_person_mobile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InternshipPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub provider_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub domain: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub mode: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub stipend_amount: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub referral_person_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub referral_person_role: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub referral_person_mobile: Patch<String>,
}

impl RecordPayload for Internship {
    type Patch = InternshipPatch;
    const KIND: RecordKind = RecordKind::Internship;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("provider_name", &self.provider_name)?;
        require_text("domain", &self.domain)?;
        require_text("mode", &self.mode)?;
        require_text("status", &self.status)?;
        validate_date_range(self.start_date, self.end_date)?;
        validate_non_negative("stipend_amount", self.stipend_amount)
    }

    fn validate_patch(patch: &InternshipPatch) -> Result<(), CoreError> {
        patch.provider_name.require("provider_name")?;
        patch.domain.require("domain")?;
        patch.mode.require("mode")?;
        patch.start_date.require("start_date")?;
        patch.end_date.require("end_date")?;
        patch.status.require("status")?;
        validate_non_negative("stipend_amount", patch.stipend_amount.as_set().copied())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Provider", self.provider_name.clone()),
            ("Domain", self.domain.clone()),
            ("Mode", self.mode.clone()),
            ("Start Date", self.start_date.to_string()),
            ("End Date", self.end_date.to_string()),
            ("Status", self.status.clone()),
        ];
        push_field(&mut fields, "Stipend", self.stipend_amount);
        push_field(&mut fields, "Description", self.description.as_ref());
        push_field(&mut fields, "Referral", self.referral_person_name.as_ref());
        fields
    }
}
