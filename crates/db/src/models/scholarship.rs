use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::{require_text, validate_non_negative};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub name: String,
    pub provider: String,
    pub scholarship_type: Option<String>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScholarshipPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub provider: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub scholarship_type: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub year: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub amount: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
}

impl RecordPayload for Scholarship {
    type Patch = ScholarshipPatch;
    const KIND: RecordKind = RecordKind::Scholarship;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_text("provider", &self.provider)?;
        validate_non_negative("amount", self.amount)
    }

    fn validate_patch(patch: &ScholarshipPatch) -> Result<(), CoreError> {
        patch.name.require("name")?;
        patch.provider.require("provider")?;
        validate_non_negative("amount", patch.amount.as_set().copied())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Scholarship", self.name.clone()),
            ("Provider", self.provider.clone()),
        ];
        push_field(&mut fields, "Type", self.scholarship_type.as_ref());
        push_field(&mut fields, "Year", self.year);
        push_field(&mut fields, "Amount", self.amount);
        push_field(&mut fields, "Description", self.description.as_ref());
        fields
    }
}
