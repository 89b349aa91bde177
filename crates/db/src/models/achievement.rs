use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::validation::require_text;
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub category: Option<String>,
    pub issuer: Option<String>,
    pub date_awarded: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub category: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub issuer: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub date_awarded: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
}

impl RecordPayload for Achievement {
    type Patch = AchievementPatch;
    const KIND: RecordKind = RecordKind::Achievement;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)
    }

    fn validate_patch(patch: &AchievementPatch) -> Result<(), CoreError> {
        patch.title.require("title")
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Title", self.title.clone())];
        push_field(&mut fields, "Category", self.category.as_ref());
        push_field(&mut fields, "Issued By", self.issuer.as_ref());
        push_field(&mut fields, "Date Awarded", self.date_awarded);
        push_field(&mut fields, "Description", self.description.as_ref());
        fields
    }
}
