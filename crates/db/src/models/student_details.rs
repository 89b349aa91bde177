//! Profile record for a student. At most one per owner, unique by regno.
//!
//! The tutor email on the profile doubles as the default reviewer contact
//! for every other kind the student submits.

use chrono::NaiveDate;
use records_core::error::CoreError;
use records_core::patch::Patch;
use records_core::records::RecordKind;
use records_core::types::DbId;
use records_core::validation::{require_text, validate_email};
use serde::{Deserialize, Serialize};

use super::record::{push_field, RecordPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetails {
    pub regno: String,
    pub department_id: DbId,
    pub batch: String,
    pub semester: Option<String>,
    pub staff_id: Option<DbId>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_joining: Option<NaiveDate>,
    pub blood_group: Option<String>,
    pub gender: Option<String>,
    pub tutor_email: Option<String>,
    pub personal_email: Option<String>,
    pub personal_phone: Option<String>,
    pub first_graduate: Option<bool>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentDetailsPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub regno: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub department_id: Patch<DbId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub batch: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub semester: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub staff_id: Patch<DbId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub date_of_birth: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub date_of_joining: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub blood_group: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub gender: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub tutor_email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub personal_email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub personal_phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub first_graduate: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub street: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub city: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub pincode: Patch<String>,
}

impl RecordPayload for StudentDetails {
    type Patch = StudentDetailsPatch;
    const KIND: RecordKind = RecordKind::StudentDetails;
    const SINGLE_PER_OWNER: bool = true;

    fn validate(&self) -> Result<(), CoreError> {
        require_text("regno", &self.regno)?;
        require_text("batch", &self.batch)?;
        validate_email("tutor_email", self.tutor_email.as_deref())?;
        validate_email("personal_email", self.personal_email.as_deref())
    }

    fn validate_patch(patch: &StudentDetailsPatch) -> Result<(), CoreError> {
        patch.regno.require("regno")?;
        patch.department_id.require("department_id")?;
        patch.batch.require("batch")?;
        validate_email("tutor_email", patch.tutor_email.as_set().map(String::as_str))?;
        validate_email(
            "personal_email",
            patch.personal_email.as_set().map(String::as_str),
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Register Number", self.regno.clone()),
            ("Batch", self.batch.clone()),
        ];
        push_field(&mut fields, "Semester", self.semester.as_ref());
        push_field(&mut fields, "Date of Birth", self.date_of_birth);
        push_field(&mut fields, "Date of Joining", self.date_of_joining);
        push_field(&mut fields, "Blood Group", self.blood_group.as_ref());
        push_field(&mut fields, "Gender", self.gender.as_ref());
        push_field(&mut fields, "Tutor Email", self.tutor_email.as_ref());
        push_field(&mut fields, "Personal Email", self.personal_email.as_ref());
        push_field(&mut fields, "Phone", self.personal_phone.as_ref());
        push_field(
            &mut fields,
            "First Graduate",
            self.first_graduate.map(|yes| if yes { "Yes" } else { "No" }),
        );
        push_field(&mut fields, "City", self.city.as_ref());
        fields
    }

    fn reviewer_hint(&self) -> Option<&str> {
        self.tutor_email.as_deref()
    }

    fn patched_reviewer_hint(patch: &StudentDetailsPatch) -> Option<&str> {
        patch.tutor_email.as_set().map(String::as_str)
    }
}
