//! Tri-state field updates for partial edits.
//!
//! A JSON body distinguishes three cases per field, and [`Patch`] keeps
//! them apart:
//!
//! | JSON              | Variant          | Effect                |
//! |-------------------|------------------|-----------------------|
//! | field absent      | `Patch::Keep`    | leave value unchanged |
//! | `"field": null`   | `Patch::Clear`   | clear the value       |
//! | `"field": value`  | `Patch::Set(v)`  | overwrite             |
//!
//! Patch structs mark every field `#[serde(default, skip_serializing_if =
//! "Patch::is_keep")]` so that serializing a patch yields exactly the keys
//! to merge: `Set` as the value and `Clear` as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Patch::Clear)
    }

    /// The new value, if this patch sets one.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply the patch to the current value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }

    /// Fail if this patch would clear a required field.
    pub fn require(&self, field: &str) -> Result<(), CoreError> {
        if self.is_clear() {
            Err(CoreError::Validation(format!("{field} is required and cannot be cleared")))
        } else {
            Ok(())
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Absent fields never reach here; `#[serde(default)]` yields `Keep`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(default, skip_serializing_if = "Patch::is_keep")]
        name: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_keep")]
        note: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_keep")]
        count: Patch<i32>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let sample: Sample =
            serde_json::from_value(json!({ "name": "Ada", "note": null })).unwrap();
        assert_eq!(sample.name, Patch::Set("Ada".to_string()));
        assert_eq!(sample.note, Patch::Clear);
        assert_eq!(sample.count, Patch::Keep);
    }

    #[test]
    fn serializing_emits_only_touched_fields() {
        let sample = Sample {
            name: Patch::Set("Ada".into()),
            note: Patch::Clear,
            count: Patch::Keep,
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value, json!({ "name": "Ada", "note": null }));
    }

    #[test]
    fn apply_follows_variant() {
        assert_eq!(Patch::Keep.apply(Some(1)), Some(1));
        assert_eq!(Patch::<i32>::Clear.apply(Some(1)), None);
        assert_eq!(Patch::Set(2).apply(Some(1)), Some(2));
        assert_eq!(Patch::Set(2).apply(None), Some(2));
    }

    #[test]
    fn clearing_a_required_field_fails() {
        assert_matches!(
            Patch::<String>::Clear.require("regno"),
            Err(CoreError::Validation(msg)) if msg.contains("regno")
        );
        assert!(Patch::<String>::Keep.require("regno").is_ok());
        assert!(Patch::Set("21CS001".to_string()).require("regno").is_ok());
    }
}
