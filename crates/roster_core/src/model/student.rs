//! Student record, creation payload and partial-update patch.
//!
//! # Invariants
//! - `name` is never blank and `email` always has a `local@domain.tld` shape.
//! - Applying a patch only touches fields the patch carries.

use crate::model::validation::{is_valid_email, text_or_empty, ValidationError, Violations};
use crate::model::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type StudentId = RecordId;

/// Stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
}

/// Candidate student before storage assigns an id.
///
/// Missing or null text fields deserialize as empty so `validate()` reports
/// them per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub email: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

/// Partial update payload.
///
/// `None` means "keep the stored value". Empty strings are treated the same
/// way so wire clients can send `""` for untouched fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            dob: None,
        }
    }

    pub fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.email)
    }

    /// Attaches a storage-assigned id.
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            dob: self.dob,
        }
    }
}

impl Student {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.email)
    }

    /// Merges `patch` into this record in place.
    ///
    /// Fields absent from the patch (or present as empty text) are left
    /// untouched. `id` is never changed.
    pub fn apply_patch(&mut self, patch: &StudentPatch) {
        if let Some(name) = present_text(&patch.name) {
            self.name = name.to_string();
        }
        if let Some(email) = present_text(&patch.email) {
            self.email = email.to_string();
        }
        if let Some(dob) = patch.dob {
            self.dob = Some(dob);
        }
    }
}

impl StudentPatch {
    /// Returns a copy with empty-string fields collapsed to `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.filter(|value| !value.is_empty()),
            email: self.email.filter(|value| !value.is_empty()),
            dob: self.dob,
        }
    }

    /// Returns whether the patch requests no change at all.
    pub fn is_empty(&self) -> bool {
        present_text(&self.name).is_none()
            && present_text(&self.email).is_none()
            && self.dob.is_none()
    }

    /// Validates only the fields the patch carries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        if let Some(name) = present_text(&self.name) {
            violations.require("name", name, "Name is required");
        }
        if let Some(email) = present_text(&self.email) {
            check_email(&mut violations, email);
        }
        violations.finish()
    }
}

fn present_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn validate_fields(name: &str, email: &str) -> Result<(), ValidationError> {
    let mut violations = Violations::default();
    violations.require("name", name, "Name is required");
    check_email(&mut violations, email);
    violations.finish()
}

fn check_email(violations: &mut Violations, email: &str) {
    if email.trim().is_empty() {
        violations.push("email", "Email is required");
    } else if !is_valid_email(email) {
        violations.push("email", "Email must be a valid email address");
    }
}

#[cfg(test)]
mod tests {
    use super::{NewStudent, Student, StudentPatch};
    use chrono::NaiveDate;

    fn stored() -> Student {
        Student {
            id: 7,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            dob: NaiveDate::from_ymd_opt(2001, 2, 3),
        }
    }

    #[test]
    fn apply_patch_overwrites_only_present_fields() {
        let mut student = stored();
        student.apply_patch(&StudentPatch {
            name: Some(String::new()),
            email: Some("b@x.com".to_string()),
            dob: None,
        });

        assert_eq!(student.id, 7);
        assert_eq!(student.name, "Ann");
        assert_eq!(student.email, "b@x.com");
        assert_eq!(student.dob, NaiveDate::from_ymd_opt(2001, 2, 3));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut student = stored();
        let patch = StudentPatch::default();
        assert!(patch.is_empty());
        student.apply_patch(&patch);
        assert_eq!(student, stored());
    }

    #[test]
    fn normalized_collapses_empty_strings() {
        let patch = StudentPatch {
            name: Some(String::new()),
            email: Some("b@x.com".to_string()),
            dob: None,
        }
        .normalized();
        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("b@x.com"));
    }

    #[test]
    fn patch_validation_skips_absent_fields_and_checks_present_ones() {
        assert!(StudentPatch::default().validate().is_ok());

        let err = StudentPatch {
            name: Some("   ".to_string()),
            email: Some("nope".to_string()),
            dob: None,
        }
        .validate()
        .unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
    }

    #[test]
    fn new_student_requires_name_and_well_formed_email() {
        assert!(NewStudent::new("Ann", "a@x.com").validate().is_ok());

        let err = NewStudent::new("", "").validate().unwrap_err();
        let messages = err
            .violations()
            .iter()
            .map(|v| v.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["Name is required", "Email is required"]);

        let err = NewStudent::new("Ann", "a-at-x").validate().unwrap_err();
        assert_eq!(
            err.violations()[0].message,
            "Email must be a valid email address"
        );
    }

    #[test]
    fn new_student_treats_missing_and_null_text_as_empty() {
        let candidate: NewStudent =
            serde_json::from_str(r#"{"name":null,"dob":"2000-01-15"}"#).unwrap();
        assert_eq!(candidate.name, "");
        assert_eq!(candidate.email, "");

        let err = candidate.validate().unwrap_err();
        let messages = err
            .violations()
            .iter()
            .map(|v| v.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["Name is required", "Email is required"]);
    }

    #[test]
    fn patch_deserializes_null_and_missing_fields_as_absent() {
        let patch: StudentPatch =
            serde_json::from_str(r#"{"name":"","email":"b@x.com","dob":null}"#).unwrap();
        assert_eq!(patch.dob, None);
        assert_eq!(patch.name.as_deref(), Some(""));

        let patch: StudentPatch = serde_json::from_str(r#"{"dob":"1999-12-31"}"#).unwrap();
        assert_eq!(patch.dob, NaiveDate::from_ymd_opt(1999, 12, 31));
        assert_eq!(patch.name, None);
    }
}
