//! Address record and its creation/replacement payload.
//!
//! # Invariants
//! - `street` is 3..=100 chars, `city` is 2..=50 chars.
//! - `zip` matches `^[0-9]{5}(-[0-9]{4})?$`.

use crate::model::validation::{is_valid_zip, text_or_empty, ValidationError, Violations};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

pub type AddressId = RecordId;

/// Stored address record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// Address fields without an id.
///
/// Used both for creation and for full replacement on update. Missing or
/// null fields deserialize as empty and fail the `required` rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub street: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub zip: String,
}

impl NewAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            zip: zip.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.street, &self.city, &self.zip)
    }

    /// Attaches an id, keeping every other field from this payload.
    pub fn into_address(self, id: AddressId) -> Address {
        Address {
            id,
            street: self.street,
            city: self.city,
            zip: self.zip,
        }
    }
}

impl Address {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.street, &self.city, &self.zip)
    }
}

fn validate_fields(street: &str, city: &str, zip: &str) -> Result<(), ValidationError> {
    let mut violations = Violations::default();

    violations.require("street", street, "Street is required");
    violations.length(
        "street",
        street,
        3,
        100,
        "Street must be between 3 and 100 characters",
    );

    violations.require("city", city, "City is required");
    violations.length(
        "city",
        city,
        2,
        50,
        "City must be between 2 and 50 characters",
    );

    violations.require("zip", zip, "ZIP code is required");
    if !is_valid_zip(zip) {
        violations.push("zip", "ZIP code must be valid (e.g., 12345 or 12345-6789)");
    }

    violations.finish()
}

#[cfg(test)]
mod tests {
    use super::NewAddress;

    #[test]
    fn valid_address_passes() {
        assert!(NewAddress::new("1 Main St", "Springfield", "12345")
            .validate()
            .is_ok());
        assert!(NewAddress::new("Elm", "NY", "12345-6789")
            .validate()
            .is_ok());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let street = "s".repeat(100);
        let city = "c".repeat(50);
        assert!(NewAddress::new(street, city, "12345").validate().is_ok());

        let err = NewAddress::new("s".repeat(101), "c".repeat(51), "12345")
            .validate()
            .unwrap_err();
        assert!(err.has_field("street"));
        assert!(err.has_field("city"));
        assert!(!err.has_field("zip"));
    }

    #[test]
    fn blank_fields_report_every_violated_rule() {
        let err = NewAddress::new("", "", "").validate().unwrap_err();
        // required + length for street and city, required + pattern for zip
        assert_eq!(err.violations().len(), 6);
    }

    #[test]
    fn malformed_zip_is_rejected() {
        let err = NewAddress::new("1 Main St", "Springfield", "1234")
            .validate()
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "zip");
    }

    #[test]
    fn missing_zip_deserializes_empty_and_reports_required() {
        let candidate: NewAddress =
            serde_json::from_str(r#"{"street":"1 Main St","city":null}"#).unwrap();
        assert_eq!(candidate.city, "");
        assert_eq!(candidate.zip, "");

        let err = candidate.validate().unwrap_err();
        assert!(err.has_field("city"));
        assert_eq!(err.violations()[2].field, "zip");
        assert_eq!(err.violations()[2].message, "ZIP code is required");
    }

    #[test]
    fn into_address_keeps_given_id() {
        let address = NewAddress::new("1 Main St", "Springfield", "12345").into_address(9);
        assert_eq!(address.id, 9);
        assert!(address.validate().is_ok());
    }
}
