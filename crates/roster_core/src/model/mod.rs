//! Domain model for roster records.
//!
//! # Responsibility
//! - Define the Student and Address records and their write payloads.
//! - Own the field rules every stored record must satisfy.
//!
//! # Invariants
//! - Record ids are assigned by storage and never reused.
//! - A record read back from storage always passes its own `validate()`.

pub mod address;
pub mod student;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier shared by every resource table.
pub type RecordId = i64;

/// Resource type tag carried by not-found errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Student,
    Address,
}

impl ResourceKind {
    /// Lowercase label used in messages and log fields.
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Address => "address",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
