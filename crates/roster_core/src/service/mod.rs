//! Resource use-case services.
//!
//! # Responsibility
//! - Own the business rules: existence checks, update semantics, search.
//! - Keep transport adapters decoupled from storage details.
//!
//! # Invariants
//! - `NotFound` is raised here for every id-addressed operation on a missing
//!   record and is never retried or swallowed.
//! - Student updates merge, Address updates replace. The two are not unified.

pub mod address_service;
pub mod student_service;

use crate::model::validation::ValidationError;
use crate::model::{RecordId, ResourceKind};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surfaced by resource services.
#[derive(Debug)]
pub enum ServiceError {
    /// No stored record of `kind` has `id`.
    NotFound { kind: ResourceKind, id: RecordId },
    /// Storage rejected a write because the record breaks a field rule.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn not_found(kind: ResourceKind, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}
