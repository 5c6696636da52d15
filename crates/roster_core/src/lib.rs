//! Core domain logic for the roster backend.
//! This crate owns the Student/Address business rules and their storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::address::{Address, AddressId, NewAddress};
pub use model::student::{NewStudent, Student, StudentId, StudentPatch};
pub use model::validation::{FieldViolation, ValidationError};
pub use model::{RecordId, ResourceKind};
pub use repo::address_repo::{AddressRepository, SqliteAddressRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::address_service::AddressService;
pub use service::student_service::StudentService;
pub use service::{ServiceError, ServiceResult};

