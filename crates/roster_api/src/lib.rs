//! Transport adapter over roster services.
//!
//! # Responsibility
//! - Map structured requests onto the canonical route set.
//! - Validate payloads at the boundary before any service call.
//! - Map service outcomes to status codes and JSON bodies.
//!
//! # Invariants
//! - Dispatch never panics; every outcome becomes an `ApiResponse`.
//! - `NotFound` always maps to 404 with no body.

mod request;
mod response;
mod router;

pub use request::{ApiRequest, Method};
pub use response::{ApiResponse, ErrorEntry, Status};
pub use router::dispatch;
