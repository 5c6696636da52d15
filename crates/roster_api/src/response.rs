//! Outbound response model and error body shapes.

use roster_core::ValidationError;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::InternalError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }
}

/// One entry of a 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: Status,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub(crate) fn with_body(status: Status, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub(crate) fn empty(status: Status) -> Self {
        Self { status, body: None }
    }

    pub(crate) fn validation(err: &ValidationError) -> Self {
        let entries = err
            .violations()
            .iter()
            .map(|violation| ErrorEntry {
                field: violation.field.to_string(),
                message: violation.message.to_string(),
            })
            .collect();
        Self::bad_request(entries)
    }

    pub(crate) fn bad_request(errors: Vec<ErrorEntry>) -> Self {
        Self::with_body(Status::BadRequest, json!({ "errors": errors }))
    }

    pub(crate) fn bad_field(field: &str, message: impl Into<String>) -> Self {
        Self::bad_request(vec![ErrorEntry {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::with_body(
            Status::InternalError,
            json!({ "error": message.into() }),
        )
    }

    /// Body serialized as compact JSON, if any.
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }
}
