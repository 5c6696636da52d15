//! Canonical route table and request handlers.
//!
//! Routes:
//! - `GET|POST /api/students`
//! - `GET /api/students/search?name=`
//! - `GET|PUT|DELETE /api/students/{id}`
//! - `GET|POST /api/addresses`
//! - `GET|PUT|DELETE /api/addresses/{id}`

use crate::request::{ApiRequest, Method};
use crate::response::{ApiResponse, Status};
use log::{info, warn};
use roster_core::{
    AddressService, NewAddress, NewStudent, RecordId, ServiceError, SqliteAddressRepository,
    SqliteStudentRepository, StudentPatch, StudentService,
};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

type HandlerResult = Result<ApiResponse, ApiResponse>;

impl From<ServiceError> for ApiResponse {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { .. } => ApiResponse::empty(Status::NotFound),
            ServiceError::Validation(err) => ApiResponse::validation(&err),
            ServiceError::Repo(err) => ApiResponse::internal(err.to_string()),
        }
    }
}

/// Routes one request to its service operation and maps the outcome.
pub fn dispatch(conn: &Connection, request: &ApiRequest) -> ApiResponse {
    let started_at = Instant::now();
    let response = route(conn, request).unwrap_or_else(|failure| failure);

    let code = response.status.code();
    if response.status == Status::InternalError {
        warn!(
            "event=api_request module=api status=error method={} path={} code={code} duration_ms={}",
            request.method,
            request.path,
            started_at.elapsed().as_millis()
        );
    } else {
        info!(
            "event=api_request module=api status=ok method={} path={} code={code} duration_ms={}",
            request.method,
            request.path,
            started_at.elapsed().as_millis()
        );
    }
    response
}

fn route(conn: &Connection, request: &ApiRequest) -> HandlerResult {
    let Some(segments) = request.segments() else {
        return Ok(ApiResponse::empty(Status::NotFound));
    };
    match (segments.as_slice(), request.method) {
        (["api", "students"], Method::Get) => list_students(conn),
        (["api", "students"], Method::Post) => create_student(conn, request),
        (["api", "students", "search"], Method::Get) => search_students(conn, request),
        (["api", "students", "search"], _) => method_not_allowed(),
        (["api", "students", id], Method::Get) => get_student(conn, parse_id(id)?),
        (["api", "students", id], Method::Put) => update_student(conn, parse_id(id)?, request),
        (["api", "students", id], Method::Delete) => delete_student(conn, parse_id(id)?),
        (["api", "students"] | ["api", "students", _], _) => method_not_allowed(),

        (["api", "addresses"], Method::Get) => list_addresses(conn),
        (["api", "addresses"], Method::Post) => create_address(conn, request),
        (["api", "addresses", id], Method::Get) => get_address(conn, parse_id(id)?),
        (["api", "addresses", id], Method::Put) => update_address(conn, parse_id(id)?, request),
        (["api", "addresses", id], Method::Delete) => delete_address(conn, parse_id(id)?),
        (["api", "addresses"] | ["api", "addresses", _], _) => method_not_allowed(),

        _ => Ok(ApiResponse::empty(Status::NotFound)),
    }
}

fn list_students(conn: &Connection) -> HandlerResult {
    let students = student_service(conn)?.list_all()?;
    json_response(Status::Ok, &students)
}

fn create_student(conn: &Connection, request: &ApiRequest) -> HandlerResult {
    let candidate: NewStudent = parse_body(request)?;
    candidate
        .validate()
        .map_err(|err| ApiResponse::validation(&err))?;
    let created = student_service(conn)?.create(&candidate)?;
    json_response(Status::Created, &created)
}

fn search_students(conn: &Connection, request: &ApiRequest) -> HandlerResult {
    let name = request
        .query
        .get("name")
        .ok_or_else(|| ApiResponse::bad_field("name", "query parameter `name` is required"))?;
    let students = student_service(conn)?.find_by_name_substring(name)?;
    json_response(Status::Ok, &students)
}

fn get_student(conn: &Connection, id: RecordId) -> HandlerResult {
    let student = student_service(conn)?.get_by_id(id)?;
    json_response(Status::Ok, &student)
}

fn update_student(conn: &Connection, id: RecordId, request: &ApiRequest) -> HandlerResult {
    let patch = parse_body::<StudentPatch>(request)?.normalized();
    patch.validate().map_err(|err| ApiResponse::validation(&err))?;
    let updated = student_service(conn)?.update(id, &patch)?;
    json_response(Status::Ok, &updated)
}

fn delete_student(conn: &Connection, id: RecordId) -> HandlerResult {
    student_service(conn)?.delete_by_id(id)?;
    Ok(ApiResponse::empty(Status::NoContent))
}

fn list_addresses(conn: &Connection) -> HandlerResult {
    let addresses = address_service(conn)?.list_all()?;
    json_response(Status::Ok, &addresses)
}

fn create_address(conn: &Connection, request: &ApiRequest) -> HandlerResult {
    let candidate: NewAddress = parse_body(request)?;
    candidate
        .validate()
        .map_err(|err| ApiResponse::validation(&err))?;
    let created = address_service(conn)?.create(&candidate)?;
    json_response(Status::Created, &created)
}

fn get_address(conn: &Connection, id: RecordId) -> HandlerResult {
    let address = address_service(conn)?.get_by_id(id)?;
    json_response(Status::Ok, &address)
}

fn update_address(conn: &Connection, id: RecordId, request: &ApiRequest) -> HandlerResult {
    let replacement: NewAddress = parse_body(request)?;
    replacement
        .validate()
        .map_err(|err| ApiResponse::validation(&err))?;
    let updated = address_service(conn)?.update(id, &replacement)?;
    json_response(Status::Ok, &updated)
}

fn delete_address(conn: &Connection, id: RecordId) -> HandlerResult {
    address_service(conn)?.delete_by_id(id)?;
    Ok(ApiResponse::empty(Status::NoContent))
}

fn student_service(
    conn: &Connection,
) -> Result<StudentService<SqliteStudentRepository<'_>>, ApiResponse> {
    SqliteStudentRepository::try_new(conn)
        .map(StudentService::new)
        .map_err(|err| ApiResponse::internal(format!("student repo init failed: {err}")))
}

fn address_service(
    conn: &Connection,
) -> Result<AddressService<SqliteAddressRepository<'_>>, ApiResponse> {
    SqliteAddressRepository::try_new(conn)
        .map(AddressService::new)
        .map_err(|err| ApiResponse::internal(format!("address repo init failed: {err}")))
}

fn parse_id(raw: &str) -> Result<RecordId, ApiResponse> {
    raw.parse::<RecordId>()
        .map_err(|_| ApiResponse::bad_field("id", format!("id must be an integer, got `{raw}`")))
}

fn parse_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiResponse> {
    let body = request
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| ApiResponse::bad_field("body", "request body is required"))?;
    serde_json::from_str(body)
        .map_err(|err| ApiResponse::bad_field("body", format!("malformed JSON body: {err}")))
}

fn json_response<T: Serialize>(status: Status, value: &T) -> HandlerResult {
    serde_json::to_value(value)
        .map(|body| ApiResponse::with_body(status, body))
        .map_err(|err| ApiResponse::internal(format!("response encoding failed: {err}")))
}

fn method_not_allowed() -> HandlerResult {
    Ok(ApiResponse::empty(Status::MethodNotAllowed))
}
