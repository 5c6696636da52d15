//! Command-line entry point: one request per invocation.
//!
//! Usage: `roster_cli <METHOD> <PATH>[?key=value&...] [JSON_BODY]`
//!
//! Prints `status=<code>` and the JSON body (if any). Exit code is 0 for 2xx
//! responses, 1 otherwise and 2 for usage or startup errors. Query values are
//! taken verbatim; no percent-decoding is applied.

mod config;

use config::AppConfig;
use log::error;
use roster_api::{dispatch, ApiRequest, Method};
use roster_core::db::open_db;
use std::process::ExitCode;

const USAGE: &str = "usage: roster_cli <GET|POST|PUT|DELETE> <PATH>[?key=value&...] [JSON_BODY]";

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let request = match parse_args(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = AppConfig::from_env();
    if let Err(err) = roster_core::init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("logging init failed: {err}");
        return ExitCode::from(2);
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_start module=cli status=error error_code=db_open_failed error={err}");
            eprintln!("failed to open `{}`: {err}", config.db_path.display());
            return ExitCode::from(2);
        }
    };

    let response = dispatch(&conn, &request);
    println!("status={}", response.status.code());
    if let Some(body) = response.body_text() {
        println!("{body}");
    }

    if response.status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_args(args: &[String]) -> Result<ApiRequest, String> {
    let (method, target, body) = match args {
        [method, target] => (method, target, None),
        [method, target, body] => (method, target, Some(body)),
        _ => return Err("expected a method, a path and an optional body".to_string()),
    };

    let method = method.parse::<Method>()?;
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target.as_str(), None),
    };

    let mut request = ApiRequest::new(method, path);
    for pair in query.into_iter().flat_map(|query| query.split('&')) {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        request = request.with_query(key, value);
    }
    if let Some(body) = body {
        request = request.with_body(body.as_str());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::parse_args;
    use roster_api::Method;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_method_path_and_query() {
        let request = parse_args(&args(&["get", "/api/students/search?name=Ann&x="])).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/api/students/search");
        assert_eq!(request.query.get("name").map(String::as_str), Some("Ann"));
        assert_eq!(request.query.get("x").map(String::as_str), Some(""));
        assert_eq!(request.body, None);
    }

    #[test]
    fn parses_body_argument() {
        let request = parse_args(&args(&["POST", "/api/addresses", "{\"a\":1}"])).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn rejects_bad_arity_and_unknown_method() {
        assert!(parse_args(&args(&["GET"])).is_err());
        assert!(parse_args(&args(&["PATCH", "/api/students"])).is_err());
    }
}
