//! Inbound request model.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!(
                "unsupported method `{other}`; expected GET|POST|PUT|DELETE"
            )),
        }
    }
}

/// Structured request handed to [`crate::dispatch`].
///
/// `path` carries no query string; query parameters go in `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Path segments after the leading `/`, with one trailing `/` tolerated.
    ///
    /// Returns `None` for paths without a leading slash or with any other
    /// empty segment (`//api`, `/api//students`).
    pub(crate) fn segments(&self) -> Option<Vec<&str>> {
        let path = self.path.strip_suffix('/').unwrap_or(self.path.as_str());
        let segments = path.strip_prefix('/')?.split('/').collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiRequest, Method};

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!(" Delete ".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn segments_tolerate_one_trailing_slash() {
        let request = ApiRequest::get("/api/students/");
        assert_eq!(request.segments(), Some(vec!["api", "students"]));
        assert_eq!(
            ApiRequest::get("/api/students").segments(),
            Some(vec!["api", "students"])
        );
    }

    #[test]
    fn segments_reject_other_empty_pieces() {
        for path in [
            "//api//students///",
            "/api/students//",
            "/api//students",
            "api/students",
            "/",
            "",
        ] {
            assert_eq!(ApiRequest::get(path).segments(), None, "{path}");
        }
    }
}
