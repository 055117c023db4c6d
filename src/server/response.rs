use serde::Serialize;
use std::sync::Arc;

use super::HeaderVec;

/// Response produced by a dispatch
///
/// The same type serves as the shared per-request accumulator that middleware
/// mutates and as the value a handler returns to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderVec,
    pub body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200, Vec::new())
    }
}

impl Response {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: body.into(),
        }
    }

    /// `200 OK` plain-text response
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        let mut response = Self::new(200, body.into());
        response.set_header("content-type", "text/plain; charset=utf-8");
        response
    }

    /// `200 OK` JSON response
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from `serde_json`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let mut response = Self::new(200, serde_json::to_vec(value)?);
        response.set_header("content-type", "application/json");
        Ok(response)
    }

    /// `404 Not Found` with the given body
    #[must_use]
    pub fn not_found(body: impl Into<String>) -> Self {
        let mut response = Self::text(body);
        response.status = 404;
        response
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value (case-insensitive)
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value.into()));
    }

    /// Add a header without touching existing values of the same name
    pub fn append_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.push((Arc::from(name), value.into()));
    }

    /// Body as UTF-8, lossily
    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_ok() {
        let response = Response::default();
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut response = Response::default();
        response.set_header("X-Test", "1");
        response.set_header("x-test", "2");
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header("X-TEST"), Some("2"));
    }

    #[test]
    fn test_append_header_keeps_existing() {
        let mut response = Response::default();
        response.append_header("set-cookie", "a=1");
        response.append_header("set-cookie", "b=2");
        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.header("set-cookie"), Some("a=1"));
    }

    #[test]
    fn test_json_and_not_found() {
        let response = Response::json(&serde_json::json!({"ok": true})).unwrap();
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body_text(), r#"{"ok":true}"#);

        let missing = Response::not_found("Not Found");
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body_text(), "Not Found");
    }
}
