//! Per-dispatch correlation ids.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::server::Request;

/// Header consulted for an incoming correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for one dispatch, a ULID.
///
/// Recorded on the `dispatch` span and readable from the handler context.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    /// Mint a fresh id
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// The caller's `x-request-id` when it holds a ULID, otherwise a fresh id
    #[must_use]
    pub fn for_request(request: &Request) -> Self {
        request
            .header(REQUEST_ID_HEADER)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    #[must_use]
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the id
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// Written as its 26-character Crockford string, as in the header.
impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_header_value_is_reused() {
        let original = RequestId::generate();
        let request = Request::new(Method::GET, "/")
            .with_header("X-Request-Id", format!("  {original} "));
        assert_eq!(RequestId::for_request(&request), original);
    }

    #[test]
    fn test_missing_or_garbage_header_mints_new_id() {
        let garbage = Request::new(Method::GET, "/").with_header("x-request-id", "not-a-ulid");
        let bare = Request::new(Method::GET, "/");
        let a = RequestId::for_request(&garbage);
        let b = RequestId::for_request(&bare);
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 26);
    }

    #[test]
    fn test_serializes_as_string() {
        let id: RequestId = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"01ARZ3NDEKTSV4RRFFQ69G5FAV\""
        );
        assert_eq!(id.timestamp_ms(), id.as_ulid().timestamp_ms());
    }
}
