use http::Method;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::sync::Arc;

use super::HeaderVec;
use crate::pattern::path_of;

/// Maximum distinct query keys before heap allocation
pub const MAX_INLINE_QUERY: usize = 8;

/// A query parameter value
///
/// A key seen once is a scalar; a repeated key collects every value in order
/// of appearance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl QueryValue {
    /// The first value for this key
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            QueryValue::Single(v) => v,
            QueryValue::Multi(vs) => vs.first().map_or("", String::as_str),
        }
    }

    /// Every value for this key, in order
    #[must_use]
    pub fn all(&self) -> Vec<&str> {
        match self {
            QueryValue::Single(v) => vec![v.as_str()],
            QueryValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(first) => {
                let first = std::mem::take(first);
                *self = QueryValue::Multi(vec![first, value]);
            }
            QueryValue::Multi(vs) => vs.push(value),
        }
    }
}

/// Decoded query string, keys in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(SmallVec<[(String, QueryValue); MAX_INLINE_QUERY]>);

impl QueryParams {
    /// Decode a raw query string (without the leading `?`)
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::default();
        for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
            match params.0.iter_mut().find(|(key, _)| key.as_str() == k) {
                Some((_, existing)) => existing.push(v.into_owned()),
                None => params.0.push((k.into_owned(), QueryValue::Single(v.into_owned()))),
            }
        }
        params
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// An incoming request as seen by the dispatcher
///
/// The body is carried as raw bytes and never parsed.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path, path with query string, or absolute URL
    pub target: String,
    pub headers: HeaderVec,
    pub body: Vec<u8>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: HeaderVec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name.to_ascii_lowercase()), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The path component of the target
    #[must_use]
    pub fn path(&self) -> std::borrow::Cow<'_, str> {
        path_of(&self.target)
    }

    /// The raw query string, if any
    #[must_use]
    pub fn raw_query(&self) -> Option<&str> {
        let cut = self.target.find(['?', '#'])?;
        if self.target.as_bytes()[cut] != b'?' {
            return None;
        }
        let start = cut + 1;
        let end = self.target[start..]
            .find('#')
            .map_or(self.target.len(), |offset| start + offset);
        Some(&self.target[start..end])
    }

    /// Decoded, multi-valued query parameters
    #[must_use]
    pub fn query(&self) -> QueryParams {
        self.raw_query().map(QueryParams::parse).unwrap_or_default()
    }
}
