//! Pattern matcher core - hot path for per-route matching.
//!
//! # JSF Compliance (Rule 206)
//!
//! Matching is on the request hot path. Captures are collected into a
//! `SmallVec` so that the common case (≤8 parameters) stays on the stack.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::parse;
use super::radix::RadixNode;
use crate::error::RouterError;

/// Maximum number of captures before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated capture storage for the hot path.
///
/// Names are `Arc<str>` shared with the tree; values are per-request data
/// taken from the URL. Entries are in path order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Resolve any input accepted by [`PathMatcher::match_path`] to its path component.
///
/// Absolute URLs are parsed with the `url` crate; otherwise the query string
/// and fragment are cut off. An empty result is treated as `/`.
#[must_use]
pub fn path_of(input: &str) -> Cow<'_, str> {
    if input.starts_with("http://") || input.starts_with("https://") {
        if let Ok(parsed) = url::Url::parse(input) {
            return Cow::Owned(parsed.path().to_string());
        }
    }
    let end = input.find(['?', '#']).unwrap_or(input.len());
    match &input[..end] {
        "" => Cow::Borrowed("/"),
        path => Cow::Borrowed(path),
    }
}

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    captures: ParamVec,
    variant: Arc<str>,
}

impl PathMatch {
    /// Get a capture by name
    ///
    /// Uses "last write wins" semantics: if a name occurs more than once in
    /// the pattern, the occurrence furthest along the path is returned.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Captured values in path order
    #[must_use]
    pub fn captures(&self) -> &ParamVec {
        &self.captures
    }

    #[must_use]
    pub fn into_captures(self) -> ParamVec {
        self.captures
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// The concrete pattern that matched (after optional-parameter expansion)
    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Convert captures to a HashMap
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.captures
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// A compiled path pattern
///
/// Built once at setup and read-only afterwards; safe to share across
/// threads without locking.
///
/// # Pattern syntax
///
/// - `/literal` matches verbatim
/// - `:name` captures one non-empty path segment
/// - `:name?` as a trailing segment makes that segment optional
/// - a trailing `*` captures the remainder of the path (possibly empty) under `"0"`
///
/// # Example
///
/// ```
/// use chainrouter::pattern::PathMatcher;
///
/// let matcher = PathMatcher::compile("/:name/*").unwrap();
/// let m = matcher.match_path("/hello/a/b/c").unwrap();
/// assert_eq!(m.get("name"), Some("hello"));
/// assert_eq!(m.get("0"), Some("a/b/c"));
/// ```
#[derive(Debug, Clone)]
pub struct PathMatcher {
    patterns: Vec<String>,
    variants: Vec<Arc<str>>,
    root: RadixNode,
}

impl PathMatcher {
    /// Compile a single pattern
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] if the pattern is not path-shaped.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let mut matcher = Self {
            patterns: Vec::with_capacity(1),
            variants: Vec::new(),
            root: RadixNode::root(),
        };
        matcher.add(pattern)?;
        Ok(matcher)
    }

    /// Insert another pattern into the same tree
    ///
    /// Both patterns then share prefixes and match through one lookup. Route
    /// matchers are compiled from a single pattern and never grow afterwards.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for malformed input, or
    /// [`RouterError::ParameterNameConflict`] when the pattern needs a
    /// different parameter name at a position already holding one. A matcher
    /// that returned an error from `add` should be discarded.
    pub fn add(&mut self, pattern: &str) -> Result<(), RouterError> {
        let normalized = parse::normalize(pattern);
        let expanded = parse::expand(&normalized)?;

        let mut variants = Vec::with_capacity(expanded.len());
        for concrete in expanded {
            let parsed = parse::parse(&concrete)?;
            let variant: Arc<str> = Arc::from(concrete);
            self.root.insert(&parsed, &variant)?;
            variants.push(variant);
        }

        debug!(
            pattern = %normalized,
            insertions = variants.len(),
            nodes = self.root.node_count(),
            "Pattern compiled"
        );

        self.patterns.push(normalized);
        self.variants.extend(variants);
        Ok(())
    }

    /// The normalized pattern this matcher was compiled from
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.patterns.first().map_or("/", String::as_str)
    }

    /// Every normalized pattern inserted so far
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Concrete patterns inserted after optional-parameter expansion
    #[must_use]
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(AsRef::as_ref)
    }

    /// Match a path, path with query string, or absolute URL
    #[must_use]
    pub fn match_path(&self, input: &str) -> Option<PathMatch> {
        let path = path_of(input);
        let mut captures = ParamVec::new();
        let variant = self.root.find(&path, 0, &mut captures)?;
        Some(PathMatch {
            captures,
            variant: Arc::clone(variant),
        })
    }

    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.match_path(input).is_some()
    }
}
