//! # Pattern Module
//!
//! Compiles route path patterns into a compressed radix tree and matches
//! request paths against them.
//!
//! ## Overview
//!
//! Every registered route owns one [`PathMatcher`]. Compilation normalizes the
//! pattern, validates it, expands optional parameters into concrete variants,
//! and inserts each variant into the tree. Matching is a recursive descent
//! that tries, at each node, the static child for the next byte, then the
//! parameter child, then the wildcard, backtracking only to the node that
//! offered the failed branch.
//!
//! ## Example
//!
//! ```
//! use chainrouter::pattern::PathMatcher;
//!
//! let matcher = PathMatcher::compile("/files/:id?").unwrap();
//! assert_eq!(matcher.match_path("/files/42").unwrap().get("id"), Some("42"));
//! assert!(matcher.match_path("/files").unwrap().is_empty());
//! assert!(matcher.match_path("/files/").is_none());
//! ```
//!
//! ## Performance
//!
//! - Lookup is O(k) in the path length
//! - Shared prefixes are stored once
//! - Captures live on the stack for up to [`MAX_INLINE_PARAMS`] parameters

mod core;
mod parse;
mod radix;
#[cfg(test)]
mod performance_tests;

pub use self::core::{path_of, ParamVec, PathMatch, PathMatcher, MAX_INLINE_PARAMS};
pub use radix::WILDCARD_KEY;
