//! Error types for route setup and request dispatch.
//!
//! Setup-time failures ([`RouterError`]) surface from the registration API the
//! moment a bad route is added. Request-time failures are whatever a handler
//! returns as `Err`; they travel out of [`crate::dispatcher::Dispatcher::dispatch`]
//! as a [`HandlerError`] exactly as the handler produced them.

use thiserror::Error;

/// Error raised by a handler. Propagated unmodified to the caller of `dispatch`.
pub type HandlerError = anyhow::Error;

/// Setup-time routing error
///
/// Returned by pattern compilation, route registration, and router
/// composition. None of these are deferred to the first request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The pattern is not a usable path template
    #[error("invalid route pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The offending pattern as given
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two registrations want different parameter names at the same trie position
    #[error(
        "cannot create route \"{pattern}\" with parameter \"{requested}\" because a route \
         already exists with a different parameter name (\"{existing}\") in the same location"
    )]
    ParameterNameConflict {
        /// The pattern being inserted when the conflict was found
        pattern: String,
        /// The parameter name already attached at this position
        existing: String,
        /// The parameter name the new insertion asked for
        requested: String,
    },

    /// `merge` was called with a prefix the sub-router did not declare
    #[error("merge prefix mismatch: expected \"{expected}\" but got \"{found}\"")]
    PrefixMismatch {
        /// The prefix passed to `merge`
        expected: String,
        /// The prefix the sub-router declared (empty when it declared none)
        found: String,
    },
}

impl RouterError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_mismatch_names_both_prefixes() {
        let err = RouterError::PrefixMismatch {
            expected: "/api".to_string(),
            found: "/users".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"merge prefix mismatch: expected "/api" but got "/users""#
        );
    }

    #[test]
    fn test_conflict_message_names_both_parameters() {
        let err = RouterError::ParameterNameConflict {
            pattern: "/:b".to_string(),
            existing: "a".to_string(),
            requested: "b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"b\""));
        assert!(msg.contains("(\"a\")"));
        assert!(msg.contains("/:b"));
    }

    #[test]
    fn test_invalid_pattern_reason() {
        let err = RouterError::invalid("/a b", "whitespace is not allowed");
        assert_eq!(
            err.to_string(),
            "invalid route pattern \"/a b\": whitespace is not allowed"
        );
    }
}
