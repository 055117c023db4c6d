//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for dispatch behavior.
//!
//! ## Environment Variables
//!
//! ### `CHAINR_SLOW_MATCH_US`
//!
//! Threshold in microseconds above which matching a single route is logged as
//! slow. Accepts decimal (`1000`) or hexadecimal (`0x3e8`).
//!
//! Default: `1000`
//!
//! ### `CHAINR_NOT_FOUND_BODY`
//!
//! Body of the default 404 response produced when no handler commits.
//!
//! Default: `Not Found`
//!
//! ## Usage
//!
//! ```rust
//! use chainrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow match threshold: {}us", config.slow_match_us);
//! ```

use std::env;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;
const DEFAULT_NOT_FOUND_BODY: &str = "Not Found";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Per-route match duration that triggers a slow-match warning (default: 1000us)
    pub slow_match_us: u64,
    /// Body of the default not-found response
    pub not_found_body: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_us: DEFAULT_SLOW_MATCH_US,
            not_found_body: DEFAULT_NOT_FOUND_BODY.to_string(),
        }
    }
}

fn parse_u64(val: &str) -> Option<u64> {
    let val = val.trim();
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let slow_match_us = lookup("CHAINR_SLOW_MATCH_US")
            .and_then(|val| parse_u64(&val))
            .unwrap_or(defaults.slow_match_us);
        let not_found_body = lookup("CHAINR_NOT_FOUND_BODY").unwrap_or(defaults.not_found_body);
        RuntimeConfig {
            slow_match_us,
            not_found_body,
        }
    }
}
