//! Structured logging setup
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. This module provides the subscriber the `chainr` binary uses:
//! JSON or pretty output, an `EnvFilter`, and optional non-blocking writes.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CHAINR_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `CHAINR_LOG_FORMAT` | `json` | `json` or `pretty` |
//! | `CHAINR_LOG_ASYNC` | `false` | write through a background thread |
//! | `CHAINR_LOG_TARGET_FILTER` | unset | extra comma-separated filter directives |
//! | `CHAINR_LOG_INCLUDE_LOCATION` | `false` | include file:line |
//!
//! `RUST_LOG`, when set, takes precedence over `CHAINR_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Enable non-blocking buffered output
    pub async_logging: bool,
    /// Extra filter directives (comma-separated, e.g. `chainrouter::pattern=debug`)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration through an arbitrary key lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: lookup("CHAINR_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(&lookup("CHAINR_LOG_FORMAT").unwrap_or_default()),
            async_logging: lookup("CHAINR_LOG_ASYNC")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(false),
            target_filter: lookup("CHAINR_LOG_TARGET_FILTER").filter(|s| !s.trim().is_empty()),
            include_location: lookup("CHAINR_LOG_INCLUDE_LOCATION")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(false),
        }
    }

    /// Verbose, human-readable preset for local work
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    /// JSON preset with buffered output
    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                let directive = filter
                    .parse()
                    .with_context(|| format!("Invalid log filter directive: {filter}"))?;
                env_filter = env_filter.add_directive(directive);
            }
        }
        Ok(env_filter)
    }
}

/// Install the global `tracing` subscriber described by `config`
///
/// # Errors
///
/// Fails on an invalid filter directive or when a global subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use chainrouter::logging::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::from_env()).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(non_blocking)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(non_blocking)
                .boxed(),
        };

        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize async logging")?;

        // The writer thread flushes on guard drop; keep it for the process lifetime
        std::mem::forget(guard);
    } else {
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed(),
        };

        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize sync logging")?;
    }

    Ok(())
}
