//! # CLI Module
//!
//! Command-line probe for the routing engine, shipped as the `chainr` binary.
//!
//! ## Commands
//!
//! ### `match`
//!
//! Compile a pattern, match a path against it, and print the captures:
//!
//! ```bash
//! chainr match '/:name/*' /hello/a/b/c
//! # {"0":"a/b/c","name":"hello"}
//! ```
//!
//! Exits non-zero when the path does not match.
//!
//! ### `join`
//!
//! ```bash
//! chainr join /api/ v1
//! # /api/v1
//! ```
//!
//! ### `demo`
//!
//! Dispatch one request through a small built-in router (a middleware route,
//! a few handlers, and a composed sub-router) and print the response:
//!
//! ```bash
//! chainr demo GET '/search?q=a&q=b' -H 'x-request-id: 01ARZ3NDEKTSV4RRFFQ69G5FAV'
//! ```
//!
//! Logging follows the `CHAINR_LOG_*` variables described in
//! [`crate::logging`].

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{demo_router, run_cli, Cli, Commands};
