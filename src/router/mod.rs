//! # Router Module
//!
//! Registration and composition of routes into an ordered route table.
//!
//! ## Overview
//!
//! A [`Router`] owns an append-only [`RouteTable`]. Each [`Route`] pairs a
//! [`MethodFilter`] and a handler with its own compiled
//! [`PathMatcher`](crate::pattern::PathMatcher). Registration order is kept
//! and decides the order in which the dispatcher tries routes.
//!
//! ## Composition
//!
//! - [`Router::compose`] copies another router's routes under a path prefix,
//!   recompiling each joined pattern
//! - [`Router::merge`] splices another router's routes verbatim, after
//!   checking that it was declared for the same prefix
//!
//! ```
//! use chainrouter::router::Router;
//! use chainrouter::server::Response;
//!
//! let mut users = Router::new();
//! users
//!     .get("/:id", |_cx| Box::pin(async move { Ok(Some(Response::text("user"))) }))
//!     .unwrap();
//!
//! let mut app = Router::new();
//! app.compose("/users", &users).unwrap();
//! assert_eq!(app.routes().next().unwrap().pattern(), "/users/:id");
//! ```
//!
//! All setup errors surface from the registering call; nothing is deferred to
//! the first request.

mod core;
mod path;

pub use self::core::{MethodFilter, Route, RouteTable, Router};
pub use path::join_path;
