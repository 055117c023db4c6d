//! # chainrouter
//!
//! An embeddable HTTP routing and dispatch engine: radix-tree path matching
//! plus an ordered, short-circuiting middleware chain.
//!
//! ## Overview
//!
//! Routes are registered on a [`Router`] with a method filter, a path pattern,
//! and an async handler. [`Router::into_dispatcher`] freezes the table into a
//! [`Dispatcher`], whose single entry point turns a [`Request`] into a
//! [`Response`]. Socket handling is left to the host server.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Pattern compilation into a compressed radix tree and path matching
//! - **[`router`]** - Route table, registration helpers, composition and merge
//! - **[`dispatcher`]** - Per-request walk of the route table and the handler contract
//! - **[`server`]** - Thin request and response values
//! - **[`error`]** - Setup-time and request-time error types
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - Environment-driven dispatch settings
//! - **[`ids`]** - ULID request ids
//! - **[`cli`]** - The `chainr` command-line probe
//!
//! ## Pattern syntax
//!
//! | Pattern | Matches | Captures |
//! |---------|---------|----------|
//! | `/hello` | `/hello` | none |
//! | `/users/:id` | `/users/42` | `id = "42"` |
//! | `/files/:id?` | `/files/42`, `/files` | `id` when present |
//! | `/:name/*` | `/hello/a/b` | `name = "hello"`, `0 = "a/b"` |
//!
//! Static children are preferred over parameters, and parameters over
//! wildcards. Parameters never capture an empty segment.
//!
//! ## Example
//!
//! ```
//! use chainrouter::{Request, Response, Router};
//! use http::Method;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let mut router = Router::new();
//! router
//!     .all("*", |mut cx| {
//!         Box::pin(async move {
//!             cx.next().await?;
//!             cx.response_mut().set_header("X-Test", "1");
//!             Ok(None)
//!         })
//!     })
//!     .unwrap()
//!     .get("/users/:name", |cx| {
//!         Box::pin(async move {
//!             let name = cx.param("name").unwrap_or_default();
//!             Ok(Some(Response::text(format!("Hello {name}!"))))
//!         })
//!     })
//!     .unwrap();
//!
//! let dispatcher = router.into_dispatcher();
//!
//! let hello = dispatcher.dispatch(Request::new(Method::GET, "/users/rod")).await.unwrap();
//! assert_eq!(hello.body_text(), "Hello rod!");
//! assert_eq!(hello.header("x-test"), Some("1"));
//!
//! let missing = dispatcher.dispatch(Request::new(Method::GET, "/missing")).await.unwrap();
//! assert_eq!(missing.status, 404);
//! # });
//! ```

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod pattern;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{Context, Dispatcher, Handler, HandlerResult};
pub use error::{HandlerError, RouterError};
pub use pattern::{PathMatch, PathMatcher};
pub use router::{join_path, MethodFilter, Route, RouteTable, Router};
pub use server::{QueryParams, QueryValue, Request, Response};
