//! # Dispatcher Module
//!
//! Walks a frozen route table for each request and runs matching handlers as
//! a short-circuiting middleware chain.
//!
//! ## Overview
//!
//! Routes are tried in registration order. A route is skipped without running
//! its handler when its method filter rejects the request method or its
//! pattern does not match the path. A matching route's handler receives a
//! [`Context`] and returns a [`HandlerResult`]:
//!
//! - `Ok(Some(response))` commits: the walk stops and `response` becomes final
//! - `Ok(None)` falls through: the walk continues with the next route, keeping
//!   whatever the handler did to the shared response
//! - `Err(e)` aborts the request and surfaces `e` from [`Dispatcher::dispatch`]
//!
//! If the table runs out with nothing committed, the shared response is
//! thrown away and a `404` is returned.
//!
//! ## Middleware
//!
//! A handler can call [`Context::next`] to run the rest of the chain and then
//! resume. When `next` returns, [`Context::response`] holds the committed
//! response (if any) and may still be changed through
//! [`Context::response_mut`] before the middleware itself returns `Ok(None)`.
//!
//! ```
//! use chainrouter::router::Router;
//! use chainrouter::server::{Request, Response};
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
//!     .get("/", |_cx| Box::pin(async move { Ok(Some(Response::text("Hello"))) }))
//!     .unwrap();
//!
//! let dispatcher = router.into_dispatcher();
//! let response = dispatcher.dispatch(Request::new(Method::GET, "/")).await.unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(response.header("X-Test"), Some("1"));
//! # });
//! ```
//!
//! ## Concurrency
//!
//! A [`Dispatcher`] never mutates its table. Each call to `dispatch` owns its
//! cursor and shared response, so requests can run in parallel on any
//! executor without locking.

mod context;
mod core;
mod handler;

pub use self::core::Dispatcher;
pub use context::Context;
pub use handler::{Handler, HandlerResult};
