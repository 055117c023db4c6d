use futures::future::BoxFuture;

use super::Context;
use crate::error::HandlerError;
use crate::server::Response;

/// Outcome of one handler invocation
///
/// - `Ok(Some(response))` commits `response` and stops the walk
/// - `Ok(None)` falls through to the next matching route
/// - `Err(e)` aborts the dispatch and is returned to the caller unchanged
pub type HandlerResult = Result<Option<Response>, HandlerError>;

/// A route handler or middleware
///
/// Closures of the shape `|cx| Box::pin(async move { ... })` implement this
/// trait directly. Implement it by hand for handlers that carry state.
///
/// ```
/// use chainrouter::dispatcher::{Context, Handler, HandlerResult};
/// use chainrouter::server::Response;
/// use futures::future::BoxFuture;
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// impl Handler for Greeter {
///     fn call<'a>(&'a self, cx: Context<'a>) -> BoxFuture<'a, HandlerResult> {
///         Box::pin(async move {
///             let name = cx.param("name").unwrap_or("world");
///             Ok(Some(Response::text(format!("{}, {name}!", self.greeting))))
///         })
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call<'a>(&'a self, cx: Context<'a>) -> BoxFuture<'a, HandlerResult>;
}

impl<F> Handler for F
where
    F: for<'a> Fn(Context<'a>) -> BoxFuture<'a, HandlerResult> + Send + Sync + 'static,
{
    fn call<'a>(&'a self, cx: Context<'a>) -> BoxFuture<'a, HandlerResult> {
        (self)(cx)
    }
}
