use http::Method;

use super::core::DispatchState;
use crate::error::HandlerError;
use crate::ids::RequestId;
use crate::pattern::ParamVec;
use crate::server::{QueryParams, Request, Response};

/// Per-invocation view of a dispatch handed to a handler
///
/// Holds the captures of the route being invoked and exclusive access to the
/// request's dispatch state for the duration of the call.
pub struct Context<'a> {
    state: &'a mut DispatchState,
    params: ParamVec,
    route_id: usize,
}

impl<'a> Context<'a> {
    pub(super) fn new(state: &'a mut DispatchState, params: ParamVec, route_id: usize) -> Self {
        Self {
            state,
            params,
            route_id,
        }
    }

    /// Get a path capture by name
    ///
    /// Uses "last write wins" semantics for names repeated in the pattern.
    /// The wildcard remainder is available under `"0"`.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All path captures in path order
    #[must_use]
    pub fn params(&self) -> &ParamVec {
        &self.params
    }

    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.state.query
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        &self.state.request
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.state.request.method
    }

    /// The resolved request path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.state.path
    }

    /// The shared response accumulated so far
    ///
    /// After [`Context::next`] returns this is the committed response, if a
    /// later route committed one.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.state.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.state.response
    }

    /// Whether some route has committed a response
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.state.committed
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.state.request_id
    }

    /// Id of the route whose handler is running
    #[must_use]
    pub fn route_id(&self) -> usize {
        self.route_id
    }

    /// Run the remaining matching routes, then return here
    ///
    /// Returning `Ok(None)` from a handler after calling `next` leaves the
    /// outcome to the rest of the chain; returning `Ok(Some(..))` replaces
    /// whatever was committed.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by a later handler.
    pub async fn next(&mut self) -> Result<(), HandlerError> {
        self.state.advance().await
    }
}
