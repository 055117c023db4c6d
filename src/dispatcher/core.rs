//! Dispatcher core module - hot path for request dispatch.
//!
//! # JSF Compliance (Rule 206)
//!
//! Route tables are frozen before the first request; dispatch only reads
//! them. Per-request state lives in [`DispatchState`] and is never shared.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

use super::Context;
use crate::error::HandlerError;
use crate::ids::RequestId;
use crate::pattern::ParamVec;
use crate::router::{Route, RouteTable};
use crate::runtime_config::RuntimeConfig;
use crate::server::{QueryParams, Request, Response};

/// Per-request dispatch state
///
/// Holds the cursor into the route table, the shared response that handlers
/// mutate, and whether a handler has committed a response yet. Created at the
/// start of [`Dispatcher::dispatch`] and dropped at its end.
pub(crate) struct DispatchState {
    table: Arc<RouteTable>,
    config: Arc<RuntimeConfig>,
    /// Index of the next route to try
    cursor: usize,
    started: Instant,
    pub(super) request: Request,
    pub(super) path: String,
    pub(super) query: QueryParams,
    pub(super) request_id: RequestId,
    pub(super) response: Response,
    pub(super) committed: bool,
}

impl DispatchState {
    fn new(
        table: Arc<RouteTable>,
        config: Arc<RuntimeConfig>,
        request: Request,
        request_id: RequestId,
    ) -> Self {
        let path = request.path().into_owned();
        let query = request.query();
        Self {
            table,
            config,
            cursor: 0,
            started: Instant::now(),
            request,
            path,
            query,
            request_id,
            response: Response::default(),
            committed: false,
        }
    }

    fn match_route(&self, route: &Route) -> Option<ParamVec> {
        if !route.methods().allows(&self.request.method) {
            debug!(route_id = route.id(), pattern = route.pattern(), "Route skipped: method");
            return None;
        }

        let start = Instant::now();
        let matched = route.matcher().match_path(&self.path);
        let elapsed_us = start.elapsed().as_micros();
        if elapsed_us > u128::from(self.config.slow_match_us) {
            warn!(
                route_id = route.id(),
                pattern = route.pattern(),
                path = %self.path,
                duration_us = elapsed_us,
                threshold_us = self.config.slow_match_us,
                "Slow route matching detected"
            );
        }

        match matched {
            Some(m) => {
                debug!(route_id = route.id(), pattern = route.pattern(), "Route matched");
                Some(m.into_captures())
            }
            None => {
                debug!(route_id = route.id(), pattern = route.pattern(), "Route skipped: path");
                None
            }
        }
    }

    /// Try the remaining routes in order until one commits or the table ends.
    ///
    /// A handler calling [`Context::next`] re-enters this loop for the routes
    /// after its own, so nested calls share one cursor and each route runs at
    /// most once per request.
    pub(super) fn advance(&mut self) -> BoxFuture<'_, Result<(), HandlerError>> {
        Box::pin(async move {
            let table = Arc::clone(&self.table);
            while !self.committed {
                let Some(route) = table.get(self.cursor) else {
                    return Ok(());
                };
                self.cursor += 1;

                let Some(captures) = self.match_route(route) else {
                    continue;
                };

                let outcome = route
                    .handler()
                    .call(Context::new(&mut *self, captures, route.id()))
                    .await?;

                if let Some(response) = outcome {
                    info!(
                        route_id = route.id(),
                        pattern = route.pattern(),
                        status = response.status,
                        duration_us = self.started.elapsed().as_micros(),
                        "Response committed"
                    );
                    self.response = response;
                    self.committed = true;
                }
            }
            Ok(())
        })
    }
}

/// Frozen route table plus runtime settings, ready to serve requests
///
/// Cheap to clone; clones share the same table. Safe to call
/// [`Dispatcher::dispatch`] concurrently from any number of tasks.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    config: Arc<RuntimeConfig>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: RouteTable, config: RuntimeConfig) -> Self {
        Self {
            table: Arc::new(table),
            config: Arc::new(config),
        }
    }

    /// Routes in registration order
    #[must_use]
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.table.iter()
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run one request through the route table
    ///
    /// Returns the committed response, or a `404` with the configured body if
    /// no handler committed. Mutations made to the shared response are
    /// discarded in the latter case.
    ///
    /// # Errors
    ///
    /// The first error returned by a handler, unchanged.
    pub async fn dispatch(&self, request: Request) -> Result<Response, HandlerError> {
        let request_id = RequestId::for_request(&request);
        let mut state = DispatchState::new(
            Arc::clone(&self.table),
            Arc::clone(&self.config),
            request,
            request_id,
        );
        let span = info_span!(
            "dispatch",
            request_id = %request_id,
            method = %state.request.method,
            path = %state.path,
        );

        async move {
            state.advance().await?;
            if state.committed {
                return Ok(state.response);
            }
            warn!(
                routes = state.table.len(),
                duration_us = state.started.elapsed().as_micros(),
                "No route matched"
            );
            Ok(Response::not_found(state.config.not_found_body.as_str()))
        }
        .instrument(span)
        .await
    }
}
