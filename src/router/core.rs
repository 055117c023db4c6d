//! Route table and registration.
//!
//! Everything here runs at setup time. Once a [`Router`] is turned into a
//! [`Dispatcher`] the table is frozen behind an `Arc` and only read.

use futures::future::BoxFuture;
use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::path::join_path;
use crate::dispatcher::{Context, Dispatcher, Handler, HandlerResult};
use crate::error::RouterError;
use crate::pattern::{PathMatch, PathMatcher};
use crate::runtime_config::RuntimeConfig;

/// Which request methods a route accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    /// Any method
    All,
    /// Only the listed methods (never empty)
    Only(SmallVec<[Method; 2]>),
}

impl MethodFilter {
    #[must_use]
    pub fn only(method: Method) -> Self {
        let mut methods = SmallVec::new();
        methods.push(method);
        MethodFilter::Only(methods)
    }

    /// A filter accepting any of `methods`, or `None` if the list is empty
    #[must_use]
    pub fn any_of(methods: impl IntoIterator<Item = Method>) -> Option<Self> {
        let mut list: SmallVec<[Method; 2]> = SmallVec::new();
        for method in methods {
            if !list.contains(&method) {
                list.push(method);
            }
        }
        (!list.is_empty()).then_some(MethodFilter::Only(list))
    }

    #[inline]
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            MethodFilter::All => true,
            MethodFilter::Only(methods) => methods.contains(method),
        }
    }
}

impl From<Method> for MethodFilter {
    fn from(method: Method) -> Self {
        MethodFilter::only(method)
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodFilter::All => f.write_str("ALL"),
            MethodFilter::Only(methods) => {
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(method.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// One registered rule: method filter, pattern, and handler
///
/// Immutable once created. The matcher is compiled from exactly this route's
/// pattern and is not shared with other routes' trees.
#[derive(Clone)]
pub struct Route {
    id: usize,
    pattern: String,
    methods: MethodFilter,
    handler: Arc<dyn Handler>,
    matcher: Arc<PathMatcher>,
}

impl Route {
    /// Position in the owning table, ascending in registration order
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The normalized pattern, base path included
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn methods(&self) -> &MethodFilter {
        &self.methods
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[must_use]
    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    /// Test this route against a request without running its handler
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> Option<PathMatch> {
        if !self.methods.allows(method) {
            return None;
        }
        self.matcher.match_path(path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Append-only, ordered list of routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Route> {
        self.routes.get(idx)
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Compile `pattern` and append a new route for it
    fn push(
        &mut self,
        methods: MethodFilter,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<&Route, RouterError> {
        let matcher = PathMatcher::compile(pattern)?;
        Ok(self.push_compiled(methods, matcher, handler))
    }

    /// Append a route around an already compiled matcher
    fn push_compiled(
        &mut self,
        methods: MethodFilter,
        matcher: PathMatcher,
        handler: Arc<dyn Handler>,
    ) -> &Route {
        let route = Route {
            id: self.routes.len(),
            pattern: matcher.pattern().to_string(),
            methods,
            handler,
            matcher: Arc::new(matcher),
        };
        debug!(
            route_id = route.id,
            methods = %route.methods,
            pattern = %route.pattern,
            "Route registered"
        );
        self.routes.push(route);
        &self.routes[self.routes.len() - 1]
    }

    /// Append an existing route unchanged except for its id
    fn splice(&mut self, route: &Route) {
        let mut copy = route.clone();
        copy.id = self.routes.len();
        debug!(
            route_id = copy.id,
            methods = %copy.methods,
            pattern = %copy.pattern,
            "Route spliced"
        );
        self.routes.push(copy);
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

macro_rules! method_routes {
    ($($(#[$doc:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// [`RouterError::InvalidPattern`] for a malformed pattern.
            pub fn $name<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouterError>
            where
                F: for<'a> Fn(Context<'a>) -> BoxFuture<'a, HandlerResult> + Send + Sync + 'static,
            {
                self.route(MethodFilter::only(Method::$method), pattern, Arc::new(handler))
            }
        )*
    };
}

/// Builder for a route table
///
/// Routes are tried in the order they are registered. A route registered for
/// `"*"` with [`Router::all`] ahead of the others acts as middleware for every
/// request.
///
/// ```
/// use chainrouter::router::Router;
/// use chainrouter::server::Response;
///
/// let mut router = Router::new();
/// router
///     .get("/users/:id", |cx| {
///         Box::pin(async move {
///             let id = cx.param("id").unwrap_or_default().to_string();
///             Ok(Some(Response::text(id)))
///         })
///     })
///     .unwrap();
/// assert_eq!(router.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
    merge_prefix: Option<String>,
    table: RouteTable,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_path: "/".to_string(),
            merge_prefix: None,
            table: RouteTable::default(),
        }
    }

    /// A router whose patterns are all registered below `base_path`
    #[must_use]
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            base_path: if base_path.is_empty() {
                "/".to_string()
            } else {
                base_path.to_string()
            },
            ..Self::new()
        }
    }

    /// Declare the prefix this router expects to be merged under
    ///
    /// Checked by [`Router::merge`] on the parent.
    #[must_use]
    pub fn with_merge_prefix(mut self, prefix: &str) -> Self {
        self.merge_prefix = Some(prefix.to_string());
        self
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn merge_prefix(&self) -> Option<&str> {
        self.merge_prefix.as_deref()
    }

    /// Register a route for a method filter and shared handler
    ///
    /// `pattern` is joined onto the router's base path before compiling.
    /// Each route compiles its own matcher, so two routes such as `/:a` and
    /// `/:b` never raise [`RouterError::ParameterNameConflict`] against each
    /// other; both register and are tried in order.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for a malformed pattern.
    pub fn route(
        &mut self,
        methods: MethodFilter,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<&mut Self, RouterError> {
        let full = join_path(&self.base_path, pattern);
        self.table.push(methods, &full, handler)?;
        Ok(self)
    }

    method_routes! {
        /// Register a `GET` route
        get => GET,
        /// Register a `POST` route
        post => POST,
        /// Register a `PUT` route
        put => PUT,
        /// Register a `DELETE` route
        delete => DELETE,
        /// Register a `PATCH` route
        patch => PATCH,
        /// Register a `HEAD` route
        head => HEAD,
        /// Register an `OPTIONS` route
        options => OPTIONS,
        /// Register a `CONNECT` route
        connect => CONNECT,
        /// Register a `TRACE` route
        trace => TRACE,
    }

    /// Register a route for every method
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for a malformed pattern.
    pub fn all<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouterError>
    where
        F: for<'a> Fn(Context<'a>) -> BoxFuture<'a, HandlerResult> + Send + Sync + 'static,
    {
        self.route(MethodFilter::All, pattern, Arc::new(handler))
    }

    /// Re-register every route of `other` below `prefix`
    ///
    /// Routes keep their method filters and handlers and are appended in
    /// `other`'s order. Each is recompiled from `join_path(prefix, pattern)`.
    ///
    /// # Errors
    ///
    /// Any [`RouterError`] raised while compiling a joined pattern. Every
    /// joined pattern is compiled first, so nothing is appended on error.
    pub fn compose(&mut self, prefix: &str, other: &Router) -> Result<&mut Self, RouterError> {
        let compiled = other
            .table
            .iter()
            .map(|route| {
                let pattern = join_path(&self.base_path, &join_path(prefix, route.pattern()));
                PathMatcher::compile(&pattern).map(|matcher| (route, matcher))
            })
            .collect::<Result<Vec<_>, RouterError>>()?;

        for (route, matcher) in compiled {
            self.table
                .push_compiled(route.methods.clone(), matcher, Arc::clone(&route.handler));
        }
        debug!(prefix, count = other.len(), "Router composed");
        Ok(self)
    }

    /// Splice every route of `other` into this table without rewriting paths
    ///
    /// # Errors
    ///
    /// [`RouterError::PrefixMismatch`] unless `other` was declared with
    /// [`Router::with_merge_prefix`] equal to `prefix`. Nothing is appended
    /// on error.
    pub fn merge(&mut self, prefix: &str, other: &Router) -> Result<&mut Self, RouterError> {
        if other.merge_prefix() != Some(prefix) {
            return Err(RouterError::PrefixMismatch {
                expected: prefix.to_string(),
                found: other.merge_prefix().unwrap_or_default().to_string(),
            });
        }
        for route in &other.table {
            self.table.splice(route);
        }
        debug!(prefix, count = other.len(), "Router merged");
        Ok(self)
    }

    /// Routes in registration order
    #[must_use]
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.table.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!(
            "[routes] base_path={} count={}",
            self.base_path,
            self.table.len()
        );
        for route in &self.table {
            println!("[route] #{} {} {}", route.id, route.methods, route.pattern);
        }
    }

    /// Freeze the table, reading runtime settings from the environment
    #[must_use]
    pub fn into_dispatcher(self) -> Dispatcher {
        self.into_dispatcher_with(RuntimeConfig::from_env())
    }

    /// Freeze the table with explicit runtime settings
    #[must_use]
    pub fn into_dispatcher_with(self, config: RuntimeConfig) -> Dispatcher {
        let routes_summary: Vec<String> = self
            .table
            .iter()
            .take(10)
            .map(|route| format!("{} {}", route.methods, route.pattern))
            .collect();

        info!(
            routes_count = self.table.len(),
            base_path = %self.base_path,
            routes_summary = ?routes_summary,
            "Routing table frozen"
        );

        Dispatcher::new(self.table, config)
    }
}
