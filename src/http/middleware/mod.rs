//! Handler middleware.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → Middleware::wrap (innermost declared last)
//!     → ...
//!     → Middleware::wrap (outermost declared first)
//!     → served Handler
//! ```
//!
//! # Design Decisions
//! - A middleware is a pure "wrap a handler" transform; the router decides
//!   the order in which transforms are applied
//! - Closures and tower layers are both accepted via thin adapters

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;
use tower::{Layer, Service};

use crate::http::handler::Handler;

pub mod access_log;
pub mod restrict_method;

pub use access_log::AccessLog;
pub use restrict_method::RestrictMethod;

/// Wraps a handler, producing a new handler.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: Handler) -> Handler;
}

/// A middleware shared between path entries.
pub type SharedMiddleware = Arc<dyn Middleware>;

impl<M> Middleware for Arc<M>
where
    M: Middleware + ?Sized,
{
    fn wrap(&self, next: Handler) -> Handler {
        (**self).wrap(next)
    }
}

/// Middleware built from a closure. See [`middleware_fn`].
#[derive(Clone)]
pub struct MiddlewareFn<F> {
    f: F,
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(Handler) -> Handler + Send + Sync,
{
    fn wrap(&self, next: Handler) -> Handler {
        (self.f)(next)
    }
}

impl<F> fmt::Debug for MiddlewareFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareFn").finish_non_exhaustive()
    }
}

/// Lift a `Fn(Handler) -> Handler` closure into a [`Middleware`].
pub fn middleware_fn<F>(f: F) -> MiddlewareFn<F>
where
    F: Fn(Handler) -> Handler + Send + Sync,
{
    MiddlewareFn { f }
}

/// Adapter that applies a tower [`Layer`] as router middleware.
///
/// ```ignore
/// path("/api").use_middleware(LayerMiddleware::new(TraceLayer::new_for_http()))
/// ```
#[derive(Debug, Clone)]
pub struct LayerMiddleware<L> {
    layer: L,
}

impl<L> LayerMiddleware<L> {
    pub fn new(layer: L) -> Self {
        Self { layer }
    }
}

impl<L> Middleware for LayerMiddleware<L>
where
    L: Layer<Handler> + Send + Sync,
    L::Service: Service<Request<Body>, Error = Infallible> + Clone + Send + Sync + 'static,
    <L::Service as Service<Request<Body>>>::Response: IntoResponse,
    <L::Service as Service<Request<Body>>>::Future: Send + 'static,
{
    fn wrap(&self, next: Handler) -> Handler {
        Handler::from_service(self.layer.layer(next))
    }
}

/// Resolve a middleware by its configuration name.
pub fn by_name(name: &str) -> Option<SharedMiddleware> {
    match name {
        "access_log" => Some(Arc::new(AccessLog::new())),
        "trace" => Some(Arc::new(LayerMiddleware::new(
            tower_http::trace::TraceLayer::new_for_http(),
        ))),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const KNOWN_MIDDLEWARES: &[&str] = &["access_log", "trace"];
