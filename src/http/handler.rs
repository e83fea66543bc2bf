//! Terminal request handlers.
//!
//! # Responsibilities
//! - Type-erase async request functions behind one cheap-to-clone type
//! - Adapt arbitrary tower services into handlers
//! - Expose handlers back to tower as `Service<Request<Body>>`
//!
//! # Design Decisions
//! - Handlers never fail: errors are responses (`Error = Infallible`)
//! - Shared via `Arc` so middleware chains can clone them freely

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tower::{Service, ServiceExt};

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;

/// A type-erased async request handler.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Create a handler from an async function.
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let inner: Arc<HandlerFn> =
            Arc::new(move |req: Request<Body>| f(req).map(|res| res.into_response()).boxed());
        Self { inner }
    }

    /// Adapt a clonable tower service.
    ///
    /// Each request is served by a fresh clone driven with `oneshot`, so the
    /// service's readiness is honoured without sharing `&mut` state.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse,
        S::Future: Send + 'static,
    {
        Self::new(move |req: Request<Body>| {
            let service = service.clone();
            async move {
                match service.oneshot(req).await {
                    Ok(res) => res.into_response(),
                    Err(never) => match never {},
                }
            }
        })
    }

    /// Run the handler against a request.
    pub fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self.inner)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl Service<Request<Body>> for Handler {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.handle(req).map(Ok).boxed()
    }
}

/// Shorthand for [`Handler::new`].
pub fn handler_fn<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Handler::new(f)
}

/// The response used when no handler is bound to a request path.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
