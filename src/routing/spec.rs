//! Per-path route entries.
//!
//! # Lifecycle
//! ```text
//! path("/foo").use_middleware(..).get(..)   caller builds the entry
//!     → Router::route                       inherited middlewares linked
//!     → first request                       chain compiled and published
//!     → ancestor registered later           invalidated, re-linked, recompiled
//! ```
//!
//! # Design Decisions
//! - `PathSpec` is a shared handle; clones refer to the same entry
//! - Compilation publishes through `ArcSwapOption` so the hot path is a
//!   single atomic load; a per-entry mutex makes exactly one builder win
//! - Execution order, outermost first: inherited (root to nearest ancestor),
//!   direct (declaration order), terminal handler

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use parking_lot::{Mutex, RwLock};

use crate::http::handler::{handler_fn, not_found, Handler};
use crate::http::middleware::{Middleware, RestrictMethod, SharedMiddleware};
use crate::observability::metrics;

/// Mutable configuration of an entry.
struct Definition {
    direct: Vec<SharedMiddleware>,
    inherited: Vec<SharedMiddleware>,
    inherit: bool,
    handler: Option<Handler>,
}

struct Inner {
    pattern: String,
    definition: RwLock<Definition>,
    compiled: ArcSwapOption<Handler>,
    // Held while building or discarding the compiled handler.
    compile_lock: Mutex<()>,
}

/// A single routing entry: pattern, middlewares and terminal handler.
#[derive(Clone)]
pub struct PathSpec {
    inner: Arc<Inner>,
}

/// Create a route entry for `pattern`.
///
/// Trailing separators are dropped (`/foo/` becomes `/foo`); the root stays
/// `/`. The pattern is not validated until it is registered with a router.
pub fn path(pattern: impl Into<String>) -> PathSpec {
    PathSpec::new(pattern)
}

fn normalize(pattern: String) -> String {
    let trimmed = pattern.trim_end_matches('/');
    if trimmed.is_empty() && pattern.starts_with('/') {
        "/".to_string()
    } else if trimmed.len() == pattern.len() {
        pattern
    } else {
        trimmed.to_string()
    }
}

impl PathSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                pattern: normalize(pattern.into()),
                definition: RwLock::new(Definition {
                    direct: Vec::new(),
                    inherited: Vec::new(),
                    inherit: true,
                    handler: None,
                }),
                compiled: ArcSwapOption::empty(),
                compile_lock: Mutex::new(()),
            }),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.inner.pattern
    }

    /// Append a middleware to this entry.
    ///
    /// Has no effect on an entry that is already compiled.
    pub fn use_middleware<M>(self, middleware: M) -> Self
    where
        M: Middleware + 'static,
    {
        self.inner.definition.write().direct.push(Arc::new(middleware));
        self
    }

    /// Append several shared middlewares, in order.
    pub fn use_middlewares<I>(self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = SharedMiddleware>,
    {
        self.inner.definition.write().direct.extend(middlewares);
        self
    }

    /// Insert middlewares ahead of the ones already declared.
    pub fn prepend_middlewares<I>(self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = SharedMiddleware>,
    {
        {
            let mut definition = self.inner.definition.write();
            let mut direct: Vec<SharedMiddleware> = middlewares.into_iter().collect();
            direct.append(&mut definition.direct);
            definition.direct = direct;
        }
        self
    }

    /// Whether ancestor middlewares apply to this entry (default `true`).
    ///
    /// A non-inheriting entry also only answers for its exact path.
    pub fn inherit(self, inherit: bool) -> Self {
        self.inner.definition.write().inherit = inherit;
        self
    }

    /// Bind the terminal handler, restricted to `method`.
    ///
    /// Calling this again replaces the previous handler.
    pub fn method(self, method: Method, handler: Handler) -> Self {
        let handler = RestrictMethod::new(method).wrap(handler);
        self.inner.definition.write().handler = Some(handler);
        self
    }

    pub fn get(self, handler: Handler) -> Self {
        self.method(Method::GET, handler)
    }

    pub fn post(self, handler: Handler) -> Self {
        self.method(Method::POST, handler)
    }

    pub fn put(self, handler: Handler) -> Self {
        self.method(Method::PUT, handler)
    }

    pub fn patch(self, handler: Handler) -> Self {
        self.method(Method::PATCH, handler)
    }

    pub fn delete(self, handler: Handler) -> Self {
        self.method(Method::DELETE, handler)
    }

    pub fn head(self, handler: Handler) -> Self {
        self.method(Method::HEAD, handler)
    }

    pub fn options(self, handler: Handler) -> Self {
        self.method(Method::OPTIONS, handler)
    }

    /// True if a terminal handler is bound. Entries without one only anchor
    /// middleware inheritance.
    pub fn has_handler(&self) -> bool {
        self.inner.definition.read().handler.is_some()
    }

    pub fn inherits(&self) -> bool {
        self.inner.definition.read().inherit
    }

    pub fn is_compiled(&self) -> bool {
        self.inner.compiled.load().is_some()
    }

    pub fn direct_middleware_count(&self) -> usize {
        self.inner.definition.read().direct.len()
    }

    pub fn inherited_middleware_count(&self) -> usize {
        self.inner.definition.read().inherited.len()
    }

    /// True if both handles refer to the same entry.
    pub fn ptr_eq(&self, other: &PathSpec) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Serve a request, compiling the handler chain first if needed.
    pub async fn serve(&self, req: Request<Body>) -> Response {
        let handler = self.compiled_handler();
        handler.handle(req).await
    }

    pub(crate) fn direct_middlewares(&self) -> Vec<SharedMiddleware> {
        self.inner.definition.read().direct.clone()
    }

    /// Drop the compiled chain and the inherited middlewares.
    pub(crate) fn invalidate(&self) {
        self.relink(Vec::new());
    }

    /// Invalidate and install a new inherited list in one step, so no
    /// request can compile against a half-linked entry.
    pub(crate) fn relink(&self, inherited: Vec<SharedMiddleware>) {
        let _guard = self.inner.compile_lock.lock();
        self.inner.compiled.store(None);
        self.inner.definition.write().inherited = inherited;
    }

    /// A fresh entry at `pattern` with this entry's handler, inherit flag and
    /// direct middlewares. Inherited middlewares are not carried over.
    pub(crate) fn copy_to(&self, pattern: String) -> PathSpec {
        let copy = PathSpec::new(pattern);
        {
            let source = self.inner.definition.read();
            let mut target = copy.inner.definition.write();
            target.direct = source.direct.clone();
            target.inherit = source.inherit;
            target.handler = source.handler.clone();
        }
        copy
    }

    fn compiled_handler(&self) -> Arc<Handler> {
        if let Some(handler) = self.inner.compiled.load_full() {
            return handler;
        }

        let _guard = self.inner.compile_lock.lock();
        // Another request may have finished compiling while we waited.
        if let Some(handler) = self.inner.compiled.load_full() {
            return handler;
        }

        let handler = Arc::new(self.compile());
        self.inner.compiled.store(Some(handler.clone()));
        metrics::record_compilation();
        tracing::trace!(pattern = %self.inner.pattern, "Compiled handler chain");
        handler
    }

    fn compile(&self) -> Handler {
        let definition = self.inner.definition.read();
        let mut handler = definition
            .handler
            .clone()
            .unwrap_or_else(|| handler_fn(|_req: Request<Body>| async { not_found() }));
        for middleware in definition.direct.iter().rev() {
            handler = middleware.wrap(handler);
        }
        for middleware in definition.inherited.iter().rev() {
            handler = middleware.wrap(handler);
        }
        handler
    }
}

impl fmt::Debug for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definition = self.inner.definition.read();
        f.debug_struct("PathSpec")
            .field("pattern", &self.inner.pattern)
            .field("direct", &definition.direct.len())
            .field("inherited", &definition.inherited.len())
            .field("inherit", &definition.inherit)
            .field("has_handler", &definition.handler.is_some())
            .field("compiled", &self.is_compiled())
            .finish()
    }
}
