//! Hierarchical HTTP path router.
//!
//! Entries are registered per path; each entry inherits the middlewares of
//! the registered entries above it, and requests fall back to the nearest
//! registered ancestor directory.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{body::Body, http::Request};
//! use path_router::{handler_fn, path, AccessLog, Router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new();
//! router.route([
//!     path("/api/").use_middleware(AccessLog::new()),
//!     path("/api/hello").get(handler_fn(|_req: Request<Body>| async { "hello" })),
//! ])?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, Arc::new(router).into_service()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::handler::{handler_fn, Handler};
pub use http::middleware::{middleware_fn, AccessLog, LayerMiddleware, Middleware, RestrictMethod};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{path, walk, PathSpec, RouteError, RouteTable, RouteVisitor, Router};
