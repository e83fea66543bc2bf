//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, connect info, tracing layer)
//!     → Router::serve (path lookup, cache)
//!     → PathSpec (compiled middleware chain)
//!     → handler.rs (terminal handler)
//! ```

pub mod handler;
pub mod middleware;
pub mod server;

pub use handler::{handler_fn, Handler};
pub use server::HttpServer;
