//! HTTP server setup.
//!
//! # Responsibilities
//! - Expose a [`Router`] as an axum service
//! - Bind the service to a listener with connect info and request tracing
//! - Stop accepting on shutdown and drain in-flight requests

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::routing::Router;

impl Router {
    /// An axum service that dispatches every request to this router.
    pub fn into_service(self: Arc<Self>) -> axum::Router {
        axum::Router::new().fallback(move |req: Request<Body>| {
            let router = self.clone();
            async move { router.serve(req).await }
        })
    }
}

/// HTTP server for a router.
pub struct HttpServer {
    router: Arc<Router>,
}

impl HttpServer {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.router.len(), "HTTP server starting");

        let app = self
            .router
            .into_service()
            .layer(TraceLayer::new_for_http())
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
