//! Access logging.
//!
//! # Responsibilities
//! - Emit one structured event per served request
//! - Record method, path, status, response size, referer, user agent, latency
//!
//! # Design Decisions
//! - Events go through `tracing` (target `access`) so the subscriber decides
//!   format and destination
//! - Remote address comes from axum's `ConnectInfo` when the server provides it

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::{Body, HttpBody};
use axum::extract::ConnectInfo;
use axum::http::{header, HeaderName, Request};
use tracing::Level;

use crate::http::handler::Handler;
use crate::http::middleware::Middleware;

macro_rules! access_event {
    ($level:expr, $($fields:tt)+) => {
        let level = $level;
        if level == Level::ERROR {
            tracing::error!(target: "access", $($fields)+);
        } else if level == Level::WARN {
            tracing::warn!(target: "access", $($fields)+);
        } else if level == Level::INFO {
            tracing::info!(target: "access", $($fields)+);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "access", $($fields)+);
        } else {
            tracing::trace!(target: "access", $($fields)+);
        }
    };
}

/// Access log middleware.
#[derive(Debug, Clone)]
pub struct AccessLog {
    level: Level,
}

impl AccessLog {
    pub fn new() -> Self {
        Self { level: Level::INFO }
    }

    /// Level at which access events are emitted.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::new()
    }
}

fn header_str(req: &Request<Body>, name: HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

impl Middleware for AccessLog {
    fn wrap(&self, next: Handler) -> Handler {
        let level = self.level;
        Handler::new(move |req: Request<Body>| {
            let next = next.clone();
            async move {
                let start = Instant::now();
                let method = req.method().clone();
                let path = req.uri().path().to_string();
                let remote_addr = req
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.to_string())
                    .unwrap_or_default();
                let referer = header_str(&req, header::REFERER);
                let user_agent = header_str(&req, header::USER_AGENT);

                let response = next.handle(req).await;

                let body_bytes_sent = response.body().size_hint().exact().unwrap_or(0);
                access_event!(
                    level,
                    remote_addr = %remote_addr,
                    http_method = %method,
                    path = %path,
                    status = response.status().as_u16(),
                    body_bytes_sent,
                    http_referer = %referer,
                    http_user_agent = %user_agent,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "access"
                );
                response
            }
        })
    }
}
