//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the router binary.
//! All types derive Serde traits for deserialization from config files.

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Lookup settings.
    pub routing: RoutingConfig,

    /// Route entries, registered in one call.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Maximum number of resolved request paths kept in the lookup cache.
    /// `0` disables caching.
    pub cache_capacity: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Default for [`RoutingConfig::cache_capacity`].
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// One route entry.
///
/// Entries without a `body` are directories: they only carry middlewares
/// for the entries below them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Absolute path pattern.
    pub path: String,

    /// HTTP method the handler answers (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Static response body.
    #[serde(default)]
    pub body: Option<String>,

    /// Response status (default: 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Middleware names, outermost first.
    #[serde(default)]
    pub middlewares: Vec<String>,

    /// Inherit middlewares from ancestor entries (default: true).
    #[serde(default = "default_inherit")]
    pub inherit: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status() -> u16 {
    200
}

fn default_inherit() -> bool {
    true
}

impl RouteConfig {
    /// A directory entry at `path`.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: default_method(),
            body: None,
            status: default_status(),
            middlewares: Vec::new(),
            inherit: default_inherit(),
        }
    }

    /// Parsed method, `None` if `method` is not a valid HTTP token.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.method.as_bytes()).ok()
    }

    /// Parsed status, `None` outside 100..=999.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }
}
