//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate route paths, methods, status codes and middleware names
//! - Detect duplicate route paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Route checks are exposed separately for callers that build routers
//!   without a full configuration
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::http::middleware::KNOWN_MIDDLEWARES;
use crate::routing::trie::segments;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),

    #[error("route path {0:?} must be absolute")]
    RelativePath(String),

    #[error("route path {0:?} is declared more than once")]
    DuplicatePath(String),

    #[error("route {path:?}: invalid method {method:?}")]
    InvalidMethod { path: String, method: String },

    #[error("route {path:?}: invalid status {status}")]
    InvalidStatus { path: String, status: u16 },

    #[error("route {path:?}: unknown middleware {name:?}")]
    UnknownMiddleware { path: String, name: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    errors.extend(validate_routes(&config.routes));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate route entries on their own.
///
/// Returns every problem found; an empty list means the routes can be
/// registered as declared.
pub fn validate_routes(routes: &[RouteConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for route in routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
        } else {
            // `/foo` and `/foo/` name the same entry
            let key = segments(&route.path).collect::<Vec<_>>().join("/");
            if !seen.insert(key) {
                errors.push(ValidationError::DuplicatePath(route.path.clone()));
            }
        }

        if route.method().is_none() {
            errors.push(ValidationError::InvalidMethod {
                path: route.path.clone(),
                method: route.method.clone(),
            });
        }
        if route.status_code().is_none() {
            errors.push(ValidationError::InvalidStatus {
                path: route.path.clone(),
                status: route.status,
            });
        }
        for name in &route.middlewares {
            if !KNOWN_MIDDLEWARES.contains(&name.as_str()) {
                errors.push(ValidationError::UnknownMiddleware {
                    path: route.path.clone(),
                    name: name.clone(),
                });
            }
        }
    }

    errors
}
