//! Method restriction.
//!
//! Binds a handler to exactly one HTTP verb. Other verbs receive
//! `405 Method Not Allowed` with an `Allow` header naming the bound verb.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;

use crate::http::handler::Handler;
use crate::http::middleware::Middleware;

/// Middleware that only lets one HTTP method through.
#[derive(Debug, Clone)]
pub struct RestrictMethod {
    method: Method,
}

impl RestrictMethod {
    pub fn new(method: Method) -> Self {
        Self { method }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl Middleware for RestrictMethod {
    fn wrap(&self, next: Handler) -> Handler {
        let method = self.method().clone();
        Handler::new(move |req: Request<Body>| {
            let next = next.clone();
            let method = method.clone();
            async move {
                if *req.method() != method {
                    tracing::debug!(
                        expected = %method,
                        actual = %req.method(),
                        path = %req.uri().path(),
                        "Method not allowed"
                    );
                    return (
                        StatusCode::METHOD_NOT_ALLOWED,
                        [(header::ALLOW, method.to_string())],
                        "Method Not Allowed",
                    )
                        .into_response();
                }
                next.handle(req).await
            }
        })
    }
}
