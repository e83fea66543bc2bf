//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use path_router::{handler_fn, middleware_fn, Handler, Middleware, Router, Shutdown};
use tokio::net::TcpListener;

/// Middleware that appends `"{i}\n"` to the body after the downstream
/// handler has written.
pub fn add_count(i: usize) -> impl Middleware {
    middleware_fn(move |next: Handler| {
        handler_fn(move |req: Request<Body>| {
            let next = next.clone();
            async move {
                let res = next.handle(req).await;
                let (mut parts, body) = res.into_parts();
                let mut bytes = to_bytes(body, usize::MAX).await.unwrap().to_vec();
                bytes.extend_from_slice(format!("{i}\n").as_bytes());
                parts.headers.remove(header::CONTENT_LENGTH);
                Response::from_parts(parts, Body::from(bytes))
            }
        })
    })
}

/// Handler that echoes the request path.
pub fn print_path() -> Handler {
    handler_fn(|req: Request<Body>| async move { req.uri().path().to_string() })
}

/// Handler that answers with a fixed body.
pub fn text(body: &'static str) -> Handler {
    handler_fn(move |_req: Request<Body>| async move { (StatusCode::OK, body) })
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn into_text(res: Response) -> (StatusCode, String) {
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Serve `router` on an ephemeral port. Returns the bound address and the
/// shutdown handle.
pub async fn spawn_server(router: Arc<Router>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = path_router::HttpServer::new(router)
            .run(listener, server_shutdown)
            .await;
    });

    (addr, shutdown)
}
