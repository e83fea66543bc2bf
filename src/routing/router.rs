//! Route registration, lookup and dispatch.
//!
//! # Responsibilities
//! - Validate and insert path entries, linking inherited middlewares
//! - Re-link already registered descendants when an ancestor arrives
//! - Resolve request paths by directory-style fallback
//! - Cache resolved request paths up to a fixed capacity, evicting on
//!   overlapping registration
//! - Mount the entries of one route table under a prefix of another
//!
//! # Design Decisions
//! - One reader/writer lock guards the index; registration is exclusive,
//!   dispatch is shared
//! - The resolved-path cache is only filled while the shared lock is held and
//!   only evicted while the exclusive lock is held
//! - The lock is never held across a handler call
//! - Validation of every entry happens before any mutation
//! - A full cache stops admitting new paths; lookups past the cap resolve
//!   through the index every time

use std::fmt;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::config::schema::DEFAULT_CACHE_CAPACITY;
use crate::config::{validate_routes, ConfigError, RouteConfig};
use crate::http::handler::{handler_fn, not_found};
use crate::http::middleware;
use crate::observability::metrics;
use crate::routing::error::RouteError;
use crate::routing::spec::{path, PathSpec};
use crate::routing::trie::{is_within, join, segments, PathTrie};

/// Receives entries during a route table walk.
pub trait RouteVisitor {
    /// Called with the full path and entry; return `false` to stop.
    fn visit(&mut self, full_path: &str, spec: &PathSpec) -> bool;
}

impl<F> RouteVisitor for F
where
    F: FnMut(&str, &PathSpec) -> bool,
{
    fn visit(&mut self, full_path: &str, spec: &PathSpec) -> bool {
        self(full_path, spec)
    }
}

/// Read access to a set of routes.
pub trait RouteTable {
    /// Resolve a request path to the entry that serves it.
    fn match_route(&self, path: &str) -> Option<PathSpec>;

    /// Visit every registered entry in path order.
    ///
    /// Tables without tree introspection keep the default, which fails with
    /// [`RouteError::WalkUnsupported`].
    fn walk(&self, visitor: &mut dyn RouteVisitor) -> Result<(), RouteError> {
        let _ = visitor;
        Err(RouteError::WalkUnsupported)
    }
}

/// Walk a route table with any visitor.
pub fn walk<T, V>(table: &T, mut visitor: V) -> Result<(), RouteError>
where
    T: RouteTable + ?Sized,
    V: RouteVisitor,
{
    table.walk(&mut visitor)
}

/// Parent directory of a request path, with a trailing separator.
///
/// `/a/b` and `/a/b/` both give `/a/`; the root has no parent.
fn parent_dir(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let idx = trimmed.rfind('/')?;
    Some(&trimmed[..=idx])
}

fn resolve(index: &PathTrie<PathSpec>, path: &str) -> Option<PathSpec> {
    if !path.starts_with('/') {
        return None;
    }
    if let Some(spec) = index.get(path) {
        return Some(spec.clone());
    }

    let mut current = path;
    while let Some(parent) = parent_dir(current) {
        if let Some(spec) = index.get(parent) {
            if spec.inherits() {
                return Some(spec.clone());
            }
        }
        current = parent;
    }
    None
}

/// Compute the inherited middlewares of `spec` from its ancestors and
/// install them.
fn link(index: &PathTrie<PathSpec>, spec: &PathSpec) -> Result<(), RouteError> {
    let Some(node) = index.get_node(spec.pattern()) else {
        tracing::error!(pattern = %spec.pattern(), "Registered path missing from index");
        return Err(RouteError::Internal {
            pattern: spec.pattern().to_string(),
        });
    };

    if !spec.inherits() {
        spec.invalidate();
        return Ok(());
    }

    let lineage: Vec<_> = node.lineage().collect();
    let ancestors = match lineage.split_last() {
        Some((_, ancestors)) => ancestors,
        None => &[],
    };
    let inherited: Vec<_> = ancestors
        .iter()
        .filter_map(|ancestor| ancestor.value())
        .flat_map(|ancestor| ancestor.direct_middlewares())
        .collect();
    tracing::debug!(
        pattern = %spec.pattern(),
        inherited = inherited.len(),
        "Linked inherited middlewares"
    );
    spec.relink(inherited);
    Ok(())
}

/// Entries at or below any pattern in `specs`, each exactly once.
///
/// Patterns nested under another pattern of the same batch are folded into
/// it, so every affected subtree is walked once.
fn affected_entries(index: &PathTrie<PathSpec>, specs: &[PathSpec]) -> Vec<PathSpec> {
    let mut patterns: Vec<Vec<&str>> = specs
        .iter()
        .map(|spec| segments(spec.pattern()).collect())
        .collect();
    // Sorted by segments, an ancestor comes right before its descendants.
    patterns.sort_unstable();
    patterns.dedup();

    let mut affected = Vec::new();
    let mut subtree: Option<&Vec<&str>> = None;
    for pattern in &patterns {
        if subtree.is_some_and(|root| pattern.starts_with(root)) {
            continue;
        }
        subtree = Some(pattern);
        index.walk_prefix(&format!("/{}", pattern.join("/")), |_, entry| {
            affected.push(entry.clone());
            true
        });
    }
    affected
}

/// Route entry built from one configured route.
fn spec_from_config(route: &RouteConfig) -> PathSpec {
    let middlewares = route
        .middlewares
        .iter()
        .filter_map(|name| middleware::by_name(name));
    let spec = path(route.path.as_str())
        .inherit(route.inherit)
        .use_middlewares(middlewares);

    match (&route.body, route.method(), route.status_code()) {
        (Some(body), Some(method), Some(status)) => {
            let body = body.clone();
            spec.method(
                method,
                handler_fn(move |_req: Request<Body>| {
                    let body = body.clone();
                    async move { (status, body) }
                }),
            )
        }
        _ => spec,
    }
}

/// HTTP request router over a path index.
pub struct Router {
    index: RwLock<PathTrie<PathSpec>>,
    cache: DashMap<String, PathSpec>,
    cache_capacity: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.index.read().len())
            .field("cached_paths", &self.cache.len())
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(PathTrie::new()),
            cache: DashMap::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Limit the resolved-path cache to `capacity` request paths.
    /// `0` disables caching.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Build a router from configured routes.
    ///
    /// Routes are checked with [`validate_routes`] first; nothing is
    /// registered if any of them is invalid.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ConfigError> {
        let errors = validate_routes(routes);
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let router = Self::new();
        router.route(routes.iter().map(spec_from_config))?;
        Ok(router)
    }

    /// Register entries.
    ///
    /// Every entry is validated first; if any is relative or already
    /// compiled, nothing is registered.
    pub fn route<I>(&self, specs: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = PathSpec>,
    {
        let specs: Vec<PathSpec> = specs.into_iter().collect();
        for spec in &specs {
            if !spec.pattern().starts_with('/') {
                return Err(RouteError::InvalidPath {
                    pattern: spec.pattern().to_string(),
                });
            }
            if spec.is_compiled() {
                return Err(RouteError::AlreadyRegistered {
                    pattern: spec.pattern().to_string(),
                });
            }
        }
        if specs.is_empty() {
            return Ok(());
        }

        let mut index = self.index.write();
        for spec in &specs {
            index.insert(spec.pattern(), spec.clone());
            metrics::record_registration();
            tracing::debug!(pattern = %spec.pattern(), "Registered path");
        }

        // Everything at or below an inserted pattern needs (re-)linking:
        // the new entries themselves and any descendants registered earlier.
        for spec in &affected_entries(&index, &specs) {
            link(&index, spec)?;
        }

        let before = self.cache.len();
        self.cache
            .retain(|cached, _| !specs.iter().any(|spec| is_within(cached, spec.pattern())));
        let evicted = before - self.cache.len();
        if evicted > 0 {
            metrics::record_cache_evictions(evicted);
            tracing::trace!(evicted, "Evicted cached paths");
        }

        Ok(())
    }

    /// Resolve a request path.
    ///
    /// An exact entry wins; otherwise the nearest inheriting ancestor
    /// directory answers.
    pub fn match_route(&self, path: &str) -> Option<PathSpec> {
        resolve(&self.index.read(), path)
    }

    /// Dispatch a request to the entry serving its path.
    pub async fn serve(&self, req: Request<Body>) -> Response {
        let spec = match self.lookup(req.uri().path()) {
            Some(spec) => spec,
            None => {
                tracing::debug!(path = %req.uri().path(), "No route matched");
                metrics::record_request("not_found");
                return not_found();
            }
        };
        spec.serve(req).await
    }

    fn lookup(&self, path: &str) -> Option<PathSpec> {
        let index = self.index.read();

        let cached = self.cache.get(path).map(|entry| entry.value().clone());
        if let Some(spec) = cached {
            metrics::record_request("hit");
            return Some(spec);
        }

        let spec = resolve(&index, path).filter(PathSpec::has_handler)?;
        // Concurrent misses may each admit one path past the cap.
        if self.cache.len() < self.cache_capacity {
            self.cache.insert(path.to_string(), spec.clone());
        }
        metrics::record_request("miss");
        Some(spec)
    }

    /// Copy every handler-bearing entry of `source` under `prefix` and
    /// register the copies here.
    ///
    /// Copies keep their handler, inherit flag and direct middlewares;
    /// inherited middlewares are recomputed against this router.
    pub fn mount(&self, prefix: &str, source: &dyn RouteTable) -> Result<(), RouteError> {
        if !prefix.starts_with('/') {
            return Err(RouteError::InvalidPath {
                pattern: prefix.to_string(),
            });
        }

        let mut copies = Vec::new();
        source.walk(&mut |full_path: &str, spec: &PathSpec| {
            if spec.has_handler() {
                copies.push(spec.copy_to(join(prefix, full_path)));
            }
            true
        })?;

        tracing::debug!(prefix = %prefix, routes = copies.len(), "Mounting routes");
        self.route(copies)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `path` currently has a resolved-path cache entry.
    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }

    /// Number of cached request paths.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl RouteTable for Router {
    fn match_route(&self, path: &str) -> Option<PathSpec> {
        Router::match_route(self, path)
    }

    fn walk(&self, visitor: &mut dyn RouteVisitor) -> Result<(), RouteError> {
        // Snapshot first so visitors may call back into the router.
        let mut entries = Vec::new();
        self.index.read().walk(|full_path, spec| {
            entries.push((full_path.to_string(), spec.clone()));
            true
        });

        for (full_path, spec) in &entries {
            if !visitor.visit(full_path, spec) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handler::Handler;
    use crate::http::middleware::{middleware_fn, SharedMiddleware};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn tag(label: &'static str) -> SharedMiddleware {
        Arc::new(middleware_fn(move |next: Handler| {
            handler_fn(move |req: Request<Body>| {
                let next = next.clone();
                async move {
                    let res = next.handle(req).await;
                    let status = res.status();
                    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
                    (status, format!("{}{}", String::from_utf8_lossy(&body), label))
                }
            })
        }))
    }

    fn text(body: &'static str) -> Handler {
        handler_fn(move |_req: Request<Body>| async move { body })
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let res = router.serve(req).await;
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("/a/b/c"), Some("/a/b/"));
        assert_eq!(parent_dir("/a/b/"), Some("/a/"));
        assert_eq!(parent_dir("/a"), Some("/"));
        assert_eq!(parent_dir("/"), None);
        assert_eq!(parent_dir(""), None);
    }

    #[test]
    fn test_exact_match() {
        let router = Router::new();
        let spec = path("/foo/bar");
        router.route([spec.clone()]).unwrap();

        let found = router.match_route("/foo/bar").unwrap();
        assert!(found.ptr_eq(&spec));
        assert!(router.match_route("/foo/bar/").unwrap().ptr_eq(&spec));
    }

    #[test]
    fn test_root_inherits_everything() {
        let router = Router::new();
        router.route([path("/")]).unwrap();

        for p in ["/", "/foo", "/foo/bar/baz"] {
            assert!(router.match_route(p).is_some(), "{p} should match");
        }
        assert!(router.match_route("").is_none());
        assert!(router.match_route("relative").is_none());
    }

    #[test]
    fn test_fallback_to_nearest_ancestor() {
        let router = Router::new();
        let root = path("/");
        let foo = path("/foo");
        router.route([root.clone(), foo.clone()]).unwrap();

        assert!(router.match_route("/foo/bar").unwrap().ptr_eq(&foo));
        assert!(router.match_route("/foo/bar/baz/").unwrap().ptr_eq(&foo));
        assert!(router.match_route("/foobar").unwrap().ptr_eq(&root));
    }

    #[test]
    fn test_no_ancestor_is_not_found() {
        let router = Router::new();
        router.route([path("/foo")]).unwrap();

        assert!(router.match_route("/bar").is_none());
        assert!(router.match_route("/").is_none());
    }

    #[test]
    fn test_non_inheriting_entry_matches_exactly() {
        let router = Router::new();
        let spec = path("/foo").inherit(false);
        router.route([spec.clone()]).unwrap();

        assert!(router.match_route("/foo").unwrap().ptr_eq(&spec));
        assert!(router.match_route("/foo/bar").is_none());

        // Skipped, not a dead end: a shallower inheriting entry still answers.
        let root = path("/");
        router.route([root.clone()]).unwrap();
        assert!(router.match_route("/foo/bar").unwrap().ptr_eq(&root));
    }

    #[test]
    fn test_relative_path_rejected_without_mutation() {
        let router = Router::new();
        let err = router.route([path("/ok"), path("foo")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidPath {
                pattern: "foo".into()
            }
        );
        assert!(router.is_empty());
        assert!(router.match_route("/ok").is_none());
    }

    #[tokio::test]
    async fn test_compiled_spec_cannot_be_registered_again() {
        let router = Router::new();
        let spec = path("/once").get(text("once"));
        router.route([spec.clone()]).unwrap();
        assert_eq!(get(&router, "/once").await.0, StatusCode::OK);

        let err = router.route([path("/other"), spec]).unwrap_err();
        assert!(matches!(err, RouteError::AlreadyRegistered { .. }));
        assert!(router.match_route("/other").is_none());
    }

    #[tokio::test]
    async fn test_inheritance_order() {
        let router = Router::new();
        router
            .route([
                path("/").use_middlewares([tag("R")]),
                path("/a").use_middlewares([tag("A1"), tag("A2")]),
                path("/a/b/c")
                    .use_middlewares([tag("C")])
                    .get(text("H")),
            ])
            .unwrap();

        // Outermost first: R, A1, A2, C, handler. Each tag appends on the way out.
        assert_eq!(get(&router, "/a/b/c").await, (StatusCode::OK, "HCA2A1R".into()));
        assert_eq!(
            router.match_route("/a/b/c").unwrap().inherited_middleware_count(),
            3
        );
    }

    #[test]
    fn test_registration_order_within_call_is_irrelevant() {
        let router = Router::new();
        let child = path("/foo/bar").get(text("H"));
        router
            .route([child.clone(), path("/foo").use_middlewares([tag("P")])])
            .unwrap();
        assert_eq!(child.inherited_middleware_count(), 1);
    }

    #[tokio::test]
    async fn test_relink_on_new_ancestor() {
        let router = Router::new();
        let child = path("/foo/bar").use_middlewares([tag("C")]).get(text("H"));
        router.route([child.clone()]).unwrap();

        assert_eq!(get(&router, "/foo/bar").await.1, "HC");
        assert!(child.is_compiled());
        assert!(router.is_cached("/foo/bar"));

        router.route([path("/foo/").use_middlewares([tag("P")])]).unwrap();
        assert!(!router.is_cached("/foo/bar"));
        assert!(!child.is_compiled());
        assert_eq!(child.inherited_middleware_count(), 1);

        assert_eq!(get(&router, "/foo/bar").await.1, "HCP");
    }

    #[test]
    fn test_non_inheriting_never_receives_ancestor_middlewares() {
        let router = Router::new();
        let spec = path("/foo/bar").inherit(false).get(text("H"));
        router.route([path("/").use_middlewares([tag("R")]), spec.clone()]).unwrap();
        assert_eq!(spec.inherited_middleware_count(), 0);

        router.route([path("/foo").use_middlewares([tag("F")])]).unwrap();
        assert_eq!(spec.inherited_middleware_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_evicts_fallback_paths() {
        let router = Router::new();
        router.route([path("/").get(text("root"))]).unwrap();

        assert_eq!(get(&router, "/foo/x").await.1, "root");
        assert!(router.is_cached("/foo/x"));

        router.route([path("/foo").get(text("foo"))]).unwrap();
        assert!(!router.is_cached("/foo/x"));
        assert_eq!(get(&router, "/foo/x").await.1, "foo");
    }

    #[tokio::test]
    async fn test_cache_keyed_by_request_path() {
        let router = Router::new();
        router.route([path("/dir").get(text("dir"))]).unwrap();

        get(&router, "/dir/a").await;
        get(&router, "/dir/b").await;
        assert!(router.is_cached("/dir/a"));
        assert!(router.is_cached("/dir/b"));
        assert!(!router.is_cached("/dir"));
    }

    #[tokio::test]
    async fn test_directory_without_handler_is_not_found() {
        let router = Router::new();
        router.route([path("/foo/").use_middlewares([tag("A")])]).unwrap();

        assert!(router.match_route("/foo/bar").is_some());
        assert_eq!(get(&router, "/foo/bar").await.0, StatusCode::NOT_FOUND);
        assert!(!router.is_cached("/foo/bar"));
        assert_eq!(get(&router, "/nothing").await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_walk_in_path_order() {
        let router = Router::new();
        router
            .route([
                path("/foo/regular"),
                path("/foo/"),
                path("/foo/nomiddlewares"),
            ])
            .unwrap();

        let mut seen = Vec::new();
        walk(&router, |full_path: &str, _spec: &PathSpec| {
            seen.push(full_path.to_string());
            true
        })
        .unwrap();
        assert_eq!(seen, vec!["/foo", "/foo/nomiddlewares", "/foo/regular"]);
    }

    #[test]
    fn test_walk_can_register() {
        let router = Router::new();
        router.route([path("/a")]).unwrap();
        walk(&router, |_: &str, _: &PathSpec| {
            router.route([path("/b")]).unwrap();
            true
        })
        .unwrap();
        assert!(router.match_route("/b").is_some());
    }

    #[tokio::test]
    async fn test_mount() {
        let source = Router::new();
        source
            .route([
                path("/bar").use_middlewares([tag("B")]).get(text("bar")),
                path("/baz").get(text("baz")),
                path("/dir").use_middlewares([tag("D")]),
            ])
            .unwrap();

        let router = Router::new();
        router.route([path("/foo").use_middlewares([tag("F")])]).unwrap();
        router.mount("/foo", &source).unwrap();

        assert_eq!(get(&router, "/foo/bar").await.1, "barBF");
        assert_eq!(get(&router, "/foo/baz").await.1, "bazF");
        // Directory entries without a handler are not copied
        assert!(router
            .match_route("/foo/dir")
            .unwrap()
            .ptr_eq(&router.match_route("/foo").unwrap()));

        // Source entries are untouched
        let original = source.match_route("/bar").unwrap();
        assert_eq!(original.inherited_middleware_count(), 0);
    }

    #[test]
    fn test_mount_rejects_relative_prefix() {
        let router = Router::new();
        let err = router.mount("foo", &Router::new()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPath { .. }));
    }

    #[test]
    fn test_mount_into_self() {
        let router = Router::new();
        router.route([path("/a").get(text("a"))]).unwrap();
        router.mount("/copy", &router).unwrap();
        assert!(router.match_route("/copy/a").unwrap().has_handler());
    }

    struct Single(PathSpec);

    impl RouteTable for Single {
        fn match_route(&self, path: &str) -> Option<PathSpec> {
            (path == self.0.pattern()).then(|| self.0.clone())
        }
    }

    #[test]
    fn test_walk_unsupported() {
        let table = Single(path("/only").get(text("only")));
        assert!(table.match_route("/only").is_some());

        let err = walk(&table, |_: &str, _: &PathSpec| true).unwrap_err();
        assert_eq!(err, RouteError::WalkUnsupported);

        let router = Router::new();
        assert_eq!(
            router.mount("/x", &table).unwrap_err(),
            RouteError::WalkUnsupported
        );
        assert!(router.is_empty());
    }

    #[tokio::test]
    async fn test_cache_capacity_bounds_client_paths() {
        let router = Router::new().with_cache_capacity(8);
        let root = path("/").get(text("root"));
        router.route([root.clone()]).unwrap();

        for i in 0..200 {
            let p = format!("/junk/{i}");
            assert_eq!(get(&router, &p).await, (StatusCode::OK, "root".into()));
            assert!(router.match_route(&p).unwrap().ptr_eq(&root));
        }
        assert_eq!(router.cached_len(), 8);
        assert!(router.is_cached("/junk/0"));
        assert!(!router.is_cached("/junk/199"));

        // Registration still evicts, freeing room for new paths
        router.route([path("/junk").get(text("junk"))]).unwrap();
        assert_eq!(router.cached_len(), 0);
        assert_eq!(get(&router, "/junk/199").await.1, "junk");
        assert!(router.is_cached("/junk/199"));
    }

    #[tokio::test]
    async fn test_zero_capacity_disables_cache() {
        let router = Router::new().with_cache_capacity(0);
        router.route([path("/").get(text("root"))]).unwrap();

        assert_eq!(get(&router, "/a").await.1, "root");
        assert_eq!(get(&router, "/a").await.1, "root");
        assert_eq!(router.cached_len(), 0);
    }

    #[test]
    fn test_affected_entries_lists_each_entry_once() {
        let mut index = PathTrie::new();
        let entries = ["/", "/a", "/a/b", "/a/b/c", "/c", "/ab"];
        for p in entries {
            index.insert(p, path(p));
        }
        fn patterns(index: &PathTrie<PathSpec>, specs: &[PathSpec]) -> Vec<String> {
            let mut found: Vec<String> = affected_entries(index, specs)
                .iter()
                .map(|spec| spec.pattern().to_string())
                .collect();
            found.sort();
            found
        }

        assert_eq!(
            patterns(
                &index,
                &[path("/a/b"), path("/a"), path("/a/b/c"), path("/a/")]
            ),
            vec!["/a", "/a/b", "/a/b/c"]
        );
        assert_eq!(
            patterns(&index, &[path("/c"), path("/ab")]),
            vec!["/ab", "/c"]
        );
        assert_eq!(
            patterns(&index, &[path("/a"), path("/")]).len(),
            entries.len()
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_routes() {
        let mut bad_method = RouteConfig::directory("/m");
        bad_method.method = "BAD METHOD".into();
        bad_method.body = Some("m".into());
        let mut bad_status = RouteConfig::directory("/s");
        bad_status.status = 42;
        bad_status.body = Some("s".into());

        let err = Router::from_config(&[bad_method, bad_status]).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }

        let err = Router::from_config(&[RouteConfig::directory("relative")]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[tokio::test]
    async fn test_from_config_builds_routes() {
        let mut hello = RouteConfig::directory("/api/hello");
        hello.method = "POST".into();
        hello.status = 201;
        hello.body = Some("hi".into());
        let mut api = RouteConfig::directory("/api");
        api.middlewares = vec!["access_log".into()];

        let router = Router::from_config(&[api, hello]).unwrap();
        let spec = router.match_route("/api/hello").unwrap();
        assert_eq!(spec.inherited_middleware_count(), 1);

        let req = Request::builder()
            .method("POST")
            .uri("/api/hello")
            .body(Body::empty())
            .unwrap();
        let res = router.serve(req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}
