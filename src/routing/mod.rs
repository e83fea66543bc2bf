//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     PathSpec[]
//!     → router.rs (validate all, then insert)
//!     → trie.rs (segment index)
//!     → link inherited middlewares, re-link descendants, evict cache
//!
//! Incoming request path:
//!     → router.rs (resolved-path cache)
//!     → on miss: exact lookup, then parent-directory fallback
//!     → spec.rs (compile once, serve)
//! ```
//!
//! # Design Decisions
//! - Routes may be added while serving; the index is behind a RwLock
//! - Nearest registered ancestor wins, not the longest common prefix
//! - No wildcard or parameter segments

pub mod error;
pub mod router;
pub mod spec;
pub mod trie;

pub use error::RouteError;
pub use router::{walk, RouteTable, RouteVisitor, Router};
pub use spec::{path, PathSpec};
