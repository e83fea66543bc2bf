//! Routing errors.

use thiserror::Error;

/// Errors reported by route registration, mounting and walking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern (or mount prefix) does not start with `/`.
    #[error("paths must be absolute {pattern:?}: invalid path")]
    InvalidPath { pattern: String },

    /// The entry has already been compiled by a previous registration.
    #[error("path {pattern:?} is already registered and compiled")]
    AlreadyRegistered { pattern: String },

    /// The route table does not expose tree introspection.
    #[error("route table does not support walking")]
    WalkUnsupported,

    /// A node that was just inserted could not be fetched back.
    #[error("path index inconsistent: {pattern:?} missing right after insert")]
    Internal { pattern: String },
}
