//! Route compilation and URL generation errors.

use thiserror::Error;

/// Errors raised while configuring a router, compiling a route tree or
/// generating URLs.
///
/// All of these are configuration errors. Registration is not transactional:
/// bindings made before a failure stay bound, so callers should treat a
/// registration error as fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Method name outside {get, post, put, delete, all}.
    #[error("Invalid HTTP method: {0:?} (expected one of get, post, put, delete, all)")]
    InvalidMethod(String),

    /// A route tree node has a shape that is neither a binding nor a group.
    #[error("Malformed route tree at {path:?}: {reason}")]
    MalformedRouteTree { path: String, reason: String },

    /// No handler (or only a module) is registered under this name.
    #[error("Unknown handler: {0}")]
    UnknownHandler(String),

    /// A binding references a handler name missing from the namespace.
    #[error("Unresolved handler {name:?} bound at {path}")]
    UnresolvedHandler { name: String, path: String },

    /// Generated URL still contains required placeholders.
    #[error("Missing parameter for {name}: unresolved template {path}")]
    MissingParameter { name: String, path: String },

    /// A name is used both as a handler and as a module prefix.
    #[error("Handler namespace conflict at {0:?}")]
    NamespaceConflict(String),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
