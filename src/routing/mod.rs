//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     route tree file / literal
//!     → tree.rs (decide node shapes: handler, chain, group)
//!     → compiler.rs (depth-first walk)
//!         → key.rs (method list + path fragment per leaf)
//!         → required.rs (prefix/postfix middleware per group level)
//!         → handlers::namespace (name → handler)
//!     → Dispatcher::bind(method, path, chain) per leaf and method
//!     → url.rs PathTable (handler name → path template)
//!
//! URL Generation (at runtime):
//!     handler name + params
//!     → PathTable lookup
//!     → placeholder substitution
//!     → normalized path or MissingParameter
//! ```
//!
//! # Design Decisions
//! - Routes compiled once at startup; the path table is read-only afterwards
//! - Node shapes are fixed by the tree parser, not inspected during the walk
//! - Re-binding a handler name is not an error; the last path wins

pub mod compiler;
pub mod error;
pub mod key;
pub mod method;
pub mod required;
pub mod router;
pub mod tree;
pub mod url;

pub use compiler::CompileSummary;
pub use error::{RouteError, RouteResult};
pub use method::Method;
pub use required::{Depth, RequiredDecl, RequiredEntry, RequiredSpec};
pub use router::Router;
pub use tree::{RouteGroup, RouteNode};
pub use url::PathTable;
