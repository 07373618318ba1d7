//! HTTP dispatch through axum.
//!
//! # Data Flow
//! ```text
//! Route compilation
//!     → dispatcher.rs (buffer bindings, translate templates)
//!     → axum::Router (one MethodRouter per path)
//!
//! Incoming request
//!     → axum path match
//!     → chain.rs (run links in order until one answers)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - No listener here; the application serves the built router itself
//! - Handlers are plain async functions over `Request`, no shared state type

pub mod chain;
pub mod dispatcher;

pub use chain::{run_chain, ChainHandler, Flow};
pub use dispatcher::{AxumDispatcher, DispatchError};
