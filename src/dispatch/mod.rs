//! Dispatcher seam.
//!
//! # Data Flow
//! ```text
//! routing::compiler (one call per leaf and method)
//!     → Dispatcher::bind(method, path, chain)
//!         - recording.rs (in-memory table, used by tooling and tests)
//!         - http::AxumDispatcher (serves the chains through axum)
//! ```
//!
//! # Design Decisions
//! - Binding is infallible; dispatchers that can reject a table do so when
//!   they are finalized, not mid-registration
//! - The chain always holds at least one handler, run in order

pub mod recording;

pub use recording::{Binding, RecordingDispatcher};

use crate::routing::method::Method;

/// Receives concrete bindings produced by route compilation.
pub trait Dispatcher<H> {
    /// Bind `chain` to `method` on the path template `path`.
    fn bind(&mut self, method: Method, path: &str, chain: Vec<H>);
}
