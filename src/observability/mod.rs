//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing::compiler / routing::router / http
//!     → tracing events (bindings, re-bound names, summaries)
//!     → logging.rs subscriber (env filter + fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber is the binary's job

pub mod logging;
