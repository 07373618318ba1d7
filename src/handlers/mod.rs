//! Handler resolution.
//!
//! # Data Flow
//! ```text
//! Controller modules (assembled by the application)
//!     → namespace.rs (nested name → handler table)
//!     → resolve("social.editProfile") during route compilation
//!     → concrete handler cloned into a binding's chain
//! ```
//!
//! # Design Decisions
//! - The namespace is built before registration and never mutated by it
//! - No memoization: resolution runs once per binding at startup

pub mod namespace;

pub use namespace::HandlerNamespace;
