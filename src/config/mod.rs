//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!
//! routes file (JSON/TOML)
//!     → loader.rs (parse into RouteNode)
//!     → routing::Router::register_routes
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_route_tree, routes_path, ConfigError};
pub use schema::{ObservabilityConfig, RouterConfig, RoutingConfig};
pub use validation::ValidationError;
