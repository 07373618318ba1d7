//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route-tree tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route compilation settings.
    pub routing: RoutingConfig,

    /// Dotted handler names available to the route tree.
    pub handlers: Vec<String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Route compilation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Method for keys without a method list (get, post, put, delete, all).
    pub default_method: String,

    /// Route tree file (`.json` or `.toml`), relative to the config file.
    pub routes_file: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_method: "get".to_string(),
            routes_file: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Filter directive built from the configured level.
    pub fn filter_directive(&self) -> String {
        if self.log_level.contains('=') || self.log_level.contains(',') {
            self.log_level.clone()
        } else {
            format!("route_tree={}", self.log_level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.routing.default_method, "get");
        assert!(config.routing.routes_file.is_none());
        assert!(config.handlers.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config: RouterConfig = toml::from_str(
            r#"
            handlers = ["home.index", "auth.require"]

            [routing]
            default_method = "post"
            routes_file = "routes.json"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.routing.default_method, "post");
        assert_eq!(config.routing.routes_file.as_deref(), Some("routes.json"));
        assert_eq!(config.handlers.len(), 2);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_filter_directive() {
        let mut config = ObservabilityConfig::default();
        assert_eq!(config.filter_directive(), "route_tree=info");

        config.log_level = "route_tree=trace,axum=debug".into();
        assert_eq!(config.filter_directive(), "route_tree=trace,axum=debug");
    }
}
