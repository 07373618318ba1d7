//! Configuration and route tree loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::tree::RouteNode;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Route tree error in {path}: {reason}")]
    RouteTree { path: PathBuf, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = read(path)?;
    let config: RouterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Route tree file named by `config`, resolved against the config file's
/// directory.
pub fn routes_path(config_path: &Path, config: &RouterConfig) -> Option<PathBuf> {
    let file = config.routing.routes_file.as_ref()?;
    let file = Path::new(file);
    if file.is_absolute() {
        return Some(file.to_path_buf());
    }
    Some(
        config_path
            .parent()
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| file.to_path_buf()),
    )
}

/// Load a route tree from a `.toml` file, or JSON for any other extension.
pub fn load_route_tree(path: &Path) -> Result<RouteNode, ConfigError> {
    let content = read(path)?;
    let tree_error = |reason: String| ConfigError::RouteTree {
        path: path.to_path_buf(),
        reason,
    };

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|e| tree_error(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| tree_error(e.to_string()))
    }
}
