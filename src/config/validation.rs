//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default method is one the router accepts
//! - Check handler names form a consistent namespace
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::RouterConfig;
use crate::handlers::HandlerNamespace;
use crate::routing::method::Method;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routing.default_method {0:?} is not one of get, post, put, delete, all")]
    InvalidDefaultMethod(String),

    #[error("handler name {0:?} is empty or has an empty segment")]
    InvalidHandlerName(String),

    #[error("handler {0:?} is listed more than once")]
    DuplicateHandler(String),

    #[error("handler {0:?} is also used as a module of another handler")]
    HandlerModuleConflict(String),

    #[error("observability.log_level {0:?} is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Method::parse(&config.routing.default_method).is_none() {
        errors.push(ValidationError::InvalidDefaultMethod(
            config.routing.default_method.clone(),
        ));
    }

    let mut seen = HashSet::new();
    let mut namespace = HandlerNamespace::new();
    for name in &config.handlers {
        if name.is_empty() || name.split('.').any(str::is_empty) {
            errors.push(ValidationError::InvalidHandlerName(name.clone()));
            continue;
        }
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateHandler(name.clone()));
            continue;
        }
        if namespace.insert(name, ()).is_err() {
            errors.push(ValidationError::HandlerModuleConflict(name.clone()));
        }
    }

    if EnvFilter::try_new(config.observability.filter_directive()).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
