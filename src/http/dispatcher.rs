//! Dispatcher backed by an axum `Router`.
//!
//! # Responsibilities
//! - Collect `(method, path, chain)` bindings during route compilation
//! - Translate `:param` templates into axum path syntax
//! - Build the final `axum::Router`
//!
//! # Design Decisions
//! - Bindings are buffered; axum only sees the final table, so re-binding the
//!   same method and path replaces the earlier chain instead of panicking
//! - `:param?` segments expand into one route with and one without the segment.
//!   Variants of one template that only differ in parameter names collapse to
//!   the first, which binds values to the leftmost optional parameters
//! - `all` becomes the method fallback of its path
//! - Templates that axum would reject are reported as errors up front

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use axum::extract::Request;
use axum::routing::{MethodFilter, MethodRouter};
use thiserror::Error;

use crate::dispatch::Dispatcher;
use crate::http::chain::{run_chain, ChainHandler};
use crate::routing::method::Method;

/// Errors raised while building the axum router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Two templates differ only in parameter names.
    #[error("Route {first} conflicts with {second}")]
    Conflict { first: String, second: String },

    /// Template cannot be expressed as an axum path.
    #[error("Invalid route template {path}: {reason}")]
    InvalidPath { path: String, reason: String },
}

type Chain = Arc<[ChainHandler]>;

/// Buffers bindings and turns them into an `axum::Router`.
#[derive(Debug, Default)]
pub struct AxumDispatcher {
    bindings: Vec<(Method, String, Chain)>,
}

impl AxumDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the router. Later bindings win over earlier ones for the same
    /// method and path.
    pub fn into_router(self) -> Result<axum::Router, DispatchError> {
        let mut table: BTreeMap<String, BTreeMap<Method, Chain>> = BTreeMap::new();
        for (method, template, chain) in self.bindings {
            for path in axum_paths(&template)? {
                table.entry(path).or_default().insert(method, chain.clone());
            }
        }

        let mut shapes: HashMap<String, &str> = HashMap::new();
        for path in table.keys() {
            if let Some(first) = shapes.insert(shape_of(path), path.as_str()) {
                return Err(DispatchError::Conflict {
                    first: first.to_string(),
                    second: path.clone(),
                });
            }
        }

        let mut router = axum::Router::new();
        for (path, methods) in &table {
            tracing::debug!(path = %path, methods = methods.len(), "Mounting route");
            router = router.route(path, method_router(methods));
        }
        Ok(router)
    }
}

impl Dispatcher<ChainHandler> for AxumDispatcher {
    fn bind(&mut self, method: Method, path: &str, chain: Vec<ChainHandler>) {
        self.bindings.push((method, path.to_string(), chain.into()));
    }
}

fn method_filter(method: Method) -> Option<MethodFilter> {
    match method {
        Method::Get => Some(MethodFilter::GET),
        Method::Post => Some(MethodFilter::POST),
        Method::Put => Some(MethodFilter::PUT),
        Method::Delete => Some(MethodFilter::DELETE),
        Method::All => None,
    }
}

fn method_router(methods: &BTreeMap<Method, Chain>) -> MethodRouter {
    let mut router = MethodRouter::new();
    for (method, chain) in methods {
        let handler = chain_handler(chain.clone());
        router = match method_filter(*method) {
            Some(filter) => router.on(filter, handler),
            None => router.fallback(handler),
        };
    }
    router
}

fn chain_handler(
    chain: Chain,
) -> impl Fn(Request) -> futures_util::future::BoxFuture<'static, axum::response::Response>
       + Clone
       + Send
       + Sync
       + 'static {
    use futures_util::FutureExt;

    move |req: Request| {
        let chain = chain.clone();
        async move { run_chain(&chain, req).await }.boxed()
    }
}

enum Segment<'a> {
    Literal(String),
    Param(&'a str),
    Optional(&'a str),
    Wildcard,
}

fn parse_segments(template: &str) -> Result<Vec<Segment<'_>>, DispatchError> {
    let invalid = |reason: &str| DispatchError::InvalidPath {
        path: template.to_string(),
        reason: reason.to_string(),
    };

    let raw: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
    let mut segments = Vec::with_capacity(raw.len());

    for (i, segment) in raw.iter().enumerate() {
        if *segment == "*" {
            if i + 1 != raw.len() {
                return Err(invalid("wildcard must be the last segment"));
            }
            segments.push(Segment::Wildcard);
        } else if let Some(name) = segment.strip_prefix(':') {
            let (name, optional) = match name.strip_suffix('?') {
                Some(name) => (name, true),
                None => (name, false),
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("parameters must span a whole path segment"));
            }
            segments.push(if optional {
                Segment::Optional(name)
            } else {
                Segment::Param(name)
            });
        } else if segment.contains(':') || segment.contains('*') {
            return Err(invalid("parameters must span a whole path segment"));
        } else {
            segments.push(Segment::Literal(
                segment.replace('{', "{{").replace('}', "}}"),
            ));
        }
    }
    Ok(segments)
}

/// Every axum path a template stands for.
fn axum_paths(template: &str) -> Result<Vec<String>, DispatchError> {
    let mut variants: Vec<Vec<String>> = vec![Vec::new()];

    for segment in parse_segments(template)? {
        let rendered = match &segment {
            Segment::Literal(text) => text.clone(),
            Segment::Param(name) | Segment::Optional(name) => format!("{{{}}}", name),
            Segment::Wildcard => "{*rest}".to_string(),
        };
        if matches!(segment, Segment::Optional(_)) {
            variants = variants
                .into_iter()
                .flat_map(|variant| {
                    let mut with = variant.clone();
                    with.push(rendered.clone());
                    [with, variant]
                })
                .collect();
        } else {
            for variant in &mut variants {
                variant.push(rendered.clone());
            }
        }
    }

    let mut seen = HashSet::new();
    Ok(variants
        .into_iter()
        .map(|segments| format!("/{}", segments.join("/")))
        .filter(|path| seen.insert(shape_of(path)))
        .collect())
}

/// Path with parameter names erased, for conflict detection.
fn shape_of(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') && !segment.starts_with("{{") {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
