//! Router instance.
//!
//! # Responsibilities
//! - Own the default method and the handler-name → path table
//! - Compile route trees into a dispatcher
//! - Generate URLs from handler names
//!
//! # Design Decisions
//! - Each router owns its own path table; independent routers never share state
//! - Registration mutates, URL generation only reads. Finish registering
//!   before sharing the router across threads.

use crate::dispatch::Dispatcher;
use crate::handlers::HandlerNamespace;
use crate::routing::compiler::{CompileSummary, Compiler};
use crate::routing::error::RouteResult;
use crate::routing::method::Method;
use crate::routing::tree::RouteNode;
use crate::routing::url::PathTable;

/// Compiles route trees and answers reverse URL lookups.
#[derive(Debug, Clone, Default)]
pub struct Router {
    default_method: Method,
    paths: PathTable,
}

impl Router {
    /// Create a router whose default method is `get`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_method(&self) -> Method {
        self.default_method
    }

    /// Set the method used by keys without an explicit method list.
    pub fn set_default_method(&mut self, method: &str) -> RouteResult<()> {
        self.default_method = method.parse()?;
        tracing::debug!(method = %self.default_method, "Default method set");
        Ok(())
    }

    /// Compile `tree` and bind every leaf on `dispatcher`.
    ///
    /// On error, bindings made before the failing node stay in place.
    pub fn register_routes<H, D>(
        &mut self,
        dispatcher: &mut D,
        tree: &RouteNode,
        namespace: &HandlerNamespace<H>,
    ) -> RouteResult<CompileSummary>
    where
        H: Clone,
        D: Dispatcher<H>,
    {
        let summary =
            Compiler::new(self.default_method, namespace, dispatcher, &mut self.paths).compile(tree)?;

        tracing::info!(
            leaves = summary.leaves,
            bindings = summary.bindings,
            named_paths = self.paths.len(),
            "Routes registered"
        );
        Ok(summary)
    }

    /// Generate the URL bound to handler `name`.
    pub fn url_for<I, K, V>(&self, name: &str, params: I) -> RouteResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.paths.generate(name, params)
    }

    /// Generate the URL bound to handler `name` without parameters.
    pub fn url(&self, name: &str) -> RouteResult<String> {
        self.url_for(name, std::iter::empty::<(&str, &str)>())
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RecordingDispatcher;
    use crate::routing::error::RouteError;
    use serde_json::json;

    #[test]
    fn test_set_default_method() {
        let mut router = Router::new();
        assert_eq!(router.default_method(), Method::Get);

        router.set_default_method("POST").unwrap();
        assert_eq!(router.default_method(), Method::Post);

        assert_eq!(
            router.set_default_method("head"),
            Err(RouteError::InvalidMethod("head".into()))
        );
        assert_eq!(router.default_method(), Method::Post);
    }

    #[test]
    fn test_default_method_applies_to_plain_keys() {
        let ns = HandlerNamespace::new().with("form.submit", 1u8).unwrap();
        let tree = RouteNode::from_value(&json!({ "/submit": "form.submit" })).unwrap();

        let mut router = Router::new();
        router.set_default_method("put").unwrap();
        let mut dispatcher = RecordingDispatcher::new();
        router.register_routes(&mut dispatcher, &tree, &ns).unwrap();

        assert_eq!(dispatcher.bindings()[0].method, Method::Put);
    }

    #[test]
    fn test_routers_are_independent() {
        let ns = HandlerNamespace::new().with("page", ()).unwrap();
        let mut a = Router::new();
        let mut b = Router::new();

        a.register_routes(
            &mut RecordingDispatcher::new(),
            &RouteNode::from_value(&json!({ "/a": "page" })).unwrap(),
            &ns,
        )
        .unwrap();
        b.register_routes(
            &mut RecordingDispatcher::new(),
            &RouteNode::from_value(&json!({ "/b": "page" })).unwrap(),
            &ns,
        )
        .unwrap();

        assert_eq!(a.url("page").unwrap(), "/a");
        assert_eq!(b.url("page").unwrap(), "/b");
    }
}
