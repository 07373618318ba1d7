//! Shared helpers for integration tests.

use route_tree::{HandlerNamespace, RecordingDispatcher, RouteError, RouteNode, Router};

/// Namespace where every handler is its own name.
pub fn namespace(names: &[&str]) -> HandlerNamespace<String> {
    let mut ns = HandlerNamespace::new();
    for name in names {
        ns.insert(name, name.to_string()).unwrap();
    }
    ns
}

/// Compile a JSON route tree on a fresh router.
#[allow(dead_code)]
pub fn compile(
    tree: serde_json::Value,
    names: &[&str],
) -> (Router, RecordingDispatcher<String>, Result<(), RouteError>) {
    let tree = RouteNode::from_value(&tree).unwrap();
    let mut router = Router::new();
    let mut dispatcher = RecordingDispatcher::new();
    let result = router
        .register_routes(&mut dispatcher, &tree, &namespace(names))
        .map(|_| ());
    (router, dispatcher, result)
}
