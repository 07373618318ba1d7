//! Route key parsing and path joining.
//!
//! # Responsibilities
//! - Split a binding key such as `get,post/login` into a method set and a
//!   path fragment
//! - Join fragments onto the parent path
//! - Normalize slashes (root stays `/`, nothing else keeps a trailing slash)
//!
//! # Design Decisions
//! - A key whose leading token is not a clean method list is treated as a
//!   plain path; there is no parse error
//! - Method names are case-insensitive and de-duplicated in declaration order

use crate::routing::method::Method;

/// A parsed binding key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteKey {
    /// Methods to bind, never empty.
    pub methods: Vec<Method>,
    /// Path fragment relative to the parent group. Empty means the parent path.
    pub fragment: String,
}

/// Parse a binding key, falling back to `default_method` when the key carries
/// no method list.
pub fn parse_key(key: &str, default_method: Method) -> RouteKey {
    if let Some((head, rest)) = key.split_once('/') {
        if let Some(methods) = parse_method_list(head) {
            return RouteKey {
                methods,
                fragment: rest.to_string(),
            };
        }
    }

    RouteKey {
        methods: vec![default_method],
        fragment: key.to_string(),
    }
}

fn parse_method_list(head: &str) -> Option<Vec<Method>> {
    if head.is_empty() {
        return None;
    }

    let mut methods = Vec::new();
    for token in head.split(',') {
        let method = Method::parse(token)?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    Some(methods)
}

/// Collapse a path to its canonical form: a leading `/`, no empty segments,
/// no trailing slash except for the root itself.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Append a fragment to a base path and normalize the result.
pub fn join_path(base: &str, fragment: &str) -> String {
    normalize_path(&format!("{}/{}", base, fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_list_is_stripped() {
        let key = parse_key("get,post/login", Method::Get);
        assert_eq!(key.methods, vec![Method::Get, Method::Post]);
        assert_eq!(key.fragment, "login");

        let key = parse_key("ALL/", Method::Get);
        assert_eq!(key.methods, vec![Method::All]);
        assert_eq!(key.fragment, "");

        let key = parse_key("Put,DELETE,put/items/:id", Method::Get);
        assert_eq!(key.methods, vec![Method::Put, Method::Delete]);
        assert_eq!(key.fragment, "items/:id");
    }

    #[test]
    fn test_plain_keys_use_default_method() {
        let key = parse_key("/social", Method::Post);
        assert_eq!(key.methods, vec![Method::Post]);
        assert_eq!(key.fragment, "/social");

        let key = parse_key(":username", Method::Get);
        assert_eq!(key.methods, vec![Method::Get]);
        assert_eq!(key.fragment, ":username");
    }

    #[test]
    fn test_malformed_method_list_falls_through() {
        let key = parse_key("get,patch/login", Method::Get);
        assert_eq!(key.methods, vec![Method::Get]);
        assert_eq!(key.fragment, "get,patch/login");

        let key = parse_key("get,/login", Method::Delete);
        assert_eq!(key.methods, vec![Method::Delete]);
        assert_eq!(key.fragment, "get,/login");
    }

    #[test]
    fn test_join_and_normalize() {
        assert_eq!(join_path("", "/"), "/");
        assert_eq!(join_path("/", ""), "/");
        assert_eq!(join_path("/social", ":username"), "/social/:username");
        assert_eq!(join_path("/social/", "/edit/"), "/social/edit");
        assert_eq!(join_path("/a", ""), "/a");
        assert_eq!(normalize_path("//a//b/"), "/a/b");
    }
}
