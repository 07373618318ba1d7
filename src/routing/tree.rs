//! Route tree definitions.
//!
//! A route tree is a nested mapping whose leaves bind handler names and whose
//! inner nodes group child routes under a shared path. Trees are usually read
//! from a config file; the shape of each node is decided here, once, so the
//! compiler only ever sees well-formed nodes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::required::RequiredDecl;

/// Group key holding middleware metadata instead of a child route.
pub const REQUIRED_KEY: &str = "Required";

/// A node of the route tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteNode {
    /// Leaf bound to a single handler name.
    Handler(String),
    /// Leaf bound to an ordered chain of handler names.
    Chain(Vec<String>),
    /// Inner node whose key prefixes every descendant path.
    Group(RouteGroup),
}

/// Children of a group, in declaration order, plus its `Required` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGroup {
    pub required: Option<RequiredDecl>,
    pub children: Vec<(String, RouteNode)>,
}

impl RouteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child route. A key already present is replaced in place.
    pub fn route(mut self, key: impl Into<String>, node: impl Into<RouteNode>) -> Self {
        let key = key.into();
        let node = node.into();
        match self.children.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = node,
            None => self.children.push((key, node)),
        }
        self
    }
}

impl From<RouteGroup> for RouteNode {
    fn from(group: RouteGroup) -> Self {
        RouteNode::Group(group)
    }
}

impl From<&str> for RouteNode {
    fn from(name: &str) -> Self {
        RouteNode::Handler(name.to_string())
    }
}

impl From<Vec<&str>> for RouteNode {
    fn from(names: Vec<&str>) -> Self {
        RouteNode::Chain(names.into_iter().map(String::from).collect())
    }
}

impl RouteNode {
    /// Handler names bound at this leaf, empty for groups.
    pub fn names(&self) -> &[String] {
        match self {
            RouteNode::Handler(name) => std::slice::from_ref(name),
            RouteNode::Chain(names) => names,
            RouteNode::Group(_) => &[],
        }
    }

    /// Build a tree from a loosely typed value, rejecting any node that is
    /// not a string, a non-empty list of strings, or an object.
    pub fn from_value(value: &Value) -> RouteResult<Self> {
        Self::parse_node(value, "$")
    }

    fn parse_node(value: &Value, at: &str) -> RouteResult<Self> {
        match value {
            Value::String(name) => Ok(RouteNode::Handler(name.clone())),
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(malformed(at, "handler list is empty"));
                }
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(name.clone()),
                        other => Err(malformed(
                            at,
                            format!("handler list entries must be strings, found {}", kind(other)),
                        )),
                    })
                    .collect::<RouteResult<Vec<_>>>()
                    .map(RouteNode::Chain)
            }
            Value::Object(map) => {
                let mut group = RouteGroup::new();
                for (key, child) in map {
                    let child_at = format!("{}[{:?}]", at, key);
                    if key == REQUIRED_KEY {
                        let decl = RequiredDecl::deserialize(child)
                            .map_err(|e| malformed(&child_at, e.to_string()))?;
                        group.required = Some(decl);
                    } else {
                        let node = Self::parse_node(child, &child_at)?;
                        group.children.push((key.clone(), node));
                    }
                }
                Ok(RouteNode::Group(group))
            }
            other => Err(malformed(
                at,
                format!("expected handler name, handler list or group, found {}", kind(other)),
            )),
        }
    }
}

impl TryFrom<Value> for RouteNode {
    type Error = RouteError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        RouteNode::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for RouteNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RouteNode::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn malformed(at: &str, reason: impl Into<String>) -> RouteError {
    RouteError::MalformedRouteTree {
        path: at.to_string(),
        reason: reason.into(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
