//! HTTP methods accepted in route keys.

use std::fmt;
use std::str::FromStr;

use crate::routing::error::RouteError;

/// The fixed set of methods a route key may name.
///
/// `All` binds a chain for every method not bound explicitly on the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    All,
}

impl Method {
    /// Lowercase name as written in route keys and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::All => "all",
        }
    }

    /// Parse a method name, ignoring case. Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "delete" => Some(Method::Delete),
            "all" => Some(Method::All),
            _ => None,
        }
    }
}

impl FromStr for Method {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s).ok_or_else(|| RouteError::InvalidMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}
