//! Reverse URL generation.
//!
//! # Responsibilities
//! - Remember the last path template bound for each handler name
//! - Fill `:param` / `:param?` placeholders from caller-supplied values
//!
//! # Design Decisions
//! - Placeholders are matched as whole tokens (`:id` never matches inside `:idx`)
//! - Unfilled optional placeholders are dropped, then the path is normalized
//! - Any `:` left after substitution fails with the partially filled template.
//!   This covers unfilled required placeholders, bare colons in the template
//!   and colons carried in by a value.

use std::collections::BTreeMap;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::key::normalize_path;

/// Handler name → most recently bound path template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    paths: BTreeMap<String, String>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a template for `name`, returning the one it replaced.
    pub fn record(&mut self, name: &str, path: &str) -> Option<String> {
        self.paths.insert(name.to_string(), path.to_string())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the URL for `name` with the given parameter values.
    pub fn generate<I, K, V>(&self, name: &str, params: I) -> RouteResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let template = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownHandler(name.to_string()))?;
        fill_template(name, template, params)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Param { name: &'a str, optional: bool },
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut rest = template;
    let mut offset = 0;

    while let Some(colon) = rest.find(':') {
        let after = &rest[colon + 1..];
        let name_len = after.find(|c: char| !is_param_char(c)).unwrap_or(after.len());
        if name_len == 0 {
            // Bare colon, keep it as text.
            offset += colon + 1;
            rest = after;
            continue;
        }

        let start = offset + colon;
        if literal_start < start {
            tokens.push(Token::Literal(&template[literal_start..start]));
        }
        let name = &after[..name_len];
        let optional = after[name_len..].starts_with('?');
        let consumed = colon + 1 + name_len + usize::from(optional);
        tokens.push(Token::Param { name, optional });

        offset += consumed;
        rest = &rest[consumed..];
        literal_start = offset;
    }

    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    tokens
}

fn fill_template<I, K, V>(name: &str, template: &str, params: I) -> RouteResult<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let values: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();

    let mut filled = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) => filled.push_str(text),
            Token::Param { name: param, optional } => match values.get(param) {
                Some(value) => filled.push_str(value),
                None if optional => {}
                None => {
                    filled.push(':');
                    filled.push_str(param);
                }
            },
        }
    }

    if filled.contains(':') {
        return Err(RouteError::MissingParameter {
            name: name.to_string(),
            path: filled,
        });
    }
    Ok(normalize_path(&filled))
}
