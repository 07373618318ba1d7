//! Dotted-name handler namespace.
//!
//! # Responsibilities
//! - Hold handlers under nested modules (`social.editProfile` lives in module
//!   `social` as `editProfile`)
//! - Resolve a dotted name by walking one segment at a time
//!
//! # Design Decisions
//! - Handlers are opaque: the namespace only needs to clone them into chains
//! - A name that stops on a module rather than a handler does not resolve
//! - Inserting a handler where a module exists (or the reverse) is rejected

use std::collections::BTreeMap;

use crate::routing::error::{RouteError, RouteResult};

#[derive(Debug, Clone)]
enum Entry<H> {
    Handler(H),
    Module(BTreeMap<String, Entry<H>>),
}

/// Nested mapping from dotted names to handlers.
#[derive(Debug, Clone)]
pub struct HandlerNamespace<H> {
    root: BTreeMap<String, Entry<H>>,
}

impl<H> Default for HandlerNamespace<H> {
    fn default() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }
}

impl<H> HandlerNamespace<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under a dotted name, creating modules on the way.
    pub fn insert(&mut self, name: &str, handler: H) -> RouteResult<()> {
        let segments = split_name(name)?;
        let (last, modules) = segments
            .split_last()
            .ok_or_else(|| RouteError::NamespaceConflict(name.to_string()))?;

        let mut table = &mut self.root;
        for segment in modules {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| Entry::Module(BTreeMap::new()));
            table = match entry {
                Entry::Module(children) => children,
                Entry::Handler(_) => return Err(RouteError::NamespaceConflict(name.to_string())),
            };
        }

        if let Some(Entry::Module(_)) = table.get(*last) {
            return Err(RouteError::NamespaceConflict(name.to_string()));
        }
        table.insert(last.to_string(), Entry::Handler(handler));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: &str, handler: H) -> RouteResult<Self> {
        self.insert(name, handler)?;
        Ok(self)
    }

    /// Look up a handler by dotted name.
    pub fn resolve(&self, name: &str) -> RouteResult<&H> {
        let unknown = || RouteError::UnknownHandler(name.to_string());

        let mut segments = name.split('.');
        let first = segments.next().ok_or_else(unknown)?;
        let mut entry = self.root.get(first).ok_or_else(unknown)?;

        for segment in segments {
            entry = match entry {
                Entry::Module(children) => children.get(segment).ok_or_else(unknown)?,
                Entry::Handler(_) => return Err(unknown()),
            };
        }

        match entry {
            Entry::Handler(handler) => Ok(handler),
            Entry::Module(_) => Err(unknown()),
        }
    }

    /// Number of handlers, counting nested modules.
    pub fn len(&self) -> usize {
        fn count<H>(table: &BTreeMap<String, Entry<H>>) -> usize {
            table
                .values()
                .map(|entry| match entry {
                    Entry::Handler(_) => 1,
                    Entry::Module(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn split_name(name: &str) -> RouteResult<Vec<&str>> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(RouteError::UnknownHandler(name.to_string()));
    }
    Ok(segments)
}
