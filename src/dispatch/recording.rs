//! In-memory dispatcher that records every binding.

use std::fmt;

use crate::dispatch::Dispatcher;
use crate::routing::method::Method;

/// One `(method, path, chain)` registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<H> {
    pub method: Method,
    pub path: String,
    pub chain: Vec<H>,
}

impl<H: fmt::Display> fmt::Display for Binding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<7} {}", self.method.to_string(), self.path)?;
        for (i, handler) in self.chain.iter().enumerate() {
            f.write_str(if i == 0 { "  " } else { " -> " })?;
            write!(f, "{}", handler)?;
        }
        Ok(())
    }
}

/// Keeps bindings in registration order.
#[derive(Debug, Clone)]
pub struct RecordingDispatcher<H> {
    bindings: Vec<Binding<H>>,
}

impl<H> Default for RecordingDispatcher<H> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<H> RecordingDispatcher<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[Binding<H>] {
        &self.bindings
    }

    /// Most recent binding for `method` on `path`, if any.
    pub fn find(&self, method: Method, path: &str) -> Option<&Binding<H>> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.method == method && b.path == path)
    }
}

impl<H> Dispatcher<H> for RecordingDispatcher<H> {
    fn bind(&mut self, method: Method, path: &str, chain: Vec<H>) {
        self.bindings.push(Binding {
            method,
            path: path.to_string(),
            chain,
        });
    }
}
