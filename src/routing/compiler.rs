//! Route tree compilation.
//!
//! # Responsibilities
//! - Walk the tree depth-first, groups extending the path of their children
//! - Attach inherited prefix/postfix middleware to every binding
//! - Record each handler name's path for reverse lookup
//! - Resolve names and hand concrete chains to the dispatcher
//!
//! # Design Decisions
//! - Children are visited in declaration order
//! - Not transactional: a failing leaf leaves earlier bindings in place
//! - Path table entries are written before resolution, last write wins

use crate::dispatch::Dispatcher;
use crate::handlers::HandlerNamespace;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::key::{join_path, parse_key};
use crate::routing::method::Method;
use crate::routing::required::{propagate, RequiredSpec};
use crate::routing::tree::{RouteGroup, RouteNode};
use crate::routing::url::PathTable;

/// Counts reported after a successful compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Leaves visited.
    pub leaves: usize,
    /// `bind` calls made (one per leaf and method).
    pub bindings: usize,
}

/// Walks one route tree into a dispatcher and path table.
pub struct Compiler<'a, H, D> {
    default_method: Method,
    namespace: &'a HandlerNamespace<H>,
    dispatcher: &'a mut D,
    paths: &'a mut PathTable,
    summary: CompileSummary,
}

impl<'a, H, D> Compiler<'a, H, D>
where
    H: Clone,
    D: Dispatcher<H>,
{
    pub fn new(
        default_method: Method,
        namespace: &'a HandlerNamespace<H>,
        dispatcher: &'a mut D,
        paths: &'a mut PathTable,
    ) -> Self {
        Self {
            default_method,
            namespace,
            dispatcher,
            paths,
            summary: CompileSummary::default(),
        }
    }

    /// Compile `tree`, whose root must be a group.
    pub fn compile(mut self, tree: &RouteNode) -> RouteResult<CompileSummary> {
        let RouteNode::Group(root) = tree else {
            return Err(RouteError::MalformedRouteTree {
                path: "$".to_string(),
                reason: "route tree root must be a group".to_string(),
            });
        };

        self.walk_group(root, "", None)?;
        Ok(self.summary)
    }

    fn walk_group(
        &mut self,
        group: &RouteGroup,
        path: &str,
        inherited: Option<&RequiredSpec>,
    ) -> RouteResult<()> {
        let spec = propagate(inherited, group.required.as_ref());

        for (key, child) in &group.children {
            match child {
                RouteNode::Group(inner) => {
                    let child_path = join_path(path, key);
                    self.walk_group(inner, &child_path, Some(&spec))?;
                }
                leaf => self.bind_leaf(key, leaf.names(), path, &spec)?,
            }
        }
        Ok(())
    }

    fn bind_leaf(
        &mut self,
        key: &str,
        own: &[String],
        base: &str,
        spec: &RequiredSpec,
    ) -> RouteResult<()> {
        let key = parse_key(key, self.default_method);
        let path = join_path(base, &key.fragment);

        for name in own {
            if let Some(previous) = self.paths.record(name, &path) {
                if previous != path {
                    tracing::warn!(
                        handler = %name,
                        previous = %previous,
                        path = %path,
                        "Handler re-bound, URL generation will use the latest path"
                    );
                }
            }
        }

        let names: Vec<&str> = spec
            .prefix_names()
            .chain(own.iter().map(String::as_str))
            .chain(spec.postfix_names())
            .collect();

        for name in spec.prefix_names().chain(spec.postfix_names()) {
            self.paths.record(name, &path);
        }

        let chain = names
            .iter()
            .map(|name| {
                self.namespace
                    .resolve(name)
                    .cloned()
                    .map_err(|_| RouteError::UnresolvedHandler {
                        name: name.to_string(),
                        path: path.clone(),
                    })
            })
            .collect::<RouteResult<Vec<H>>>()?;

        for method in &key.methods {
            tracing::debug!(
                method = %method,
                path = %path,
                handlers = chain.len(),
                "Route bound"
            );
            self.dispatcher.bind(*method, &path, chain.clone());
            self.summary.bindings += 1;
        }
        self.summary.leaves += 1;
        Ok(())
    }
}
