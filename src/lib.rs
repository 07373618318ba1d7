//! Declarative route trees for web applications.
//!
//! A route tree maps keys such as `get,post/login` to handler names, groups
//! nest paths, and `Required` declarations inject middleware around every
//! binding below a group. Compiling a tree binds concrete handler chains on a
//! [`dispatch::Dispatcher`] and remembers each handler's path so URLs can be
//! generated back from handler names.

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{Dispatcher, RecordingDispatcher};
pub use handlers::HandlerNamespace;
pub use routing::{Method, RouteError, RouteNode, Router};
