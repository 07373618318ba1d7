//! Handler chains.
//!
//! # Responsibilities
//! - Wrap async functions as chain links
//! - Run a chain in order, stopping at the first link that responds
//!
//! # Design Decisions
//! - A link either passes the request on (`Flow::Next`) or answers it
//!   (`Flow::Done`); there is no implicit `next` callback
//! - A chain that runs out without answering yields 404, as if no route matched

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

/// Outcome of one chain link.
pub enum Flow {
    /// Continue with the next link.
    Next(Request),
    /// Stop and send this response.
    Done(Response),
}

impl Flow {
    pub fn respond(response: impl IntoResponse) -> Self {
        Flow::Done(response.into_response())
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Next(req) => f.debug_tuple("Next").field(req.uri()).finish(),
            Flow::Done(res) => f.debug_tuple("Done").field(&res.status()).finish(),
        }
    }
}

type LinkFn = dyn Fn(Request) -> BoxFuture<'static, Flow> + Send + Sync;

/// One link of a handler chain, cheap to clone.
#[derive(Clone)]
pub struct ChainHandler {
    name: Arc<str>,
    call: Arc<LinkFn>,
}

impl ChainHandler {
    /// A link that may pass the request on or answer it.
    pub fn new<F, Fut>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Flow> + Send + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(move |req| f(req).boxed()),
        }
    }

    /// A terminal link that always answers.
    pub fn endpoint<F, Fut, R>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self::new(name, move |req| {
            let fut = f(req);
            async move { Flow::Done(fut.await.into_response()) }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, req: Request) -> BoxFuture<'static, Flow> {
        (self.call)(req)
    }
}

impl fmt::Debug for ChainHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHandler").field("name", &self.name).finish()
    }
}

/// Run `chain` against `req`.
pub async fn run_chain(chain: &[ChainHandler], mut req: Request) -> Response {
    for link in chain {
        match link.call(req).await {
            Flow::Next(next) => req = next,
            Flow::Done(response) => {
                tracing::trace!(handler = link.name(), status = %response.status(), "Chain answered");
                return response;
            }
        }
    }

    tracing::debug!(path = %req.uri().path(), "Chain finished without a response");
    StatusCode::NOT_FOUND.into_response()
}
