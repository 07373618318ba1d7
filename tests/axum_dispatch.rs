//! Serving a compiled route tree through axum.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Path, Request};
use axum::http::StatusCode;
use axum::RequestExt;
use route_tree::http::{AxumDispatcher, ChainHandler, Flow};
use route_tree::{HandlerNamespace, RouteNode, Router};
use serde_json::json;
use tower::ServiceExt;

fn namespace() -> HandlerNamespace<ChainHandler> {
    HandlerNamespace::new()
        .with(
            "auth.require",
            ChainHandler::new("auth.require", |req: Request| async move {
                if req.headers().contains_key("authorization") {
                    Flow::Next(req)
                } else {
                    Flow::respond(StatusCode::UNAUTHORIZED)
                }
            }),
        )
        .unwrap()
        .with(
            "home.index",
            ChainHandler::endpoint("home.index", |_req| async { "home" }),
        )
        .unwrap()
        .with(
            "social.profile",
            ChainHandler::endpoint("social.profile", |mut req: Request| async move {
                let Path(params) = req
                    .extract_parts::<Path<HashMap<String, String>>>()
                    .await
                    .unwrap();
                format!("profile of {}", params["username"])
            }),
        )
        .unwrap()
        .with(
            "social.update",
            ChainHandler::endpoint("social.update", |_req| async { StatusCode::NO_CONTENT }),
        )
        .unwrap()
        .with(
            "pages.list",
            ChainHandler::endpoint("pages.list", |req: Request| async move {
                req.uri().path().to_string()
            }),
        )
        .unwrap()
        .with(
            "any.echo",
            ChainHandler::endpoint("any.echo", |req: Request| async move {
                req.method().to_string()
            }),
        )
        .unwrap()
}

fn app() -> axum::Router {
    let tree = RouteNode::from_value(&json!({
        "/": "home.index",
        "/social": {
            "Required": { "prefix": ["auth.require"] },
            ":username": "social.profile",
            "put/:username": "social.update"
        },
        "/pages/:page?": "pages.list",
        "all/echo": "any.echo"
    }))
    .unwrap();

    let mut router = Router::new();
    let mut dispatcher = AxumDispatcher::new();
    router
        .register_routes(&mut dispatcher, &tree, &namespace())
        .unwrap();
    dispatcher.into_router().unwrap()
}

async fn send(method: &str, uri: &str, authorized: bool) -> (StatusCode, String) {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    if authorized {
        builder = builder.header("authorization", "Bearer token");
    }
    let response = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_plain_route() {
    assert_eq!(send("GET", "/", false).await, (StatusCode::OK, "home".into()));
}

#[tokio::test]
async fn test_prefix_middleware_short_circuits() {
    let (status, _) = send("GET", "/social/ann", false).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(
        send("GET", "/social/ann", true).await,
        (StatusCode::OK, "profile of ann".into())
    );
}

#[tokio::test]
async fn test_methods_share_a_path() {
    let (status, _) = send("PUT", "/social/ann", true).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send("DELETE", "/social/ann", true).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_optional_segment_serves_both_forms() {
    assert_eq!(send("GET", "/pages", false).await, (StatusCode::OK, "/pages".into()));
    assert_eq!(send("GET", "/pages/2", false).await, (StatusCode::OK, "/pages/2".into()));
}

#[tokio::test]
async fn test_all_method_matches_anything() {
    assert_eq!(send("POST", "/echo", false).await, (StatusCode::OK, "POST".into()));
    assert_eq!(send("DELETE", "/echo", false).await, (StatusCode::OK, "DELETE".into()));
}

#[tokio::test]
async fn test_unbound_path_is_not_found() {
    let (status, _) = send("GET", "/nowhere", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_two_optional_segments_bind_left_to_right() {
    let pair = ChainHandler::endpoint("pages.pair", |mut req: Request| async move {
        let Path(params) = req
            .extract_parts::<Path<HashMap<String, String>>>()
            .await
            .unwrap();
        let get = |key: &str| params.get(key).cloned().unwrap_or_else(|| "-".into());
        format!("a={} b={}", get("a"), get("b"))
    });
    let namespace = HandlerNamespace::new().with("pages.pair", pair).unwrap();
    let tree = RouteNode::from_value(&json!({ "/:a?/:b?": "pages.pair" })).unwrap();

    let mut dispatcher = AxumDispatcher::new();
    Router::new()
        .register_routes(&mut dispatcher, &tree, &namespace)
        .unwrap();
    let app = dispatcher.into_router().unwrap();

    for (uri, expected) in [("/x", "a=x b=-"), ("/x/y", "a=x b=y")] {
        let request = axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "status for {uri}");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], expected.as_bytes(), "body for {uri}");
    }
}
