//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Method, Request};
use route_data::data::{AppLoadContext, CallRouteArgs, DataFunction, Params};

/// Session data a server adapter would put into the load context.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<String>,
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

/// Build call arguments with a session for `user` in the load context.
pub fn call_args<'a>(
    route_id: &'a str,
    handler: &'a dyn DataFunction,
    request: Request<Body>,
    user: Option<&str>,
) -> CallRouteArgs<'a> {
    CallRouteArgs {
        load_context: AppLoadContext::new().with(Session {
            user: user.map(str::to_string),
        }),
        route_id,
        handler,
        params: Params::new(),
        request,
    }
}
