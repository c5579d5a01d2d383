//! End-to-end loader and action calls.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Response, StatusCode};
use futures_util::future::{BoxFuture, FutureExt};
use route_data::data::{
    call_route_action, call_route_loader, DataError, DataFunction, DataFunctionArgs,
    DataFunctionError, DataFunctionResult, DataFunctionValue, Params,
};
use route_data::http::{extract_data, is_catch_response, redirect, ExtractedData};
use route_data::{RouteModule, RuntimeConfig, ServerRoute};

mod common;
use common::{call_args, form, request, Session};

/// Loader that requires a signed in user and redirects otherwise.
async fn dashboard_loader(args: DataFunctionArgs) -> DataFunctionResult {
    let session = args.context.get::<Session>().cloned();
    match session.and_then(|s| s.user) {
        Some(user) => DataFunctionValue::json(serde_json::json!({ "user": user })),
        None => Err(redirect("/login").map_err(DataFunctionError::error)?.into()),
    }
}

/// Action that reads the submitted form and echoes the normalized URI.
async fn create_project(args: DataFunctionArgs) -> DataFunctionResult {
    let uri = args.request.uri().to_string();
    let body = to_bytes(args.request.into_body(), 1024)
        .await
        .map_err(DataFunctionError::error)?;
    let name = url::form_urlencoded::parse(&body)
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.into_owned());

    match name {
        Some(name) => DataFunctionValue::json(serde_json::json!({ "name": name, "uri": uri })),
        None => {
            let response = Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .body(Body::from("name is required"))
                .map_err(DataFunctionError::error)?;
            Err(response.into())
        }
    }
}

/// Counts invocations; implemented by hand rather than through a closure.
struct CountingLoader {
    calls: Arc<AtomicU32>,
}

impl DataFunction for CountingLoader {
    fn call(&self, args: DataFunctionArgs) -> BoxFuture<'static, DataFunctionResult> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            let id = args.params.get("id").cloned().unwrap_or_default();
            DataFunctionValue::json(serde_json::json!({ "id": id, "count": count }))
        }
        .boxed()
    }
}

fn limit() -> usize {
    RuntimeConfig::default().data.max_body_bytes
}

#[tokio::test]
async fn test_loader_reads_load_context() {
    let response = call_route_loader(call_args(
        "routes/dashboard",
        &dashboard_loader,
        request(Method::GET, "/dashboard?_data=routes%2Fdashboard"),
        Some("ada"),
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data = extract_data(response, limit()).await.unwrap();
    assert_eq!(data, ExtractedData::Json(serde_json::json!({ "user": "ada" })));
}

#[tokio::test]
async fn test_loader_redirect_is_returned_unmarked() {
    let response = call_route_loader(call_args(
        "routes/dashboard",
        &dashboard_loader,
        request(Method::GET, "/dashboard"),
        None,
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert!(!is_catch_response(&response));
}

#[tokio::test]
async fn test_action_sees_normalized_request_and_body() {
    let response = call_route_action(call_args(
        "routes/projects",
        &create_project,
        form("/projects?index&_data=routes%2Fprojects%2Findex", "name=Rocket+Ship"),
        Some("ada"),
    ))
    .await
    .unwrap();

    let data = extract_data(response, limit()).await.unwrap();
    assert_eq!(
        data,
        ExtractedData::Json(serde_json::json!({ "name": "Rocket Ship", "uri": "/projects" }))
    );
}

#[tokio::test]
async fn test_action_thrown_response_is_caught() {
    let response = call_route_action(call_args(
        "routes/projects",
        &create_project,
        form("/projects", "other=1"),
        None,
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(is_catch_response(&response));
    let data = extract_data(response, limit()).await.unwrap();
    assert_eq!(data, ExtractedData::Text("name is required".into()));
}

#[tokio::test]
async fn test_handwritten_data_function() {
    let calls = Arc::new(AtomicU32::new(0));
    let route = ServerRoute::new(
        "routes/items/$id",
        RouteModule::new().with_loader(CountingLoader {
            calls: calls.clone(),
        }),
    )
    .with_path("items/:id");

    for _ in 0..2 {
        let params = Params::from([("id".to_string(), "42".to_string())]);
        let response = route
            .call_loader(request(Method::GET, "/items/42"), params, Default::default())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_undefined_and_missing_handlers() {
    let route = ServerRoute::new(
        "routes/logout",
        RouteModule::new().with_action(|_args: DataFunctionArgs| async {
            Ok::<_, DataFunctionError>(DataFunctionValue::Undefined)
        }),
    );

    let err = route
        .call_action(request(Method::POST, "/logout"), Params::new(), Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NoReturnValue { .. }));
    assert!(err.to_string().contains("You defined an action for route \"routes/logout\""));

    let err = route
        .call_loader(request(Method::GET, "/logout"), Params::new(), Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NoHandler { .. }));
}
