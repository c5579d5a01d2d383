//! Server-side route definitions.
//!
//! A route carries the module supplied by the build: an optional loader and an
//! optional action. Matching happens elsewhere; this type only knows how to
//! hand a matched request to the right data function.

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::data::{
    call_route_action, call_route_loader, AppLoadContext, CallRouteArgs, DataError,
    DataFunction, DataFunctionKind, DataResult, Params,
};

/// Data functions exported by a route module.
#[derive(Clone, Default)]
pub struct RouteModule {
    pub loader: Option<Arc<dyn DataFunction>>,
    pub action: Option<Arc<dyn DataFunction>>,
}

impl RouteModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader<F: DataFunction + 'static>(mut self, loader: F) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_action<F: DataFunction + 'static>(mut self, action: F) -> Self {
        self.action = Some(Arc::new(action));
        self
    }
}

impl fmt::Debug for RouteModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModule")
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// A route in the server route tree.
#[derive(Debug, Clone)]
pub struct ServerRoute {
    /// Route identifier, e.g. `routes/projects/$id`.
    pub id: String,
    pub parent_id: Option<String>,
    pub path: Option<String>,
    /// Index routes render at their parent's path.
    pub index: bool,
    pub module: RouteModule,
}

impl ServerRoute {
    pub fn new(id: impl Into<String>, module: RouteModule) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            path: None,
            index: false,
            module,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn as_index(mut self) -> Self {
        self.index = true;
        self
    }

    pub fn loader(&self) -> Option<&Arc<dyn DataFunction>> {
        self.module.loader.as_ref()
    }

    pub fn action(&self) -> Option<&Arc<dyn DataFunction>> {
        self.module.action.as_ref()
    }

    /// Call this route's loader.
    pub async fn call_loader(
        &self,
        request: Request<Body>,
        params: Params,
        load_context: AppLoadContext,
    ) -> DataResult<Response<Body>> {
        let loader = self.require(DataFunctionKind::Loader, &request)?;
        call_route_loader(CallRouteArgs {
            load_context,
            route_id: &self.id,
            handler: loader.as_ref(),
            params,
            request,
        })
        .await
    }

    /// Call this route's action.
    pub async fn call_action(
        &self,
        request: Request<Body>,
        params: Params,
        load_context: AppLoadContext,
    ) -> DataResult<Response<Body>> {
        let action = self.require(DataFunctionKind::Action, &request)?;
        call_route_action(CallRouteArgs {
            load_context,
            route_id: &self.id,
            handler: action.as_ref(),
            params,
            request,
        })
        .await
    }

    fn require(
        &self,
        kind: DataFunctionKind,
        request: &Request<Body>,
    ) -> DataResult<&Arc<dyn DataFunction>> {
        let handler = match kind {
            DataFunctionKind::Loader => self.loader(),
            DataFunctionKind::Action => self.action(),
        };
        handler.ok_or_else(|| {
            tracing::warn!(
                route_id = %self.id,
                kind = %kind,
                method = %request.method(),
                "Route has no data function for request"
            );
            DataError::NoHandler {
                kind,
                method: request.method().clone(),
                path: request.uri().path().to_string(),
                route_id: self.id.clone(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataFunctionArgs, DataFunctionResult, DataFunctionValue};
    use axum::http::{Method, StatusCode};

    async fn loader(args: DataFunctionArgs) -> DataFunctionResult {
        Ok(DataFunctionValue::Data(serde_json::json!(args.params)))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_builder() {
        let route = ServerRoute::new("routes/index", RouteModule::new().with_loader(loader))
            .with_parent("root")
            .with_path("/")
            .as_index();
        assert_eq!(route.parent_id.as_deref(), Some("root"));
        assert!(route.index);
        assert!(route.loader().is_some());
        assert!(route.action().is_none());
        assert_eq!(format!("{:?}", route.module), "RouteModule { loader: true, action: false }");
    }

    #[tokio::test]
    async fn test_call_loader() {
        let route = ServerRoute::new("routes/user", RouteModule::new().with_loader(loader));
        let params = Params::from([("id".to_string(), "1".to_string())]);
        let response = route
            .call_loader(get("/users/1"), params, AppLoadContext::new())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_action() {
        let route = ServerRoute::new("routes/user", RouteModule::new().with_loader(loader));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users/1")
            .body(Body::empty())
            .unwrap();

        let err = route
            .call_action(request, Params::new(), AppLoadContext::new())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You made a POST request to \"/users/1\" but did not provide an `action` for route \"routes/user\", so there is no way to handle the request."
        );
    }
}
