//! Loader and action invocation.
//!
//! # Data Flow
//! ```text
//! Request
//!     → strip_index_param / strip_data_param
//!     → DataFunction::call({ request, context, params })
//!     → Ok(Response)            → returned as is
//!     → Ok(Data)                → json()
//!     → Ok(Undefined)           → DataError::NoReturnValue
//!     → Err(Response) redirect  → returned as is
//!     → Err(Response) other     → X-Remix-Catch: yes, returned
//!     → Err(Error)              → DataError::Handler
//! ```

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};

use crate::data::error::{DataError, DataResult};
use crate::data::function::{
    AppLoadContext, DataFunction, DataFunctionArgs, DataFunctionError, DataFunctionKind,
    DataFunctionValue, Params,
};
use crate::http::request::normalize_request;
use crate::http::response::{is_redirect_response, json, X_REMIX_CATCH};
use crate::observability::metrics::{self, CallOutcome};

/// Everything needed to call one route's loader or action.
pub struct CallRouteArgs<'a> {
    pub load_context: AppLoadContext,
    pub route_id: &'a str,
    pub handler: &'a dyn DataFunction,
    pub params: Params,
    pub request: Request<Body>,
}

/// Invoke a route action and normalize its result into a response.
pub async fn call_route_action(args: CallRouteArgs<'_>) -> DataResult<Response<Body>> {
    call_route(DataFunctionKind::Action, args).await
}

/// Invoke a route loader and normalize its result into a response.
pub async fn call_route_loader(args: CallRouteArgs<'_>) -> DataResult<Response<Body>> {
    call_route(DataFunctionKind::Loader, args).await
}

async fn call_route(kind: DataFunctionKind, args: CallRouteArgs<'_>) -> DataResult<Response<Body>> {
    let start = Instant::now();
    let CallRouteArgs {
        load_context,
        route_id,
        handler,
        params,
        request,
    } = args;

    tracing::debug!(
        route_id = %route_id,
        kind = %kind,
        method = %request.method(),
        path = %request.uri().path(),
        "Calling route data function"
    );

    let request = normalize_request(request)?;

    let value = match handler
        .call(DataFunctionArgs {
            request,
            context: load_context,
            params,
        })
        .await
    {
        Ok(value) => value,
        Err(DataFunctionError::Response(mut response)) => {
            let outcome = if is_redirect_response(&response) {
                CallOutcome::Redirect
            } else {
                response
                    .headers_mut()
                    .insert(X_REMIX_CATCH.clone(), HeaderValue::from_static("yes"));
                CallOutcome::Caught
            };
            tracing::debug!(
                route_id = %route_id,
                kind = %kind,
                status = %response.status(),
                outcome = outcome.as_str(),
                "Data function failed with a response"
            );
            metrics::record_call(kind, outcome, start);
            return Ok(response);
        }
        Err(DataFunctionError::Error(error)) => {
            tracing::debug!(route_id = %route_id, kind = %kind, error = %error, "Data function failed");
            metrics::record_call(kind, CallOutcome::Error, start);
            return Err(DataError::Handler(error));
        }
    };

    match value {
        DataFunctionValue::Response(response) => {
            metrics::record_call(kind, CallOutcome::Response, start);
            Ok(response)
        }
        DataFunctionValue::Data(data) => {
            let response = json(&data)?;
            metrics::record_call(kind, CallOutcome::Data, start);
            Ok(response)
        }
        DataFunctionValue::Undefined => {
            tracing::warn!(route_id = %route_id, kind = %kind, "Data function returned nothing");
            metrics::record_call(kind, CallOutcome::Undefined, start);
            Err(DataError::NoReturnValue {
                kind,
                route_id: route_id.to_string(),
            })
        }
    }
}
