//! Error definitions for data function calls.

use axum::http::Method;
use thiserror::Error;

use crate::data::function::{BoxError, DataFunctionKind};
use crate::http::request::RequestError;
use crate::http::response::ResponseError;

/// Errors that can occur while calling a loader or action.
#[derive(Debug, Error)]
pub enum DataError {
    /// The handler finished without producing a value.
    #[error(
        "You defined {} for route \"{route_id}\" but didn't return anything from your `{kind}` function. Please return a value or `null`.",
        indefinite(.kind)
    )]
    NoReturnValue {
        kind: DataFunctionKind,
        route_id: String,
    },

    /// The route has no handler for the requested kind.
    #[error(
        "You made a {method} request to \"{path}\" but did not provide {} for route \"{route_id}\", so there is no way to handle the request.",
        quoted_indefinite(.kind)
    )]
    NoHandler {
        kind: DataFunctionKind,
        method: Method,
        path: String,
        route_id: String,
    },

    /// The handler failed with an error that is not a response.
    #[error(transparent)]
    Handler(BoxError),

    /// The request URI could not be normalized.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The returned data could not be turned into a response.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

fn indefinite(kind: &DataFunctionKind) -> &'static str {
    match kind {
        DataFunctionKind::Loader => "a loader",
        DataFunctionKind::Action => "an action",
    }
}

fn quoted_indefinite(kind: &DataFunctionKind) -> &'static str {
    match kind {
        DataFunctionKind::Loader => "a `loader`",
        DataFunctionKind::Action => "an `action`",
    }
}

/// Result type for data function calls.
pub type DataResult<T> = Result<T, DataError>;
