//! Loader and action function types.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

/// Boxed error a data function may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Route parameters extracted by the matcher (`*` holds a splat).
pub type Params = HashMap<String, String>;

/// Which data function of a route is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFunctionKind {
    Loader,
    Action,
}

impl DataFunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFunctionKind::Loader => "loader",
            DataFunctionKind::Action => "action",
        }
    }
}

impl fmt::Display for DataFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context handed from the server adapter to every loader and action.
///
/// Values are keyed by type; cloning shares the same storage.
#[derive(Clone, Default)]
pub struct AppLoadContext {
    values: Arc<HashMap<std::any::TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl AppLoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value of the same type.
    pub fn with<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        Arc::make_mut(&mut self.values).insert(std::any::TypeId::of::<T>(), Arc::new(value));
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values
            .get(&std::any::TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for AppLoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppLoadContext")
            .field("values", &self.values.len())
            .finish()
    }
}

/// Arguments a loader or action is called with.
#[derive(Debug)]
pub struct DataFunctionArgs {
    pub request: Request<Body>,
    pub context: AppLoadContext,
    pub params: Params,
}

/// What a loader or action produced.
#[derive(Debug)]
pub enum DataFunctionValue {
    /// A response passed through untouched.
    Response(Response<Body>),
    /// Data serialized to a JSON response (`Value::Null` included).
    Data(serde_json::Value),
    /// Nothing was returned.
    Undefined,
}

impl DataFunctionValue {
    /// Serialize any value into `Data`.
    pub fn json<T: serde::Serialize>(data: T) -> Result<Self, DataFunctionError> {
        serde_json::to_value(data)
            .map(DataFunctionValue::Data)
            .map_err(DataFunctionError::error)
    }

    pub fn null() -> Self {
        DataFunctionValue::Data(serde_json::Value::Null)
    }
}

impl From<Response<Body>> for DataFunctionValue {
    fn from(response: Response<Body>) -> Self {
        DataFunctionValue::Response(response)
    }
}

impl From<serde_json::Value> for DataFunctionValue {
    fn from(value: serde_json::Value) -> Self {
        DataFunctionValue::Data(value)
    }
}

impl From<()> for DataFunctionValue {
    fn from(_: ()) -> Self {
        DataFunctionValue::Undefined
    }
}

/// How a loader or action failed.
///
/// Failing with a response is how a handler bails out early with a redirect
/// or an error page; any other error propagates to the caller unchanged.
#[derive(Debug)]
pub enum DataFunctionError {
    Response(Response<Body>),
    Error(BoxError),
}

impl DataFunctionError {
    pub fn error<E: Into<BoxError>>(error: E) -> Self {
        DataFunctionError::Error(error.into())
    }
}

impl From<Response<Body>> for DataFunctionError {
    fn from(response: Response<Body>) -> Self {
        DataFunctionError::Response(response)
    }
}

impl From<BoxError> for DataFunctionError {
    fn from(error: BoxError) -> Self {
        DataFunctionError::Error(error)
    }
}

pub type DataFunctionResult = Result<DataFunctionValue, DataFunctionError>;

/// A route loader or action.
///
/// Implemented for every `Fn(DataFunctionArgs) -> impl Future<Output = DataFunctionResult>`.
pub trait DataFunction: Send + Sync {
    fn call(&self, args: DataFunctionArgs) -> BoxFuture<'static, DataFunctionResult>;
}

impl<F, Fut> DataFunction for F
where
    F: Fn(DataFunctionArgs) -> Fut + Send + Sync,
    Fut: Future<Output = DataFunctionResult> + Send + 'static,
{
    fn call(&self, args: DataFunctionArgs) -> BoxFuture<'static, DataFunctionResult> {
        Box::pin(self(args))
    }
}
