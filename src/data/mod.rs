//! Route data subsystem: calling loaders and actions.
//!
//! # Data Flow
//! ```text
//! matched route + incoming request
//!     → call.rs (normalize request, invoke handler, coerce result)
//!     → function.rs (handler contract: args, values, failures)
//!     → error.rs (what the caller sees when no response comes out)
//! ```
//!
//! # Design Decisions
//! - Loaders and actions share one invocation path, differing only in kind
//! - A handler failing with a response is a result, not an error
//! - Returning nothing is an error; returning JSON `null` is not

pub mod call;
pub mod error;
pub mod function;

pub use call::{call_route_action, call_route_loader, CallRouteArgs};
pub use error::{DataError, DataResult};
pub use function::{
    AppLoadContext, BoxError, DataFunction, DataFunctionArgs, DataFunctionError,
    DataFunctionKind, DataFunctionResult, DataFunctionValue, Params,
};
