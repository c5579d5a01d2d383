//! Loader and action invocation for a server-side route runtime.
//!
//! Given a matched route and an incoming request, calls the route's `loader`
//! (reads) or `action` (writes) and turns whatever the handler produced into a
//! response.

pub mod config;
pub mod data;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RuntimeConfig;
pub use data::{call_route_action, call_route_loader, CallRouteArgs, DataError};
pub use http::extract_data;
pub use routing::{RouteModule, ServerRoute};
