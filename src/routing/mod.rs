//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! [external matcher] → matched ServerRoute + Params
//!     → route.rs (pick loader or action)
//!     → data::call_route_loader / call_route_action
//! ```

pub mod route;

pub use route::{RouteModule, ServerRoute};
