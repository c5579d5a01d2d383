//! HTTP helpers around loader and action calls.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → request.rs (strip `index` / `_data` query params)
//!     → [loader or action]
//!     → response.rs (json / redirect, catch marking, body extraction)
//! ```

pub mod request;
pub mod response;

pub use request::{normalize_request, strip_data_param, strip_index_param, RequestError};
pub use response::{
    extract_data, extract_data_with_config, is_catch_response, is_redirect_response, is_redirect_status, json,
    json_with_init, redirect, redirect_with_init, ExtractedData, ResponseError, ResponseInit,
    X_REMIX_CATCH,
};
