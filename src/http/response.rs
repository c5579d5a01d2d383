//! Response construction and inspection.
//!
//! # Responsibilities
//! - Build JSON and redirect responses
//! - Classify responses (redirect, caught)
//! - Read a response body back as JSON or text
//!
//! # Design Decisions
//! - JSON bodies are labeled `application/json; charset=utf-8`
//! - Redirect statuses are 301, 302, 303, 307 and 308
//! - Body reads are bounded by a caller supplied byte limit

use std::sync::LazyLock;

use axum::body::{to_bytes, Body};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use axum::http::{Response, StatusCode};
use regex::bytes::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::DataConfig;

/// Header marking a response a loader or action failed with on purpose.
pub static X_REMIX_CATCH: HeaderName = HeaderName::from_static("x-remix-catch");

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

// ASCII word boundaries; header values may carry obs-text bytes.
static JSON_CONTENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)application/json(?-u:\b)").expect("static regex is valid")
});

/// Errors raised while building or reading a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("failed to serialize JSON body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse JSON body: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),

    #[error("failed to build response: {0}")]
    Http(#[from] axum::http::Error),
}

/// Status and headers applied to a generated response.
#[derive(Debug, Clone, Default)]
pub struct ResponseInit {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
}

impl ResponseInit {
    pub fn status(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            headers: HeaderMap::new(),
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Serialize `data` into a 200 JSON response.
pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Response<Body>, ResponseError> {
    json_with_init(data, ResponseInit::default())
}

/// Serialize `data` into a JSON response with the given status and headers.
///
/// An explicit `Content-Type` in `init` wins over the JSON default.
pub fn json_with_init<T: Serialize + ?Sized>(
    data: &T,
    init: ResponseInit,
) -> Result<Response<Body>, ResponseError> {
    let body = serde_json::to_vec(data).map_err(ResponseError::Serialize)?;

    let mut response = Response::builder()
        .status(init.status.unwrap_or(StatusCode::OK))
        .body(Body::from(body))?;

    let headers = response.headers_mut();
    headers.extend(init.headers);
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
    }

    Ok(response)
}

/// A 302 redirect to `url`.
pub fn redirect(url: &str) -> Result<Response<Body>, ResponseError> {
    redirect_with_init(url, ResponseInit::status(StatusCode::FOUND))
}

/// A redirect to `url`; the status defaults to 302.
pub fn redirect_with_init(url: &str, init: ResponseInit) -> Result<Response<Body>, ResponseError> {
    let mut response = Response::builder()
        .status(init.status.unwrap_or(StatusCode::FOUND))
        .body(Body::empty())?;

    let headers = response.headers_mut();
    headers.extend(init.headers);
    headers.insert(header::LOCATION, HeaderValue::from_str(url)?);

    Ok(response)
}

pub fn is_redirect_status(status: StatusCode) -> bool {
    REDIRECT_STATUSES.contains(&status.as_u16())
}

pub fn is_redirect_response<B>(response: &Response<B>) -> bool {
    is_redirect_status(response.status())
}

/// Whether a loader or action deliberately failed with this response.
pub fn is_catch_response<B>(response: &Response<B>) -> bool {
    response.headers().contains_key(&X_REMIX_CATCH)
}

/// Body of a data response, decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedData {
    Json(serde_json::Value),
    Text(String),
}

/// Read the body of `response`, reading at most `limit` bytes.
///
/// JSON content types are parsed, everything else is decoded as UTF-8 with
/// invalid sequences replaced.
pub async fn extract_data(
    response: Response<Body>,
    limit: usize,
) -> Result<ExtractedData, ResponseError> {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| is_json_content_type(v.as_bytes()))
        .unwrap_or(false);

    let bytes = to_bytes(response.into_body(), limit).await?;

    if is_json {
        let value = serde_json::from_slice(&bytes).map_err(ResponseError::Parse)?;
        Ok(ExtractedData::Json(value))
    } else {
        Ok(ExtractedData::Text(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// [`extract_data`] bounded by the configured body limit.
pub async fn extract_data_with_config(
    response: Response<Body>,
    config: &DataConfig,
) -> Result<ExtractedData, ResponseError> {
    extract_data(response, config.max_body_bytes).await
}

/// Matches `application/json` bounded by non-word characters on both sides.
fn is_json_content_type(content_type: &[u8]) -> bool {
    JSON_CONTENT_TYPE_RE.is_match(content_type)
}
