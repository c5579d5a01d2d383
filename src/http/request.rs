//! Request normalization before a loader or action sees the request.
//!
//! # Responsibilities
//! - Drop empty `index` query values, keep non-empty ones
//! - Drop the `_data` query parameter
//! - Preserve everything else (method, headers, body, extensions)
//!
//! # Design Decisions
//! - Query strings are re-serialized as `application/x-www-form-urlencoded`
//! - An empty resulting query drops the `?` entirely
//! - A URI without a path component is passed through untouched

use axum::body::Body;
use axum::http::uri::{InvalidUri, InvalidUriParts, PathAndQuery};
use axum::http::{Request, Uri};
use thiserror::Error;
use url::form_urlencoded;

/// Query parameter marking a request for an index route.
pub const INDEX_PARAM: &str = "index";

/// Query parameter selecting the route whose data is requested.
pub const DATA_PARAM: &str = "_data";

/// Errors raised while rewriting a request URI.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid path and query: {0}")]
    PathAndQuery(#[from] InvalidUri),

    #[error("invalid uri parts: {0}")]
    UriParts(#[from] InvalidUriParts),
}

/// Remove every `index` query value that is empty.
///
/// Non-empty values are kept but move behind all other parameters.
pub fn strip_index_param(request: Request<Body>) -> Result<Request<Body>, RequestError> {
    rewrite_query(request, |pairs| {
        let (index, mut rest): (Vec<_>, Vec<_>) =
            pairs.into_iter().partition(|(key, _)| key == INDEX_PARAM);
        rest.extend(index.into_iter().filter(|(_, value)| !value.is_empty()));
        rest
    })
}

/// Remove the `_data` query parameter.
pub fn strip_data_param(request: Request<Body>) -> Result<Request<Body>, RequestError> {
    rewrite_query(request, |pairs| {
        pairs
            .into_iter()
            .filter(|(key, _)| key != DATA_PARAM)
            .collect()
    })
}

/// Apply both rewrites in the order loaders and actions expect.
pub fn normalize_request(request: Request<Body>) -> Result<Request<Body>, RequestError> {
    strip_data_param(strip_index_param(request)?)
}

fn rewrite_query<F>(request: Request<Body>, edit: F) -> Result<Request<Body>, RequestError>
where
    F: FnOnce(Vec<(String, String)>) -> Vec<(String, String)>,
{
    let (mut parts, body) = request.into_parts();

    let Some(path_and_query) = parts.uri.path_and_query().cloned() else {
        return Ok(Request::from_parts(parts, body));
    };

    let pairs = path_and_query
        .query()
        .map(|query| {
            form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let query = serialize_query(edit(pairs));
    let rewritten = match query {
        Some(query) => format!("{}?{}", path_and_query.path(), query),
        None => path_and_query.path().to_string(),
    };

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.path_and_query = Some(PathAndQuery::try_from(rewritten)?);
    parts.uri = Uri::from_parts(uri_parts)?;

    Ok(Request::from_parts(parts, body))
}

fn serialize_query(pairs: Vec<(String, String)>) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(pairs);
    Some(serializer.finish())
}
