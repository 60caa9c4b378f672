//! Request handling and transformation.
//!
//! # Responsibilities
//! - Rewrite the request path onto the route target
//! - Carry the raw query string over verbatim
//! - Prepare inbound headers for forwarding
//!
//! # Design Decisions
//! - Path and query are never decoded or re-encoded
//! - Only Host is dropped; the client sets it from the target URL

use axum::http::{header, HeaderMap};

use crate::routing::Route;

/// Build the backend URL for `path` (and `query`) matched by `route`.
///
/// `route.target` with trailing slashes stripped, followed by the part of
/// the path after the route prefix, followed by `?query` if non-empty.
pub fn build_target_url(route: &Route, path: &str, query: Option<&str>) -> String {
    let remainder = route.matcher().remainder(path).unwrap_or_default();

    let mut url = String::with_capacity(route.target().len() + remainder.len());
    url.push_str(route.target().trim_end_matches('/'));
    url.push_str(&remainder);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Copy inbound headers for the outbound request, minus Host.
pub fn forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    headers
}
