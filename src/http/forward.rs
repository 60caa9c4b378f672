//! Request forwarding to route targets.
//!
//! # Responsibilities
//! - Buffer the inbound body (bounded; the router's limit layer rejects
//!   declared oversize bodies before they get here)
//! - Execute the outbound call with method, headers and body preserved
//! - Relay backend status, headers and body; translate transport failures
//!
//! # Design Decisions
//! - Redirects are never followed; a 3xx goes back to the caller untouched
//! - No retries: one outbound attempt per inbound request
//! - Connect and total timeouts are finite; expiry is a transport failure
//! - Stateless per call; safe to share behind an Arc

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::Request,
    response::Response,
};
use http_body_util::LengthLimitError;

use crate::config::{LimitsConfig, TimeoutConfig};
use crate::http::request::{build_target_url, forward_headers};
use crate::http::response::{relay_headers, GatewayError};
use crate::routing::Route;

/// Forwards matched requests to their backend.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Forwarder {
    /// Build a forwarder with its own outbound client.
    pub fn new(timeouts: &TimeoutConfig, limits: &LimitsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: limits.max_body_bytes,
        })
    }

    /// Forward `request` to the backend of `route`.
    pub async fn forward(
        &self,
        route: &Route,
        request: Request<Body>,
    ) -> Result<Response, GatewayError> {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path();
        let target_url = build_target_url(route, path, parts.uri.query());

        let body = read_body(body, self.max_body_bytes).await?;

        tracing::info!(
            method = %parts.method,
            path = %path,
            target_url = %target_url,
            "Forwarding request"
        );

        let upstream = self
            .client
            .request(parts.method.clone(), &target_url)
            .headers(forward_headers(&parts.headers))
            .body(body)
            .send()
            .await
            .map_err(|e| backend_failure(route, &e))?;

        let status = upstream.status();
        let headers = relay_headers(upstream.headers());
        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| backend_failure(route, &e))?;

        tracing::info!(
            status = status.as_u16(),
            backend = %route.target(),
            "Backend responded"
        );

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

fn backend_failure(route: &Route, err: &reqwest::Error) -> GatewayError {
    let failure = GatewayError::unreachable(route.target(), err);
    tracing::error!(backend = %route.target(), error = %failure, "Proxy error");
    failure
}

/// Collect the inbound body, refusing anything over `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| body_failure(&e, limit))
}

fn body_failure(err: &axum::Error, limit: usize) -> GatewayError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = source {
        if cause.is::<LengthLimitError>() {
            return GatewayError::PayloadTooLarge { limit };
        }
        source = cause.source();
    }
    GatewayError::InvalidRequestBody {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_body_within_limit() {
        let bytes = read_body(Body::from("hello"), 5).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn rejects_body_over_limit() {
        let result = read_body(Body::from("hello!"), 5).await;
        assert!(matches!(result, Err(GatewayError::PayloadTooLarge { limit: 5 })));
    }

    #[tokio::test]
    async fn limit_from_outer_layer_is_payload_too_large() {
        let limited = http_body_util::Limited::new(Body::from("0123456789"), 4);
        let result = read_body(Body::new(limited), usize::MAX).await;
        assert!(matches!(result, Err(GatewayError::PayloadTooLarge { .. })));
    }

    #[tokio::test]
    async fn empty_body_is_empty() {
        let bytes = read_body(Body::empty(), 0).await.unwrap();
        assert!(bytes.is_empty());
    }
}
