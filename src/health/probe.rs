//! On-demand route health probing.
//!
//! # Responsibilities
//! - Probe a route target with a bounded HEAD, so no body is transferred
//! - Report healthy on 2xx, unhealthy otherwise

use std::time::Duration;

use serde::Serialize;
use tokio::time;

use crate::routing::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteHealth {
    fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
        }
    }

    fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
        }
    }
}

pub struct HealthProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("path-gateway-health-check")
            .no_proxy()
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Probe the target of `route`, disabled or not.
    pub async fn probe(&self, route: &Route) -> RouteHealth {
        let target = route.target();
        let response_future = self.client.head(target).send();

        match time::timeout(self.timeout, response_future).await {
            Ok(Ok(response)) if response.status().is_success() => RouteHealth::healthy(),
            Ok(Ok(response)) => {
                tracing::warn!(target_url = %target, status = %response.status(), "Health check failed: non-success status");
                RouteHealth::unhealthy(format!("unexpected status {}", response.status()))
            }
            Ok(Err(e)) => {
                tracing::warn!(target_url = %target, error = %e, "Health check failed: connection error");
                RouteHealth::unhealthy(e.to_string())
            }
            Err(_) => {
                tracing::warn!(target_url = %target, "Health check failed: timeout");
                RouteHealth::unhealthy(format!("timed out after {:?}", self.timeout))
            }
        }
    }
}
