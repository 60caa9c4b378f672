//! Route validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty path prefixes
//! - Reject targets that are not absolute http(s) URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before routes are handed to the router

use url::Url;

use crate::config::schema::RouteConfig;

/// A semantic problem with one route record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route #{index}: path must not be empty")]
    EmptyPath { index: usize },

    #[error("route #{index} ({path}): invalid target {target:?}: {reason}")]
    InvalidTarget {
        index: usize,
        path: String,
        target: String,
        reason: String,
    },
}

/// Validate every route, collecting all errors.
pub fn validate_routes(routes: &[RouteConfig]) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = routes
        .iter()
        .enumerate()
        .flat_map(|(index, route)| validate_route(index, route))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(index: usize, route: &RouteConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if route.path.is_empty() {
        errors.push(ValidationError::EmptyPath { index });
    }

    if let Err(reason) = check_target(&route.target) {
        errors.push(ValidationError::InvalidTarget {
            index,
            path: route.path.clone(),
            target: route.target.clone(),
            reason,
        });
    }

    errors
}

fn check_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err("missing host".to_string()),
    }
}
