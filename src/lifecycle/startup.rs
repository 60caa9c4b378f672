//! Startup orchestration.
//!
//! # Responsibilities
//! - Load gateway settings and the route file
//! - Compile the immutable router
//! - Report the route table before traffic is accepted
//!
//! # Design Decisions
//! - Fail fast: a malformed route file is fatal
//! - A missing route file is not: every request gets 404

use std::path::Path;

use crate::config::{load_config, load_routes, ConfigError, GatewayConfig};
use crate::routing::Router;

/// Load settings from `config_path`, or use defaults when none is given.
pub fn load_settings(config_path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}

/// Load the route file named by `config` and compile it.
pub fn build_router(config: &GatewayConfig) -> Result<Router, ConfigError> {
    let routes = load_routes(&config.routes_file)?;
    Ok(Router::new(routes))
}

/// Log the route table in match order.
pub fn log_route_table(router: &Router) {
    tracing::info!(
        enabled = router.enabled_count(),
        total = router.len(),
        "Active routes"
    );

    for route in router.routes() {
        if route.enabled() {
            tracing::info!(
                path = %route.path(),
                target_url = %route.target(),
                description = %route.description(),
                "Route enabled"
            );
        } else {
            tracing::warn!(
                path = %route.path(),
                target_url = %route.target(),
                "Route disabled"
            );
        }
    }
}
