//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway.toml (optional)          routes.json (optional)
//!     → loader.rs (parse)              → loader.rs (parse, resolve defaults)
//!     → GatewayConfig                  → validation.rs (semantic checks)
//!                                      → Vec<RouteConfig> → routing::Router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All settings have defaults to allow running with no config file
//! - A missing route file means an empty route set, not a startup failure
//! - A malformed route file fails fast at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_routes, ConfigError};
pub use schema::{
    AdminConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RouteConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
