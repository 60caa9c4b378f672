//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::{GatewayConfig, RouteConfig};
use crate::config::validation::{validate_routes, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load gateway settings from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and validate the route file.
///
/// A missing file is not an error: the gateway starts with no routes and
/// answers every request with 404.
pub fn load_routes(path: &Path) -> Result<Vec<RouteConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Route file not found, starting with no routes");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let routes = parse_routes(&content).map_err(|message| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    })?;

    validate_routes(&routes).map_err(ConfigError::Validation)?;

    tracing::info!(path = %path.display(), count = routes.len(), "Routes loaded");
    Ok(routes)
}

/// Parse a JSON array of route records.
pub fn parse_routes(content: &str) -> Result<Vec<RouteConfig>, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}
