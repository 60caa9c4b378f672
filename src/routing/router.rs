//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Sorted once, longest prefix first; stable on equal lengths
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Explicit NoMatch rather than silent default

use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    matcher: PathPrefixMatcher,
    target: String,
    enabled: bool,
    description: String,
}

impl Route {
    pub fn path(&self) -> &str {
        self.matcher.prefix()
    }

    /// Backend base URL as configured.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matcher(&self) -> &PathPrefixMatcher {
        &self.matcher
    }

    fn matches(&self, path: &str) -> bool {
        self.enabled && self.matcher.matches(path)
    }
}

impl From<RouteConfig> for Route {
    fn from(config: RouteConfig) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(config.path),
            target: config.target,
            enabled: config.enabled,
            description: config.description,
        }
    }
}

/// No enabled route matched the request path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route found for {path}")]
pub struct RouteNotFound {
    pub path: String,
}

/// Serializable view of a route for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub index: usize,
    pub path: String,
    pub target: String,
    pub enabled: bool,
    pub description: String,
}

/// Path-prefix router.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile routes, most specific prefix first.
    pub fn new(configs: Vec<RouteConfig>) -> Self {
        let mut routes: Vec<Route> = configs.into_iter().map(Route::from).collect();
        // sort_by_key is stable: equal lengths keep file order
        routes.sort_by_key(|r| std::cmp::Reverse(r.path().len()));
        Self { routes }
    }

    /// Find the most specific enabled route for `path`.
    pub fn match_path(&self, path: &str) -> Result<&Route, RouteNotFound> {
        self.routes
            .iter()
            .find(|r| r.matches(path))
            .ok_or_else(|| RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Every configured route in match order, disabled ones included.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, r)| RouteSummary {
                index,
                path: r.path().to_string(),
                target: r.target.clone(),
                enabled: r.enabled,
                description: r.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn enabled_count(&self) -> usize {
        self.routes.iter().filter(|r| r.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, target: &str) -> RouteConfig {
        RouteConfig::new(path, target)
    }

    #[test]
    fn longest_prefix_wins_regardless_of_file_order() {
        let router = Router::new(vec![
            route("/api", "http://v1:9000"),
            route("/api/v2", "http://v2:9000"),
        ]);

        assert_eq!(router.match_path("/api/v2/users").unwrap().target(), "http://v2:9000");
        assert_eq!(router.match_path("/api/v1/users").unwrap().target(), "http://v1:9000");
    }

    #[test]
    fn disabled_route_never_matches() {
        let mut config = route("/x", "http://x:1");
        config.enabled = false;
        let router = Router::new(vec![config]);

        let err = router.match_path("/x/y").unwrap_err();
        assert_eq!(err.path, "/x/y");
        // Still listed.
        assert_eq!(router.len(), 1);
        assert_eq!(router.enabled_count(), 0);
    }

    #[test]
    fn disabled_specific_route_falls_through_to_shorter_prefix() {
        let mut specific = route("/api/v2", "http://v2:9000");
        specific.enabled = false;
        let router = Router::new(vec![specific, route("/api", "http://v1:9000")]);

        assert_eq!(router.match_path("/api/v2/users").unwrap().target(), "http://v1:9000");
    }

    #[test]
    fn root_route_is_fallback() {
        let router = Router::new(vec![
            route("/", "http://web:3000"),
            route("/api", "http://api:9000"),
        ]);

        assert_eq!(router.match_path("/anything").unwrap().target(), "http://web:3000");
        assert_eq!(router.match_path("/").unwrap().target(), "http://web:3000");
        assert_eq!(router.match_path("/api/x").unwrap().target(), "http://api:9000");
    }

    #[test]
    fn identical_paths_keep_file_order() {
        let router = Router::new(vec![
            route("/svc", "http://first:1"),
            route("/longer", "http://other:1"),
            route("/svc", "http://second:1"),
        ]);

        assert_eq!(router.match_path("/svc/a").unwrap().target(), "http://first:1");
        let order: Vec<&str> = router.routes().iter().map(|r| r.target()).collect();
        assert_eq!(order, vec!["http://other:1", "http://first:1", "http://second:1"]);
    }

    #[test]
    fn no_match_reports_path() {
        let router = Router::new(vec![route("/api", "http://api:9000")]);
        let err = router.match_path("/unknown").unwrap_err();
        assert_eq!(
            err,
            RouteNotFound {
                path: "/unknown".to_string()
            }
        );
    }

    #[test]
    fn empty_router_matches_nothing() {
        let router = Router::new(Vec::new());
        assert!(router.is_empty());
        assert!(router.match_path("/").is_err());
    }

    #[test]
    fn prefix_match_is_literal() {
        let router = Router::new(vec![route("/api", "http://api:9000")]);
        assert!(router.match_path("/api2").is_ok());
        assert!(router.match_path("/Api").is_err());
    }

    #[test]
    fn summaries_follow_match_order() {
        let router = Router::new(vec![route("/", "http://web:3000"), route("/api", "http://api:9000")]);
        let summaries = router.summaries();
        assert_eq!(summaries[0].index, 0);
        assert_eq!(summaries[0].path, "/api");
        assert_eq!(summaries[1].path, "/");
    }
}
