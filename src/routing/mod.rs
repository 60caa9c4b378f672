//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (literal prefix comparison)
//!     → Return: matched Route or RouteNotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Stable sort by prefix length, longest first
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First enabled match wins

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, RouteNotFound, RouteSummary, Router};
