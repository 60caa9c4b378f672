//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Admin request for route N
//!     → probe.rs (GET target, bounded by timeout)
//!     → RouteHealth { healthy | unhealthy + error }
//! ```
//!
//! # Design Decisions
//! - Probes run on demand only; there is no background checker
//! - Probe results never influence routing

pub mod probe;

pub use probe::{HealthProber, HealthStatus, RouteHealth};
