//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all handler)
//!     → routing::Router (longest enabled prefix)
//!     → request.rs (target URL rewrite, Host drop)
//!     → forward.rs (outbound call, no redirects, bounded timeouts)
//!     → response.rs (header relay, error translation)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::Forwarder;
pub use request::{build_target_url, forward_headers};
pub use response::{relay_headers, FailureKind, GatewayError};
pub use server::{AppState, HttpServer};
