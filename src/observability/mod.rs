//! Observability subsystem.
//!
//! Structured logs only: every forwarded request produces an attempt line
//! and an outcome line; see `http::forward`.

pub mod logging;

pub use logging::init_logging;
