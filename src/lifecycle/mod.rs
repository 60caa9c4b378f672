//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load settings → Load routes → Compile router → Start listeners
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger → Stop accepting → Drain requests → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listeners
//! - Ordered shutdown: stop accept, drain, close

pub mod signals;
pub mod startup;

pub use signals::{wait_for_signal, Shutdown};
