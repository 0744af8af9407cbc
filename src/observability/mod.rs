//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration / finalize / lookup:
//!     → tracing events (group closed, groups merged, table compiled)
//!     → logging.rs (subscriber, level filter)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - Per-route events are `trace`, per-group `debug`, shadowing `warn`

pub mod logging;

pub use logging::init_logging;
