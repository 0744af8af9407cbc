//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Resolve the log level from the environment or the route file
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Initializing twice is reported, not a panic

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing_subscriber::util::TryInitError;

/// Filter directive for a bare level, e.g. `debug` → `nested_router=debug`.
pub fn default_directive(level: &str) -> String {
    format!("nested_router={}", level.trim().to_ascii_lowercase())
}

/// Install the global subscriber.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(" DEBUG "), "nested_router=debug");
    }

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init_logging("info");
        assert!(init_logging("info").is_err());
    }
}
