//! Route file configuration subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteFileConfig (validated, immutable)
//!     → apply.rs (replayed through Router::group / Router::matching)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks
//! - Groups nest exactly like the programmatic API: `[[groups.groups]]`

pub mod apply;
pub mod loader;
pub mod schema;
pub mod validation;

pub use apply::build_router;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{GroupConfig, LoggingConfig, RouteConfig, RouteFileConfig};
pub use validation::ValidationError;
