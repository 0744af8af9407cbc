//! Nested route groups for a request-routing layer.
//!
//! Routes can be declared inside arbitrarily deep groups sharing a path
//! prefix, a domain, parameter requirements and before/after filters.
//! Groups are recorded during registration and resolved once, lazily, when
//! the merged route collection is first read.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RouteFileConfig;
pub use routing::{GroupAttributes, RouteCollection, RouteError, Router};
