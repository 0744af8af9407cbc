//! Routing errors.

use thiserror::Error;

use crate::routing::compiler::CompileError;

/// Errors raised while finalizing or compiling the route table.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Two routes ended up under the same key when groups were merged.
    #[error("Route `{key}` is registered more than once")]
    DuplicateRoute { key: String },

    /// The merged routes were requested from inside a group callback.
    #[error("Cannot finalize routes while {depth} group(s) are still open")]
    GroupStillOpen { depth: usize },

    /// A route's path or domain pattern did not compile.
    #[error("Failed to compile route `{key}`: {source}")]
    Compile {
        key: String,
        #[source]
        source: CompileError,
    },
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
