//! Shared helpers for integration tests.

use std::path::PathBuf;

use nested_router::routing::{Route, RouteCollection};

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Routes in collection order.
#[allow(dead_code)]
pub fn ordered(routes: &RouteCollection) -> Vec<&Route> {
    routes.routes().collect()
}

/// Resolved before filters of every route, in collection order.
#[allow(dead_code)]
pub fn before_lists(routes: &RouteCollection) -> Vec<Vec<String>> {
    ordered(routes).iter().map(|r| r.before().to_vec()).collect()
}
