//! Scope extraction.
//!
//! # Responsibilities
//! - Snapshot the master collection before a group callback runs
//! - After it returns, isolate the routes registered directly in the scope
//! - Restore the master collection to the snapshot
//!
//! # Design Decisions
//! - Nested scopes already removed their own routes before returning, so
//!   the key diff never double-counts them
//! - A route redeclared under a key that existed before the scope opened is
//!   lost by the restore; it is reported, not merged

use crate::routing::collection::RouteCollection;

/// The master collection as it was when a scope opened.
#[derive(Debug, Clone)]
pub struct Snapshot {
    routes: RouteCollection,
}

impl Snapshot {
    pub fn take(master: &RouteCollection) -> Self {
        Self {
            routes: master.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Move the routes added since `snapshot` out of `master`.
pub fn extract(master: &mut RouteCollection, snapshot: Snapshot) -> RouteCollection {
    let isolated = master.difference(&snapshot.routes);

    for (key, route) in snapshot.routes.iter() {
        if master.get(key) != Some(route) {
            tracing::warn!(
                route = %key,
                "Route redeclared inside a group shadows an existing route; keeping the original"
            );
        }
    }

    *master = snapshot.routes;
    isolated
}
