//! Collection assembly.
//!
//! # Responsibilities
//! - Resolve inherited filters for every recorded group
//! - Merge each group's routes back into the master collection
//! - Clear the registry once everything is merged
//!
//! # Design Decisions
//! - Empty registry = no-op, so assembly can run on every read
//! - A key collision aborts before anything is merged: the master
//!   collection and the registry are left as they were
//! - Groups merge in completion order (inner groups first)

use std::collections::HashSet;

use crate::routing::collection::RouteCollection;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::registry::GroupRegistry;
use crate::routing::resolver;

/// Merge every recorded group into `master`.
///
/// Returns the number of routes merged.
pub fn assemble(master: &mut RouteCollection, registry: &mut GroupRegistry) -> RouteResult<usize> {
    if registry.open_depth() > 0 {
        return Err(RouteError::GroupStillOpen {
            depth: registry.open_depth(),
        });
    }
    if registry.is_empty() {
        return Ok(0);
    }

    let groups = registry.len();
    resolver::resolve(registry);
    check_collisions(master, registry)?;

    let mut merged = 0;
    for group in registry.drain() {
        merged += group.routes().len();
        // Collisions were ruled out above.
        if let Err(key) = master.union(group.into_routes()) {
            return Err(RouteError::DuplicateRoute { key });
        }
    }

    tracing::debug!(groups, routes = merged, total = master.len(), "Merged route groups");
    Ok(merged)
}

fn check_collisions(master: &RouteCollection, registry: &GroupRegistry) -> RouteResult<()> {
    let mut seen: HashSet<&str> = master.keys().collect();
    for group in registry.iter() {
        for key in group.routes().keys() {
            if !seen.insert(key) {
                tracing::error!(route = %key, group = %group.id(), "Duplicate route key");
                return Err(RouteError::DuplicateRoute {
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::Route;
    use axum::http::Method;

    fn routes(paths: &[&str]) -> RouteCollection {
        let mut routes = RouteCollection::new();
        for path in paths {
            routes.add(Route::new([Method::GET], path));
        }
        routes
    }

    #[test]
    fn test_merges_in_completion_order_and_clears() {
        let mut master = routes(&["home"]);
        let mut registry = GroupRegistry::new();
        let outer = registry.open();
        let inner = registry.open();
        registry.close(inner, routes(&["inner"]));
        registry.close(outer, routes(&["outer"])).add_before_filters(["o"]);

        assert_eq!(assemble(&mut master, &mut registry).unwrap(), 2);
        let keys: Vec<&str> = master.keys().collect();
        assert_eq!(keys, ["GET /home", "GET /inner", "GET /outer"]);
        assert!(registry.is_empty());
        assert_eq!(master.get("GET /inner").unwrap().before().to_vec(), ["o"]);

        assert_eq!(assemble(&mut master, &mut registry).unwrap(), 0);
        assert_eq!(master.len(), 3);
    }

    #[test]
    fn test_collision_aborts_without_merging() {
        let mut master = routes(&["home"]);
        let mut registry = GroupRegistry::new();
        let first = registry.open();
        registry.close(first, routes(&["a"]));
        let second = registry.open();
        registry.close(second, routes(&["home"]));

        let err = assemble(&mut master, &mut registry).unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute { ref key } if key == "GET /home"));
        assert_eq!(err.to_string(), "Route `GET /home` is registered more than once");
        assert_eq!(master.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_refuses_while_scope_open() {
        let mut master = RouteCollection::new();
        let mut registry = GroupRegistry::new();
        registry.open();

        let err = assemble(&mut master, &mut registry).unwrap_err();
        assert!(matches!(err, RouteError::GroupStillOpen { depth: 1 }));
    }
}
