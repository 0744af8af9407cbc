//! Route lookup.
//!
//! # Responsibilities
//! - Compile a finalized route collection once
//! - Look up the first route matching a request
//! - Return the matched route with its parameters, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan in collection order; first match wins

use axum::body::Body;
use axum::http::Request;
use indexmap::IndexMap;

use crate::routing::collection::RouteCollection;
use crate::routing::compiler::CompiledRoute;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::matcher::{request_host, AndMatcher, Matcher};
use crate::routing::route::Route;

#[derive(Debug)]
struct Entry {
    key: String,
    route: Route,
    compiled: CompiledRoute,
    matcher: AndMatcher,
}

/// Compiled, immutable route table.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'t> {
    pub key: &'t str,
    pub route: &'t Route,
    pub parameters: IndexMap<String, String>,
}

impl RouteTable {
    /// Compile every route of `routes`, failing on the first malformed pattern.
    pub fn compile(routes: &RouteCollection) -> RouteResult<Self> {
        let mut entries = Vec::with_capacity(routes.len());
        for (key, route) in routes.iter() {
            let compiled = CompiledRoute::compile(route).map_err(|source| RouteError::Compile {
                key: key.to_string(),
                source,
            })?;
            entries.push(Entry {
                key: key.to_string(),
                route: route.clone(),
                matcher: compiled.matcher(),
                compiled,
            });
        }
        tracing::debug!(routes = entries.len(), "Route table compiled");
        Ok(Self { entries })
    }

    /// First route matching `req`.
    pub fn find(&self, req: &Request<Body>) -> Option<RouteMatch<'_>> {
        let host = request_host(req);
        self.entries
            .iter()
            .filter(|entry| entry.matcher.matches(req))
            .find_map(|entry| {
                let parameters = entry.compiled.captures(host, req.uri().path())?;
                Some(RouteMatch {
                    key: &entry.key,
                    route: &entry.route,
                    parameters,
                })
            })
    }

    pub fn compiled(&self, key: &str) -> Option<&CompiledRoute> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.compiled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_first_match_wins() {
        let mut routes = RouteCollection::new();
        let specific = routes.add(Route::new([Method::GET], "users/{id}"));
        specific.set_requirement("id", "[0-9]+");
        routes.add(Route::new([Method::GET], "users/{name}"));

        let table = RouteTable::compile(&routes).unwrap();
        assert_eq!(table.len(), 2);

        let req = Request::builder().uri("/users/7").body(Body::default()).unwrap();
        let found = table.find(&req).unwrap();
        assert_eq!(found.key, "GET /users/{id}");
        assert_eq!(found.parameters["id"], "7");

        let req = Request::builder().uri("/users/ann").body(Body::default()).unwrap();
        assert_eq!(table.find(&req).unwrap().key, "GET /users/{name}");

        let req = Request::builder().uri("/nowhere").body(Body::default()).unwrap();
        assert!(table.find(&req).is_none());
    }

    #[test]
    fn test_compile_error_names_route() {
        let mut routes = RouteCollection::new();
        routes.add(Route::new([Method::GET], "{broken"));

        let err = RouteTable::compile(&routes).unwrap_err();
        assert!(matches!(err, RouteError::Compile { ref key, .. } if key == "GET /{broken"));
    }
}
