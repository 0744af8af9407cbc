//! Keyed, insertion-ordered route storage.
//!
//! # Responsibilities
//! - Store routes under their unique key
//! - Key-based set difference (what a scope added)
//! - Order-preserving union that refuses key collisions

use indexmap::IndexMap;
use serde::Serialize;

use crate::routing::route::Route;

/// An ordered map of route key → route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteCollection {
    routes: IndexMap<String, Route>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route under its key, replacing (in place) any route with the same key.
    pub fn add(&mut self, route: Route) -> &mut Route {
        let key = route.key();
        match self.routes.entry(key) {
            indexmap::map::Entry::Occupied(mut entry) => {
                entry.insert(route);
                entry.into_mut()
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(route),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.routes.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Route> {
        self.routes.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    /// Routes whose key is present here but absent from `other`, in insertion order.
    pub fn difference(&self, other: &RouteCollection) -> RouteCollection {
        let routes = self
            .routes
            .iter()
            .filter(|(key, _)| !other.contains_key(key))
            .map(|(key, route)| (key.clone(), route.clone()))
            .collect();
        RouteCollection { routes }
    }

    /// Append every route of `other`.
    ///
    /// Fails with the first colliding key and leaves `self` untouched.
    pub fn union(&mut self, other: RouteCollection) -> Result<(), String> {
        if let Some(key) = other.keys().find(|key| self.contains_key(key)) {
            return Err(key.to_string());
        }
        self.routes.extend(other.routes);
        Ok(())
    }

    /// Write a requirement onto every route in the collection.
    pub fn add_requirement(&mut self, name: &str, pattern: &str) {
        for route in self.routes.values_mut() {
            route.set_requirement(name, pattern);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(key, route)| (key.as_str(), route))
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn routes_mut(&mut self) -> impl Iterator<Item = &mut Route> {
        self.routes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn collection(paths: &[&str]) -> RouteCollection {
        let mut routes = RouteCollection::new();
        for path in paths {
            routes.add(Route::new([Method::GET], path));
        }
        routes
    }

    #[test]
    fn test_difference_keeps_registration_order() {
        let before = collection(&["a", "b"]);
        let after = collection(&["a", "b", "d", "c"]);

        let added = after.difference(&before);
        let keys: Vec<&str> = added.keys().collect();
        assert_eq!(keys, ["GET /d", "GET /c"]);
    }

    #[test]
    fn test_union_rejects_collisions() {
        let mut master = collection(&["a", "b"]);
        let err = master.union(collection(&["c", "b"])).unwrap_err();

        assert_eq!(err, "GET /b");
        assert_eq!(master.len(), 2);

        master.union(collection(&["c"])).unwrap();
        let keys: Vec<&str> = master.keys().collect();
        assert_eq!(keys, ["GET /a", "GET /b", "GET /c"]);
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut routes = collection(&["a", "b"]);
        routes.add(Route::new([Method::GET], "a")).set_action("Replaced");

        assert_eq!(routes.len(), 2);
        assert_eq!(routes.keys().next(), Some("GET /a"));
        assert_eq!(routes.get("GET /a").and_then(Route::action), Some("Replaced"));
    }
}
