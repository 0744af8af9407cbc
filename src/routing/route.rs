//! Route definition.

use axum::http::Method;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::routing::filters::FilterSet;

/// A single registered route.
///
/// The key is derived from methods, domain and path, so two routes with the
/// same key describe the same endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(serialize_with = "serialize_methods")]
    methods: Vec<Method>,
    path: String,
    domain: Option<String>,
    action: Option<String>,
    requirements: IndexMap<String, String>,
    options: IndexMap<String, serde_json::Value>,
    before: FilterSet,
    after: FilterSet,
}

impl Route {
    /// Create a route. The path is normalized to a single leading `/` and
    /// methods are kept sorted by name, so the key does not depend on the
    /// order they were given in.
    pub fn new(methods: impl IntoIterator<Item = Method>, path: &str) -> Self {
        let mut unique: Vec<Method> = methods.into_iter().collect();
        unique.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        unique.dedup();
        Self {
            methods: unique,
            path: join_path(None, path),
            domain: None,
            action: None,
            requirements: IndexMap::new(),
            options: IndexMap::new(),
            before: FilterSet::new(),
            after: FilterSet::new(),
        }
    }

    /// Unique collection key: `"<METHODS> <domain><path>"`.
    pub fn key(&self) -> String {
        let methods: Vec<&str> = self.methods.iter().map(Method::as_str).collect();
        format!(
            "{} {}{}",
            methods.join("|"),
            self.domain.as_deref().unwrap_or(""),
            self.path
        )
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.requirements.get(name).map(String::as_str)
    }

    pub fn requirements(&self) -> &IndexMap<String, String> {
        &self.requirements
    }

    pub fn option(&self, name: &str) -> Option<&serde_json::Value> {
        self.options.get(name)
    }

    pub fn options(&self) -> &IndexMap<String, serde_json::Value> {
        &self.options
    }

    /// Before filters. Once the router is finalized these are the resolved list.
    pub fn before(&self) -> &FilterSet {
        &self.before
    }

    /// After filters. Once the router is finalized these are the resolved list.
    pub fn after(&self) -> &FilterSet {
        &self.after
    }

    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    pub(crate) fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    pub(crate) fn set_action(&mut self, action: impl Into<String>) {
        self.action = Some(action.into());
    }

    /// Set (or overwrite) the requirement for `name`.
    pub(crate) fn set_requirement(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.requirements.insert(name.into(), pattern.into());
    }

    pub(crate) fn set_option(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.options.insert(name.into(), value);
    }

    /// Set an option only when the route does not carry it yet.
    pub(crate) fn default_option(&mut self, name: &str, value: &serde_json::Value) {
        if !self.options.contains_key(name) {
            self.options.insert(name.to_string(), value.clone());
        }
    }

    pub(crate) fn before_mut(&mut self) -> &mut FilterSet {
        &mut self.before
    }

    pub(crate) fn after_mut(&mut self) -> &mut FilterSet {
        &mut self.after
    }
}

/// Join a prefix and a URI into a path with exactly one leading `/`.
///
/// `join_path(Some("foo"), "bar")` → `/foo/bar`, `join_path(None, "/")` → `/`.
pub fn join_path(prefix: Option<&str>, uri: &str) -> String {
    let segments: Vec<&str> = [prefix.unwrap_or(""), uri]
        .into_iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

#[allow(clippy::ptr_arg)]
fn serialize_methods<S: Serializer>(methods: &Vec<Method>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(methods.iter().map(Method::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_includes_methods_domain_and_path() {
        let mut route = Route::new([Method::GET, Method::HEAD, Method::GET], "users/{id}");
        assert_eq!(route.key(), "GET|HEAD /users/{id}");

        route.set_domain("{account}.example.com");
        assert_eq!(route.key(), "GET|HEAD {account}.example.com/users/{id}");
    }

    #[test]
    fn test_key_ignores_method_order() {
        let forward = Route::new([Method::GET, Method::POST], "x");
        let backward = Route::new([Method::POST, Method::GET], "x");
        assert_eq!(forward.key(), "GET|POST /x");
        assert_eq!(forward.key(), backward.key());

        let head_first = Route::new([Method::HEAD, Method::GET], "/");
        assert_eq!(head_first.methods(), [Method::GET, Method::HEAD]);
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(Some("foo"), "bar"), "/foo/bar");
        assert_eq!(join_path(Some("/foo/"), "/"), "/foo");
        assert_eq!(join_path(None, "/"), "/");
        assert_eq!(join_path(Some(""), "qux/"), "/qux");
    }

    #[test]
    fn test_serializes_methods_as_strings() {
        let route = Route::new([Method::POST], "/login");
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["methods"], serde_json::json!(["POST"]));
        assert_eq!(json["path"], "/login");
    }
}
