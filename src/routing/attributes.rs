//! Group attributes and the attribute stack.
//!
//! # Responsibilities
//! - Describe what a group shares with its routes (prefix, domain, ...)
//! - Merge nested attribute sets into one effective frame per depth
//! - Apply the effective frame to routes as they are registered
//!
//! # Design Decisions
//! - Prefixes concatenate with `/`, namespaces with `::`
//! - The innermost domain wins
//! - `where` and `options` merge key by key, inner overriding outer
//! - `before`/`after` are NOT stacked here: they seed the group's own
//!   filter sets and reach routes through filter inheritance at finalize

use indexmap::IndexMap;

use crate::routing::requirement::Requirement;
use crate::routing::route::{join_path, Route};

/// Attributes shared by every route declared inside a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAttributes {
    pub prefix: Option<String>,
    pub domain: Option<String>,
    pub namespace: Option<String>,
    /// Parameter requirements (`where`), applied at registration.
    pub requirements: IndexMap<String, String>,
    pub before: Vec<String>,
    pub after: Vec<String>,
    /// Unrecognized attributes, passed through to routes untouched.
    pub options: IndexMap<String, serde_json::Value>,
}

impl GroupAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a `where` requirement.
    pub fn require(mut self, name: impl Into<String>, requirement: impl Into<Requirement>) -> Self {
        self.requirements
            .insert(name.into(), requirement.into().into_pattern());
        self
    }

    pub fn before<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn after<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Effective attributes of `self` nested inside `outer`.
    fn nested_in(&self, outer: &GroupAttributes) -> GroupAttributes {
        let prefix = match (outer.prefix.as_deref(), self.prefix.as_deref()) {
            (None, None) => None,
            (outer, inner) => Some(join_path(outer, inner.unwrap_or(""))),
        };

        let namespace = match (outer.namespace.as_deref(), self.namespace.as_deref()) {
            (Some(outer), Some(inner)) => Some(format!(
                "{}::{}",
                outer.trim_end_matches("::"),
                inner.trim_start_matches("::")
            )),
            (outer, inner) => inner.or(outer).map(str::to_string),
        };

        let mut requirements = outer.requirements.clone();
        requirements.extend(self.requirements.clone());

        let mut options = outer.options.clone();
        options.extend(self.options.clone());

        GroupAttributes {
            prefix,
            domain: self.domain.clone().or_else(|| outer.domain.clone()),
            namespace,
            requirements,
            before: Vec::new(),
            after: Vec::new(),
            options,
        }
    }
}

/// Effective attributes of every currently open group, innermost last.
#[derive(Debug, Default)]
pub struct AttributeStack {
    frames: Vec<GroupAttributes>,
}

impl AttributeStack {
    pub fn push(&mut self, attributes: &GroupAttributes) {
        let frame = match self.frames.last() {
            Some(outer) => attributes.nested_in(outer),
            None => attributes.nested_in(&GroupAttributes::default()),
        };
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<GroupAttributes> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&GroupAttributes> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Apply the innermost effective attributes to a freshly built route.
    pub fn apply(&self, mut route: Route) -> Route {
        let Some(frame) = self.current() else {
            return route;
        };

        if frame.prefix.is_some() {
            let path = join_path(frame.prefix.as_deref(), route.path());
            route.set_path(path);
        }
        if let Some(domain) = &frame.domain {
            route.set_domain(domain.clone());
        }
        for (name, pattern) in &frame.requirements {
            route.set_requirement(name.clone(), pattern.clone());
        }
        for (name, value) in &frame.options {
            route.default_option(name, value);
        }
        route
    }

    /// Qualify a handler name with the innermost namespace.
    pub fn qualify(&self, action: &str) -> String {
        match self.current().and_then(|frame| frame.namespace.as_deref()) {
            Some(namespace) if !action.starts_with("::") => format!("{}::{}", namespace, action),
            _ => action.trim_start_matches("::").to_string(),
        }
    }
}
