//! Route groups.
//!
//! A [`Group`] is one completed nesting scope: the routes registered directly
//! inside it, its own before/after filters and its position in the nesting
//! tree. A [`GroupHandle`] is the fluent view returned by
//! [`Router::group`](crate::routing::Router::group) for configuring a group
//! right after its callback returned.

use crate::routing::collection::RouteCollection;
use crate::routing::filters::FilterSet;
use crate::routing::requirement::Requirement;
use crate::routing::router::Router;

/// Identifier of a group, allocated when its scope opens.
///
/// Parents open before their children, so a parent's id is always lower.
#[derive(Copy, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct GroupId(pub(crate) usize);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group {}", self.0)
    }
}

/// One completed nesting scope.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    parent: Option<GroupId>,
    depth: usize,
    routes: RouteCollection,
    before: FilterSet,
    after: FilterSet,
}

impl Group {
    pub(crate) fn new(
        id: GroupId,
        parent: Option<GroupId>,
        depth: usize,
        routes: RouteCollection,
    ) -> Self {
        Self {
            id,
            parent,
            depth,
            routes,
            before: FilterSet::new(),
            after: FilterSet::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The group that was open when this group's callback began, if any.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Number of groups open (including this one) when it was created.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Routes registered directly inside this group.
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    pub fn before_filters(&self) -> &FilterSet {
        &self.before
    }

    pub fn after_filters(&self) -> &FilterSet {
        &self.after
    }

    /// Constrain parameter `name` on every route of this group.
    ///
    /// Applies immediately and only to this group's own routes; nested
    /// groups keep their own requirements.
    pub fn require_match(&mut self, name: &str, requirement: impl Into<Requirement>) {
        let pattern = requirement.into().into_pattern();
        self.routes.add_requirement(name, &pattern);
    }

    pub fn add_before_filters<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before.extend(names);
    }

    pub fn add_after_filters<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(names);
    }

    pub(crate) fn routes_mut(&mut self) -> &mut RouteCollection {
        &mut self.routes
    }

    pub(crate) fn into_routes(self) -> RouteCollection {
        self.routes
    }
}

/// Fluent configuration for a just-created group.
pub struct GroupHandle<'r> {
    router: &'r mut Router,
    id: GroupId,
}

impl<'r> GroupHandle<'r> {
    pub(crate) fn new(router: &'r mut Router, id: GroupId) -> Self {
        Self { router, id }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The group as recorded so far.
    pub fn group(&self) -> Option<&Group> {
        self.router.registry().get(self.id)
    }

    /// Constrain a parameter with a pattern or an ordered list of alternatives.
    pub fn require(self, name: &str, requirement: impl Into<Requirement>) -> Self {
        if let Some(group) = self.router.registry_mut().get_mut(self.id) {
            group.require_match(name, requirement);
        }
        self
    }

    /// Apply several requirements, in the given order.
    pub fn require_all<I, N, R>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = (N, R)>,
        N: AsRef<str>,
        R: Into<Requirement>,
    {
        for (name, requirement) in requirements {
            self = self.require(name.as_ref(), requirement);
        }
        self
    }

    pub fn before<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(group) = self.router.registry_mut().get_mut(self.id) {
            group.add_before_filters(names);
        }
        self
    }

    pub fn after<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(group) = self.router.registry_mut().get_mut(self.id) {
            group.add_after_filters(names);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::Route;
    use axum::http::Method;

    #[test]
    fn test_requirements_apply_to_every_route() {
        let mut routes = RouteCollection::new();
        routes.add(Route::new([Method::GET], "{foo}/a"));
        routes.add(Route::new([Method::GET], "{foo}/b"));

        let mut group = Group::new(GroupId(1), None, 1, routes);
        group.require_match("foo", ["bar", "baz"]);
        group.require_match("id", "[0-9]+");

        for route in group.routes().routes() {
            assert_eq!(route.requirement("foo"), Some("(bar|baz)"));
            assert_eq!(route.requirement("id"), Some("[0-9]+"));
        }
    }

    #[test]
    fn test_filters_grow_monotonically() {
        let mut group = Group::new(GroupId(3), Some(GroupId(1)), 2, RouteCollection::new());
        group.add_before_filters(["auth", "csrf"]);
        group.add_before_filters(["csrf", "log", "auth"]);
        group.add_after_filters(["close"]);

        assert_eq!(group.before_filters().to_vec(), ["auth", "csrf", "log"]);
        assert_eq!(group.after_filters().to_vec(), ["close"]);
        assert_eq!(group.parent(), Some(GroupId(1)));
        assert_eq!(group.id().to_string(), "Group 3");
    }
}
