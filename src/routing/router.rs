//! Route registration and finalization.
//!
//! # Responsibilities
//! - Register routes, applying the attributes of every open group
//! - Record nested groups (`group`/`bunch`) with their direct routes
//! - Finalize lazily: resolve inherited filters and merge groups back
//!
//! # Design Decisions
//! - The group registry is owned by the router instance, never global
//! - Every read of the merged routes finalizes first; finalizing an empty
//!   registry is a no-op
//! - Registration is synchronous; `&mut self` is the only lock needed
//!
//! ```
//! use nested_router::routing::{GroupAttributes, Router};
//!
//! let mut router = Router::new();
//! router
//!     .group(GroupAttributes::new().prefix("admin"), |r| {
//!         r.get("users");
//!     })
//!     .before(["auth"]);
//!
//! let routes = router.routes().unwrap();
//! let users = routes.get("GET|HEAD /admin/users").unwrap();
//! assert_eq!(users.before().to_vec(), ["auth"]);
//! ```

use axum::http::Method;

use crate::routing::assembler;
use crate::routing::attributes::{AttributeStack, GroupAttributes};
use crate::routing::collection::RouteCollection;
use crate::routing::error::RouteResult;
use crate::routing::extractor::{self, Snapshot};
use crate::routing::group::GroupHandle;
use crate::routing::registry::GroupRegistry;
use crate::routing::requirement::Requirement;
use crate::routing::route::Route;
use crate::routing::table::RouteTable;

/// Router with nested route groups.
#[derive(Debug, Default)]
pub struct Router {
    routes: RouteCollection,
    groups: GroupRegistry,
    attributes: AttributeStack,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `GET` route (also answers `HEAD`).
    pub fn get(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::GET, Method::HEAD], uri)
    }

    pub fn post(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::POST], uri)
    }

    pub fn put(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::PUT], uri)
    }

    pub fn patch(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::PATCH], uri)
    }

    pub fn delete(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::DELETE], uri)
    }

    pub fn options(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching([Method::OPTIONS], uri)
    }

    /// Register a route answering every standard method.
    pub fn any(&mut self, uri: &str) -> RouteHandle<'_> {
        self.matching(
            [
                Method::GET,
                Method::HEAD,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ],
            uri,
        )
    }

    /// Register a route for an explicit set of methods.
    pub fn matching(&mut self, methods: impl IntoIterator<Item = Method>, uri: &str) -> RouteHandle<'_> {
        let route = self.attributes.apply(Route::new(methods, uri));
        let key = route.key();
        if self.routes.contains_key(&key) {
            tracing::warn!(route = %key, "Route registered twice; the later declaration wins");
        }
        tracing::trace!(route = %key, depth = self.attributes.depth(), "Route registered");

        let route = self.routes.add(route);
        RouteHandle {
            route,
            attributes: &self.attributes,
        }
    }

    /// Open a group sharing `attributes` with every route declared in `callback`.
    ///
    /// The group is recorded when `callback` returns; the returned handle can
    /// still add requirements and filters to it.
    ///
    /// A route declared in `callback` whose key was already registered before
    /// the group opened is not taken into the group: the earlier route is kept
    /// and a warning is logged.
    pub fn group<F>(&mut self, attributes: GroupAttributes, callback: F) -> GroupHandle<'_>
    where
        F: FnOnce(&mut Router),
    {
        let scope = self.groups.open();
        self.attributes.push(&attributes);
        let snapshot = Snapshot::take(&self.routes);

        callback(&mut *self);

        let routes = extractor::extract(&mut self.routes, snapshot);
        self.attributes.pop();

        tracing::debug!(
            group = %scope.id,
            parent = ?scope.parent.map(|p| p.to_string()),
            depth = scope.depth,
            routes = routes.len(),
            "Route group closed"
        );

        let group = self.groups.close(scope, routes);
        group.add_before_filters(attributes.before);
        group.add_after_filters(attributes.after);

        GroupHandle::new(self, scope.id)
    }

    /// A group without shared attributes, for grouping filters and requirements only.
    pub fn bunch<F>(&mut self, callback: F) -> GroupHandle<'_>
    where
        F: FnOnce(&mut Router),
    {
        self.group(GroupAttributes::default(), callback)
    }

    /// Resolve inherited filters and merge every recorded group.
    ///
    /// Idempotent: once the registry is drained further calls do nothing.
    pub fn finalize(&mut self) -> RouteResult<()> {
        assembler::assemble(&mut self.routes, &mut self.groups)?;
        Ok(())
    }

    /// The merged, filter-resolved route collection.
    pub fn routes(&mut self) -> RouteResult<&RouteCollection> {
        self.finalize()?;
        Ok(&self.routes)
    }

    pub fn into_routes(mut self) -> RouteResult<RouteCollection> {
        self.finalize()?;
        Ok(self.routes)
    }

    /// Finalize, then compile the merged routes for request lookup.
    pub fn route_table(&mut self) -> RouteResult<RouteTable> {
        self.finalize()?;
        RouteTable::compile(&self.routes)
    }

    /// Groups recorded but not merged yet.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn registry(&self) -> &GroupRegistry {
        &self.groups
    }

    pub(crate) fn registry_mut(&mut self) -> &mut GroupRegistry {
        &mut self.groups
    }
}

/// Fluent configuration for a just-registered route.
pub struct RouteHandle<'r> {
    route: &'r mut Route,
    attributes: &'r AttributeStack,
}

impl<'r> RouteHandle<'r> {
    /// Handler identifier, qualified with the enclosing group namespaces.
    pub fn action(self, action: &str) -> Self {
        let qualified = self.attributes.qualify(action);
        self.route.set_action(qualified);
        self
    }

    pub fn require(self, name: &str, requirement: impl Into<Requirement>) -> Self {
        self.route
            .set_requirement(name, requirement.into().into_pattern());
        self
    }

    pub fn before<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route.before_mut().extend(names);
        self
    }

    pub fn after<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route.after_mut().extend(names);
        self
    }

    pub fn option(self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.route.set_option(name, value.into());
        self
    }

    pub fn route(&self) -> &Route {
        &*self.route
    }
}
