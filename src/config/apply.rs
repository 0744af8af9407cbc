//! Replay a route file through the router API.

use crate::config::schema::{GroupConfig, RouteConfig, RouteFileConfig};
use crate::config::validation::parse_method;
use crate::routing::{GroupAttributes, Router};

/// Build a router from a validated route file.
pub fn build_router(config: &RouteFileConfig) -> Router {
    let mut router = Router::new();
    register(&mut router, config);
    router
}

/// Register every route and group of `config` on `router`.
pub fn register(router: &mut Router, config: &RouteFileConfig) {
    register_routes(router, &config.routes);
    register_groups(router, &config.groups);
}

fn register_groups(router: &mut Router, groups: &[GroupConfig]) {
    for group in groups {
        router
            .group(attributes(group), |r| {
                register_routes(r, &group.routes);
                register_groups(r, &group.groups);
            })
            .require_all(group.require.clone());
    }
}

fn attributes(group: &GroupConfig) -> GroupAttributes {
    let mut attributes = GroupAttributes::new()
        .before(group.before.iter().cloned())
        .after(group.after.iter().cloned());
    attributes.prefix = group.prefix.clone();
    attributes.domain = group.domain.clone();
    attributes.namespace = group.namespace.clone();
    for (name, requirement) in &group.requirements {
        attributes = attributes.require(name.clone(), requirement.clone());
    }
    for (name, value) in &group.options {
        attributes = attributes.option(name.clone(), value.clone());
    }
    attributes
}

fn register_routes(router: &mut Router, routes: &[RouteConfig]) {
    for config in routes {
        let mut methods = Vec::new();
        for name in &config.methods {
            match parse_method(name) {
                Some(method) => methods.push(method),
                None => tracing::warn!(method = %name, uri = %config.uri, "Skipping unknown method"),
            }
        }
        if methods.contains(&axum::http::Method::GET) {
            methods.push(axum::http::Method::HEAD);
        }
        if methods.is_empty() {
            continue;
        }

        let mut handle = router
            .matching(methods, &config.uri)
            .before(config.before.iter().cloned())
            .after(config.after.iter().cloned());
        if let Some(action) = &config.action {
            handle = handle.action(action);
        }
        for (name, requirement) in &config.requirements {
            handle = handle.require(name, requirement.clone());
        }
        for (name, value) in &config.options {
            handle = handle.option(name, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[test]
    fn test_get_also_answers_head() {
        let config = parse_config(
            r#"
            [[routes]]
            uri = "/"
            action = "Home"
            "#,
        )
        .unwrap();

        let mut router = build_router(&config);
        let routes = router.routes().unwrap();
        let route = routes.get("GET|HEAD /").unwrap();
        assert_eq!(route.action(), Some("Home"));
    }

    #[test]
    fn test_group_require_is_local_and_where_is_inherited() {
        let config = parse_config(
            r#"
            [[groups]]
            prefix = "{team}"
            where = { team = "[a-z]+" }
            require = { id = ["1", "2"] }

            [[groups.routes]]
            uri = "{id}"

            [[groups.groups]]
            prefix = "members"

            [[groups.groups.routes]]
            uri = "{id}"
            "#,
        )
        .unwrap();

        let mut router = build_router(&config);
        let routes = router.routes().unwrap();

        let own = routes.get("GET|HEAD /{team}/{id}").unwrap();
        assert_eq!(own.requirement("team"), Some("[a-z]+"));
        assert_eq!(own.requirement("id"), Some("(1|2)"));

        let nested = routes.get("GET|HEAD /{team}/members/{id}").unwrap();
        assert_eq!(nested.requirement("team"), Some("[a-z]+"));
        assert_eq!(nested.requirement("id"), None);
    }
}
