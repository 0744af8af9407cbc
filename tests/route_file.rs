//! Route files produce the same table as the programmatic API.

use nested_router::config::{build_router, load_config};
use nested_router::routing::{CompiledRoute, GroupAttributes, Router};

mod common;

#[test]
fn test_fixture_loads_and_resolves() {
    let config = load_config(&common::fixture("nested.toml")).unwrap();
    assert_eq!(config.logging.level, "debug");

    let mut router = build_router(&config);
    let routes = router.routes().unwrap();

    let keys: Vec<&str> = routes.keys().collect();
    assert_eq!(
        keys,
        [
            "GET|HEAD /",
            "GET|HEAD /third",
            "GET|HEAD /second",
            "GET|HEAD /first",
            "POST {host}.test/{account}/users",
        ]
    );

    let third = routes.get("GET|HEAD /third").unwrap();
    assert_eq!(third.before().to_vec(), ["foo", "bar", "baz"]);
    assert_eq!(third.after().to_vec(), ["log"]);

    let users = routes.get("POST {host}.test/{account}/users").unwrap();
    assert_eq!(users.before().to_vec(), ["throttle", "auth", "csrf"]);
    assert_eq!(users.action(), Some("admin::Users@store"));
    assert_eq!(users.requirement("host"), Some("bar"));
    assert_eq!(users.requirement("account"), Some("(acme|globex)"));
    assert_eq!(users.option("as"), Some(&serde_json::json!("admin.")));

    let compiled = CompiledRoute::compile(users).unwrap();
    assert_eq!(compiled.path_regex(), "^/(?P<account>(acme|globex))/users$");
    assert_eq!(compiled.host_regex(), Some(r"^(?P<host>bar)\.test$"));
}

#[test]
fn test_fixture_matches_programmatic_declaration() {
    let config = load_config(&common::fixture("nested.toml")).unwrap();
    let mut from_file = build_router(&config);

    let mut router = Router::new();
    router.get("/").action("Home");
    router.group(GroupAttributes::new().before(["foo"]), |r| {
        r.get("first");
        r.group(GroupAttributes::new().before(["bar"]), |r| {
            r.get("second");
            r.group(GroupAttributes::new().before(["baz"]).after(["log"]), |r| {
                r.get("third");
            });
        });
    });
    router
        .group(
            GroupAttributes::new()
                .prefix("{account}")
                .domain("{host}.test")
                .namespace("admin")
                .require("host", "bar")
                .before(["auth", "csrf"])
                .option("as", "admin."),
            |r| {
                r.post("users")
                    .action("Users@store")
                    .before(["throttle", "auth"]);
            },
        )
        .require("account", ["acme", "globex"]);

    assert_eq!(from_file.routes().unwrap(), router.routes().unwrap());
}

#[test]
fn test_routes_serialize_to_json() {
    let config = load_config(&common::fixture("nested.toml")).unwrap();
    let mut router = build_router(&config);
    let json = serde_json::to_value(router.routes().unwrap()).unwrap();

    assert_eq!(json["GET|HEAD /second"]["before"], serde_json::json!(["foo", "bar"]));
    assert_eq!(json["GET|HEAD /"]["methods"], serde_json::json!(["GET", "HEAD"]));
}
