//! Tests for route registration and lookup

use serde_json::json;
use waypoint::error::Error;
use waypoint::http::request::Method;
use waypoint::router::handler::Handler;
use waypoint::router::table::RouteTable;

fn handler(name: &str) -> Handler {
    Handler::new(name, |_| Ok(json!({})))
}

#[test]
fn test_duplicate_method_rejected_first_kept() {
    let mut table = RouteTable::new(1);

    table.register("/users", Method::GET, handler("first")).unwrap();
    let err = table
        .register("/users", Method::GET, handler("second"))
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateRoute { .. }));

    // The original registration survives the failed one
    let matched = table.lookup("/v1/users", Method::GET).unwrap();
    assert_eq!(matched.handler.name(), "first");
}

#[test]
fn test_same_path_different_methods_coexist() {
    let mut table = RouteTable::new(1);

    table.register("/users", Method::GET, handler("list")).unwrap();
    table.register("/users", Method::POST, handler("create")).unwrap();

    assert_eq!(
        table.lookup("/v1/users", Method::GET).unwrap().handler.name(),
        "list"
    );
    assert_eq!(
        table.lookup("/v1/users", Method::POST).unwrap().handler.name(),
        "create"
    );
}

#[test]
fn test_version_prefix_is_part_of_the_key() {
    let mut table = RouteTable::new(2);

    table.register("/users", Method::GET, handler("list")).unwrap();

    assert!(table.lookup("/v2/users", Method::GET).is_some());
    assert!(table.lookup("/users", Method::GET).is_none());
    assert!(table.lookup("/v1/users", Method::GET).is_none());
}

#[test]
fn test_unregistered_method_misses() {
    let mut table = RouteTable::new(1);

    table.register("/users", Method::GET, handler("list")).unwrap();

    assert!(table.lookup("/v1/users", Method::DELETE).is_none());
    assert!(table.lookup("/v1/users", Method::PUT).is_none());
}

#[test]
fn test_path_must_start_with_slash() {
    let mut table = RouteTable::new(1);

    let err = table
        .register("users", Method::GET, handler("list"))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidPath(_)));
}

#[test]
fn test_malformed_templates_rejected() {
    let mut table = RouteTable::new(1);

    for path in ["/a/<>", "/a/<name", "/a/name>", "/a/<na<me>"] {
        let err = table
            .register(path, Method::GET, handler("h"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)), "path {path:?}");
    }
}

#[test]
fn test_list_routes_matches_registrations_exactly() {
    let mut table = RouteTable::new(1);

    table.register("/users", Method::GET, handler("get_users")).unwrap();
    table.register("/users", Method::POST, handler("add_user")).unwrap();
    table.register("/data", Method::GET, handler("get_data")).unwrap();

    let routes = table.list_routes();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes["/v1/users"].len(), 2);
    assert_eq!(routes["/v1/users"]["GET"], "get_users");
    assert_eq!(routes["/v1/users"]["POST"], "add_user");
    assert_eq!(routes["/v1/data"]["GET"], "get_data");
}

#[test]
fn test_dynamic_segment_binds_value() {
    let mut table = RouteTable::new(1);

    table.register("/greet/<name>", Method::GET, handler("greet")).unwrap();

    let matched = table.lookup("/v1/greet/alice", Method::GET).unwrap();
    assert_eq!(matched.handler.name(), "greet");
    assert_eq!(matched.params["name"], "alice");
}

#[test]
fn test_dynamic_segment_requires_nonempty_value() {
    let mut table = RouteTable::new(1);

    table.register("/greet/<name>", Method::GET, handler("greet")).unwrap();

    assert!(table.lookup("/v1/greet/", Method::GET).is_none());
    assert!(table.lookup("/v1/greet", Method::GET).is_none());
    assert!(table.lookup("/v1/greet/a/b", Method::GET).is_none());
}

#[test]
fn test_exact_route_wins_over_dynamic() {
    let mut table = RouteTable::new(1);

    table.register("/greet/<name>", Method::GET, handler("greet")).unwrap();
    table.register("/greet/admin", Method::GET, handler("greet_admin")).unwrap();

    let matched = table.lookup("/v1/greet/admin", Method::GET).unwrap();
    assert_eq!(matched.handler.name(), "greet_admin");
    assert!(matched.params.is_empty());

    let matched = table.lookup("/v1/greet/bob", Method::GET).unwrap();
    assert_eq!(matched.handler.name(), "greet");
}

#[test]
fn test_multi_segment_template() {
    let mut table = RouteTable::new(1);

    table
        .register("/users/<id>/posts/<post_id>", Method::GET, handler("post"))
        .unwrap();

    let matched = table.lookup("/v1/users/42/posts/7", Method::GET).unwrap();
    assert_eq!(matched.params["id"], "42");
    assert_eq!(matched.params["post_id"], "7");

    assert!(table.lookup("/v1/users/42/posts", Method::GET).is_none());
}
