use http::Method;
use oproute::spec::{OpMethod, OperationSpec};
use oproute::{Event, Handler, OpenApiPaths, OperationRouter, Router};
use serde_json::json;
use std::sync::Arc;

fn echo_handler() -> Handler {
    Arc::new(|event, ctx| {
        let params = ctx.params(event)?;
        Ok(ctx.reply(event, 200, json!({ "params": params }), None))
    })
}

#[test]
fn test_get_registers_document_and_live_route() {
    let mut app = Router::new();
    let mut paths = OpenApiPaths::new();

    OperationRouter::new(&mut app, &mut paths).get(
        "/pets/:id",
        OperationSpec::new("get_pet"),
        echo_handler(),
    );

    // document uses the converted path
    assert_eq!(
        paths.operation("/pets/{id}", OpMethod::Get).unwrap().operation_id,
        "get_pet"
    );

    // live route matches the original pattern
    let m = app.route(&Method::GET, "/pets/12345").unwrap();
    assert_eq!(m.path_params.get("id").unwrap(), "12345");
    assert_eq!(m.route.context.operation().operation_id, "get_pet");

    let mut event = Event::new(Method::GET, "/pets/12345").with_path_param("id", "12345");
    let body = (m.route.handler)(&mut event, &m.route.context).unwrap();
    assert_eq!(body, json!({ "params": { "id": "12345" } }));
}

#[test]
fn test_verb_methods_chain() {
    let mut app = Router::new();
    let mut paths = OpenApiPaths::new();

    OperationRouter::new(&mut app, &mut paths)
        .get("/pets", OperationSpec::new("list_pets"), echo_handler())
        .post("/pets", OperationSpec::new("add_pet"), echo_handler())
        .delete("/pets/:id", OperationSpec::new("remove_pet"), echo_handler());

    assert!(app.route(&Method::GET, "/pets").is_some());
    assert!(app.route(&Method::POST, "/pets").is_some());
    assert!(app.route(&Method::DELETE, "/pets/9").is_some());
    assert!(app.route(&Method::PUT, "/pets").is_none());

    let item = paths.paths().get("/pets").unwrap();
    assert_eq!(item.len(), 2);
}

#[test]
fn test_wildcard_routes() {
    let mut app = Router::new();
    let mut paths = OpenApiPaths::new();

    OperationRouter::new(&mut app, &mut paths)
        .get("/files/*", OperationSpec::new("get_file"), echo_handler())
        .get("/docs/**", OperationSpec::new("get_doc"), echo_handler());

    assert!(paths.operation("/files/{param}", OpMethod::Get).is_some());
    assert!(paths.operation("/docs/{path}", OpMethod::Get).is_some());

    let m = app.route(&Method::GET, "/files/report.pdf").unwrap();
    assert_eq!(m.path_params.get("param").unwrap(), "report.pdf");
    assert!(app.route(&Method::GET, "/files/a/b").is_none());

    let m = app.route(&Method::GET, "/docs/guide/intro.md").unwrap();
    assert_eq!(m.path_params.get("path").unwrap(), "guide/intro.md");
}

#[test]
fn test_all_mounts_every_method() {
    let mut app = Router::new();
    let mut paths = OpenApiPaths::new();

    OperationRouter::new(&mut app, &mut paths).all(
        "/proxy/**",
        OperationSpec::new("proxy"),
        echo_handler(),
    );

    assert_eq!(app.routes().len(), 5);
    for method in [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ] {
        assert!(app.route(&method, "/proxy/any/thing").is_some());
    }
}

#[test]
fn test_first_mounted_route_wins_on_overlap() {
    let mut app = Router::new();
    let mut paths = OpenApiPaths::new();

    OperationRouter::new(&mut app, &mut paths)
        .get("/pets/mine", OperationSpec::new("my_pets"), echo_handler())
        .get("/pets/:id", OperationSpec::new("get_pet"), echo_handler());

    let m = app.route(&Method::GET, "/pets/mine").unwrap();
    assert_eq!(m.route.context.operation().operation_id, "my_pets");

    let m = app.route(&Method::GET, "/pets/77").unwrap();
    assert_eq!(m.route.context.operation().operation_id, "get_pet");
}
