use oproute::spec::{OpMethod, OperationSpec};
use oproute::OpenApiPaths;

fn op(id: &str) -> OperationSpec {
    OperationSpec::new(id)
}

#[test]
fn test_methods_accumulate_on_one_path() {
    let mut paths = OpenApiPaths::new();
    paths.get("/pets", op("list_pets"));
    paths.post("/pets", op("add_pet"));

    let item = paths.paths().get("/pets").unwrap();
    assert_eq!(item.len(), 2);
    assert_eq!(item[&OpMethod::Get].operation_id, "list_pets");
    assert_eq!(item[&OpMethod::Post].operation_id, "add_pet");
}

#[test]
fn test_duplicate_registration_first_wins() {
    let mut paths = OpenApiPaths::new();
    paths.get("/pets", op("first"));
    paths.get("/pets", op("second"));

    assert_eq!(
        paths.operation("/pets", OpMethod::Get).unwrap().operation_id,
        "first"
    );
}

#[test]
fn test_set_overwrites() {
    let mut paths = OpenApiPaths::new();
    paths.get("/pets", op("first"));
    paths.set(OpMethod::Get, "/pets", op("second"));

    assert_eq!(
        paths.operation("/pets", OpMethod::Get).unwrap().operation_id,
        "second"
    );
}

#[test]
fn test_new_method_never_drops_existing_one() {
    let mut paths = OpenApiPaths::new();
    paths.get("/pets", op("list_pets"));
    paths.set(OpMethod::Put, "/pets", op("replace_pet"));
    paths.delete("/pets", op("remove_pet"));

    let item = paths.paths().get("/pets").unwrap();
    assert_eq!(item.len(), 3);
    assert_eq!(item[&OpMethod::Get].operation_id, "list_pets");
}

#[test]
fn test_all_registers_full_method_set() {
    let mut paths = OpenApiPaths::new();
    paths.all("/anything", op("catch_all"));

    let item = paths.paths().get("/anything").unwrap();
    assert_eq!(item.len(), 5);
    for method in OpMethod::ALL {
        assert_eq!(item[&method].operation_id, "catch_all");
    }
}

#[test]
fn test_paths_normalized_to_leading_slash() {
    let mut paths = OpenApiPaths::new();
    paths.get("pets", op("list_pets"));

    assert!(paths.paths().contains_key("/pets"));
    assert!(paths.operation("pets", OpMethod::Get).is_some());
    assert!(paths.operation("/pets", OpMethod::Get).is_some());
}

#[test]
fn test_document_shape_and_order() {
    let mut paths = OpenApiPaths::new();
    paths.get("/pets", op("list_pets"));
    paths.get("/pets/{id}", op("get_pet"));
    paths.post("/users", op("add_user"));

    let value = paths.to_value();
    assert_eq!(value["/pets"]["get"]["operationId"], "list_pets");
    assert_eq!(value["/pets/{id}"]["get"]["operationId"], "get_pet");
    assert_eq!(value["/users"]["post"]["operationId"], "add_user");

    let keys: Vec<&String> = paths.paths().keys().collect();
    assert_eq!(keys, ["/pets", "/pets/{id}", "/users"]);
}

#[test]
fn test_context_bound_to_registered_operation() {
    let mut paths = OpenApiPaths::new();
    let ctx = paths.get("/pets", op("list_pets"));
    assert_eq!(ctx.operation().operation_id, "list_pets");
}
