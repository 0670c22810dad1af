//! Host-router path syntax to OpenAPI path syntax conversion.

/// Convert a host-router path pattern to its OpenAPI equivalent.
///
/// The live router declares parameters in `:name` style with `*` and `**`
/// wildcard segments; OpenAPI documents use `{name}` templating. Segments are
/// rewritten as follows:
///
/// | host syntax | OpenAPI     |
/// |-------------|-------------|
/// | `:name`     | `{name}`    |
/// | `*`         | `{param}`   |
/// | `**`        | `{path}`    |
///
/// Any other segment passes through unchanged, so a path already written in
/// OpenAPI syntax converts to itself. A path missing the leading `/` is
/// normalized before splitting.
///
/// # Example
///
/// ```
/// use oproute::convert::to_openapi_path;
///
/// assert_eq!(to_openapi_path("/users/:id"), "/users/{id}");
/// assert_eq!(to_openapi_path("/files/*"), "/files/{param}");
/// assert_eq!(to_openapi_path("/docs/**"), "/docs/{path}");
/// ```
pub fn to_openapi_path(path: &str) -> String {
    let normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    normalized
        .split('/')
        .map(|segment| {
            if segment == "*" {
                "{param}".to_string()
            } else if segment == "**" {
                "{path}".to_string()
            } else if let Some(name) = segment.strip_prefix(':') {
                format!("{{{name}}}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
