//! Schema pickers and JSON descriptor builders.
//!
//! The extraction functions are pure: they pick the relevant schema out of an
//! operation descriptor and return `None` when it is absent or cannot act as
//! a validation schema. Nothing here compiles or validates anything.

use super::types::{
    MediaTypeObject, OperationSpec, ParameterLocation, RequestBody, ResponseDesc, APPLICATION_JSON,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Whether a value can act as a schema for validation purposes.
///
/// JSON Schema documents are objects or booleans; anything else is stored in
/// the document verbatim but never compiled.
pub fn is_validatable(schema: &Value) -> bool {
    schema.is_object() || schema.is_boolean()
}

fn validatable(schema: &Value) -> Option<&Value> {
    is_validatable(schema).then_some(schema)
}

/// The parameter schema declared for `location`, if any.
pub fn param_schema(op: &OperationSpec, location: ParameterLocation) -> Option<&Value> {
    let params = op.request_params.as_ref()?;
    let schema = match location {
        ParameterLocation::Path => params.path.as_ref(),
        ParameterLocation::Query => params.query.as_ref(),
        ParameterLocation::Header => params.header.as_ref(),
        ParameterLocation::Cookie => params.cookie.as_ref(),
    }?;
    validatable(schema)
}

/// The JSON request body schema, if declared.
///
/// Only `application/json` content gets first-class treatment; bodies under
/// other media types are carried in the document but not extracted here.
pub fn request_body_schema(op: &OperationSpec) -> Option<&Value> {
    let media = op.request_body.as_ref()?.content.get(APPLICATION_JSON)?;
    validatable(&media.schema)
}

/// The JSON body schema of the response registered for `status`, if any.
pub fn response_body_schema(op: &OperationSpec, status: u16) -> Option<&Value> {
    let media = op
        .response_for(status)?
        .content
        .as_ref()?
        .get(APPLICATION_JSON)?;
    validatable(&media.schema)
}

/// The header schema of the response registered for `status`, if any.
pub fn response_header_schema(op: &OperationSpec, status: u16) -> Option<&Value> {
    validatable(op.response_for(status)?.headers.as_ref()?)
}

/// Options for [`json_request`].
#[derive(Debug, Clone, Default)]
pub struct JsonBodyOpts {
    pub required: Option<bool>,
    pub description: Option<String>,
    /// Extra fields merged into the `application/json` media-type entry.
    pub content: Map<String, Value>,
}

/// Build a JSON request body descriptor.
///
/// Produces `{ required: true, ..opts, content: { "application/json":
/// { schema, ..opts.content } } }`; the body is required unless the options
/// say otherwise.
pub fn json_request(schema: Value, opts: JsonBodyOpts) -> RequestBody {
    let mut content = IndexMap::new();
    content.insert(
        APPLICATION_JSON.to_string(),
        MediaTypeObject {
            schema,
            extra: opts.content,
        },
    );
    RequestBody {
        required: opts.required.unwrap_or(true),
        description: opts.description,
        content,
    }
}

/// Options for [`json_response`].
#[derive(Debug, Clone, Default)]
pub struct JsonResponseOpts {
    pub description: String,
    pub headers: Option<Value>,
    /// Extra fields merged into the `application/json` media-type entry.
    pub content: Map<String, Value>,
}

/// Build a JSON response descriptor with `schema` under `application/json`.
pub fn json_response(schema: Value, opts: JsonResponseOpts) -> ResponseDesc {
    let mut content = IndexMap::new();
    content.insert(
        APPLICATION_JSON.to_string(),
        MediaTypeObject {
            schema,
            extra: opts.content,
        },
    );
    ResponseDesc {
        description: opts.description,
        content: Some(content),
        headers: opts.headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op_with_body() -> OperationSpec {
        OperationSpec::new("add_pet")
            .with_request_body(json_request(
                json!({"type": "object"}),
                JsonBodyOpts::default(),
            ))
            .with_response(
                201,
                json_response(
                    json!({"type": "object"}),
                    JsonResponseOpts {
                        description: "created".into(),
                        ..Default::default()
                    },
                ),
            )
    }

    #[test]
    fn test_json_request_shape() {
        let body = json_request(
            json!({"type": "string"}),
            JsonBodyOpts {
                description: Some("name".into()),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["required"], true);
        assert_eq!(value["description"], "name");
        assert_eq!(value["content"]["application/json"]["schema"]["type"], "string");
    }

    #[test]
    fn test_json_response_extra_content_fields() {
        let mut extra = Map::new();
        extra.insert("example".to_string(), json!({"id": 1}));
        let desc = json_response(
            json!({"type": "object"}),
            JsonResponseOpts {
                description: "ok".into(),
                headers: Some(json!({"type": "object"})),
                content: extra,
            },
        );
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(value["content"]["application/json"]["example"]["id"], 1);
        assert_eq!(value["headers"]["type"], "object");
    }

    #[test]
    fn test_extraction_returns_none_when_absent() {
        let op = OperationSpec::new("bare");
        assert!(param_schema(&op, ParameterLocation::Path).is_none());
        assert!(request_body_schema(&op).is_none());
        assert!(response_body_schema(&op, 200).is_none());
        assert!(response_header_schema(&op, 200).is_none());
    }

    #[test]
    fn test_extraction_finds_declared_schemas() {
        let op = op_with_body().with_path_params(json!({"type": "object"}));
        assert!(param_schema(&op, ParameterLocation::Path).is_some());
        assert!(param_schema(&op, ParameterLocation::Query).is_none());
        assert!(request_body_schema(&op).is_some());
        assert!(response_body_schema(&op, 201).is_some());
        assert!(response_body_schema(&op, 200).is_none());
    }

    #[test]
    fn test_non_schema_values_are_not_validatable() {
        let op = OperationSpec::new("odd").with_path_params(json!("not a schema"));
        assert!(param_schema(&op, ParameterLocation::Path).is_none());
    }
}
