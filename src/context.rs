//! Router context: the per-operation validation and reply contract.

use crate::error::{Error, Location};
use crate::event::Event;
use crate::schema::CompiledSchema;
use crate::spec::{
    param_schema, request_body_schema, response_body_schema, response_header_schema, OperationSpec,
    ParameterLocation,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Bridges one registered operation to per-request validated data access and
/// typed reply construction.
///
/// The context captures the operation's declared schemas once, at
/// registration time, and never changes afterwards. It is cheap to clone and
/// carries no mutable state; the route handler closure typically holds it for
/// the lifetime of the route.
#[derive(Debug, Clone)]
pub struct RouterContext {
    operation: Arc<OperationSpec>,
    path_schema: Option<Arc<CompiledSchema>>,
    query_schema: Option<Arc<CompiledSchema>>,
    header_schema: Option<Arc<CompiledSchema>>,
    cookie_schema: Option<Arc<CompiledSchema>>,
    body_schema: Option<Arc<CompiledSchema>>,
    response_schemas: HashMap<u16, ResponseSchemas>,
}

#[derive(Debug, Clone, Default)]
struct ResponseSchemas {
    body: Option<Arc<CompiledSchema>>,
    headers: Option<Arc<CompiledSchema>>,
}

impl RouterContext {
    pub(crate) fn new(operation: Arc<OperationSpec>) -> Self {
        let slot = |location| {
            param_schema(&operation, location)
                .cloned()
                .and_then(CompiledSchema::new)
        };
        let response_schemas = operation
            .responses
            .iter()
            .map(|(&status, _)| {
                let schemas = ResponseSchemas {
                    body: response_body_schema(&operation, status)
                        .cloned()
                        .and_then(CompiledSchema::new),
                    headers: response_header_schema(&operation, status)
                        .cloned()
                        .and_then(CompiledSchema::new),
                };
                (status, schemas)
            })
            .collect();
        Self {
            path_schema: slot(ParameterLocation::Path),
            query_schema: slot(ParameterLocation::Query),
            header_schema: slot(ParameterLocation::Header),
            cookie_schema: slot(ParameterLocation::Cookie),
            body_schema: request_body_schema(&operation)
                .cloned()
                .and_then(CompiledSchema::new),
            response_schemas,
            operation,
        }
    }

    /// The operation this context is bound to.
    pub fn operation(&self) -> &OperationSpec {
        &self.operation
    }

    /// Path parameters, validated and coerced when the operation declares a
    /// path schema; the raw string map otherwise.
    pub fn params(&self, event: &Event) -> Result<Value, Error> {
        validated_map(&self.path_schema, &event.path_params, Location::PathParams)
    }

    /// Query parameters, under the same contract as [`params`](Self::params).
    pub fn query(&self, event: &Event) -> Result<Value, Error> {
        validated_map(&self.query_schema, &event.query_params, Location::QueryParams)
    }

    /// Request headers, under the same contract as [`params`](Self::params).
    pub fn headers(&self, event: &Event) -> Result<Value, Error> {
        validated_map(&self.header_schema, &event.headers, Location::Headers)
    }

    /// Cookies, under the same contract as [`params`](Self::params).
    pub fn cookies(&self, event: &Event) -> Result<Value, Error> {
        validated_map(&self.cookie_schema, &event.cookies, Location::Cookies)
    }

    /// The request body, decoded by content type and validated when a body
    /// schema is declared.
    ///
    /// Without a schema the body is decoded best-effort: JSON and
    /// form-urlencoded payloads come back as values; anything else (multipart
    /// uploads, raw binary) is rejected as unsupported media. An empty or
    /// absent body resolves to `Null` either way.
    pub fn body(&self, event: &Event) -> Result<Value, Error> {
        let raw = match event.body.as_deref() {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(Value::Null),
        };
        let content_type = event.content_type().unwrap_or("");
        match &self.body_schema {
            Some(schema) => {
                let decoded = decode_body(raw, content_type, Some(schema))
                    .map_err(|details| Error::validation(Location::Body, details))?;
                schema
                    .validate(&decoded)
                    .map_err(|details| Error::validation(Location::Body, details))?;
                Ok(decoded)
            }
            None => {
                if content_type.is_empty()
                    || content_type.starts_with("application/json")
                    || content_type.starts_with("application/x-www-form-urlencoded")
                {
                    decode_body(raw, content_type, None)
                        .map_err(|details| Error::validation(Location::Body, details))
                } else {
                    Err(Error::UnsupportedMediaType(content_type.to_string()))
                }
            }
        }
    }

    /// Set the response status and headers, returning `data` unchanged.
    ///
    /// This path performs no runtime validation: the declared response
    /// schemas stay a compile-time contract for trusted producers, and the
    /// call costs nothing beyond the header writes.
    pub fn reply(
        &self,
        event: &mut Event,
        status: u16,
        data: Value,
        headers: Option<&Map<String, Value>>,
    ) -> Value {
        event.set_status(status);
        if let Some(headers) = headers {
            for (name, value) in headers {
                event.set_response_header(name, stringify(value));
            }
        }
        data
    }

    /// Like [`reply`](Self::reply), but the outgoing body and headers are
    /// validated against the response descriptor for `status` first.
    ///
    /// A failure here is a contract violation on the producing side and maps
    /// to HTTP 500. A declared header schema is checked even when no headers
    /// were supplied, so a required response header can never be silently
    /// omitted. Intended for invariant-critical responses and contract tests;
    /// the hot path stays on `reply`.
    pub fn valid_reply(
        &self,
        event: &mut Event,
        status: u16,
        data: Value,
        headers: Option<&Map<String, Value>>,
    ) -> Result<Value, Error> {
        let schemas = self.response_schemas.get(&status);
        if let Some(schema) = schemas.and_then(|s| s.body.as_ref()) {
            schema.validate(&data).map_err(|details| Error::InternalValidation {
                location: Location::ResponseBody,
                details,
            })?;
        }
        if let Some(schema) = schemas.and_then(|s| s.headers.as_ref()) {
            let header_value = match headers {
                Some(map) => Value::Object(map.clone()),
                None => Value::Object(Map::new()),
            };
            schema
                .validate(&header_value)
                .map_err(|details| Error::InternalValidation {
                    location: Location::ResponseHeaders,
                    details,
                })?;
        }
        Ok(self.reply(event, status, data, headers))
    }
}

fn validated_map(
    schema: &Option<Arc<CompiledSchema>>,
    raw: &HashMap<String, String>,
    location: Location,
) -> Result<Value, Error> {
    match schema {
        Some(schema) => schema
            .coerce_and_validate(raw)
            .map_err(|details| Error::validation(location, details)),
        None => Ok(Value::Object(
            raw.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )),
    }
}

fn decode_body(
    raw: &[u8],
    content_type: &str,
    schema: Option<&CompiledSchema>,
) -> Result<Value, Vec<String>> {
    if content_type.starts_with("application/x-www-form-urlencoded") {
        let pairs: HashMap<String, String> = url::form_urlencoded::parse(raw)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Ok(match schema {
            Some(schema) => schema.coerce_map(&pairs),
            None => Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
        })
    } else {
        serde_json::from_slice(raw).map_err(|e| vec![format!("invalid JSON body: {e}")])
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
