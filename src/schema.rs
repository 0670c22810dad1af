//! Schema capability layer: lazy compilation and parameter coercion.

use crate::spec::is_validatable;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::error;

/// A schema occupying a router-context slot.
///
/// Compilation is deferred to first use so registration can never fail. A
/// schema that turns out to be malformed logs once and degrades to
/// pass-through rather than punishing callers for a server-side mistake.
pub struct CompiledSchema {
    raw: Value,
    compiled: OnceLock<Option<jsonschema::Validator>>,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("raw", &self.raw)
            .finish()
    }
}

impl CompiledSchema {
    /// Wrap a raw schema value; returns `None` for values that cannot act as
    /// a schema (see [`is_validatable`]).
    pub fn new(raw: Value) -> Option<Arc<Self>> {
        is_validatable(&raw).then(|| {
            Arc::new(Self {
                raw,
                compiled: OnceLock::new(),
            })
        })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    fn validator(&self) -> Option<&jsonschema::Validator> {
        self.compiled
            .get_or_init(|| match jsonschema::validator_for(&self.raw) {
                Ok(validator) => Some(validator),
                Err(e) => {
                    error!(error = %e, "schema failed to compile, validation degraded to pass-through");
                    None
                }
            })
            .as_ref()
    }

    /// Validate a decoded value, collecting every failure message.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<String>> {
        let Some(validator) = self.validator() else {
            return Ok(());
        };
        let errors: Vec<String> = validator.iter_errors(value).map(|e| e.to_string()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Coerce a string-valued parameter map into the types the schema
    /// declares, then validate the result.
    pub fn coerce_and_validate(&self, raw: &HashMap<String, String>) -> Result<Value, Vec<String>> {
        let coerced = self.coerce_map(raw);
        self.validate(&coerced)?;
        Ok(coerced)
    }

    /// Build a JSON object from raw string parameters, converting each value
    /// per its declared property type. Parameters without a matching property
    /// stay strings.
    pub fn coerce_map(&self, raw: &HashMap<String, String>) -> Value {
        let properties = self.raw.get("properties").and_then(Value::as_object);
        let mut out = Map::new();
        for (name, value) in raw {
            let prop = properties.and_then(|p| p.get(name));
            out.insert(name.clone(), coerce_value(value, prop));
        }
        Value::Object(out)
    }
}

/// Convert a raw string value to the JSON type its schema declares.
///
/// A value that does not parse as the declared type is left as a string so
/// the subsequent validation reports the mismatch instead of silently
/// mangling the input. Arrays are split on commas; objects are expected as
/// inline JSON.
pub fn coerce_value(value: &str, schema: Option<&Value>) -> Value {
    fn primitive(val: &str, schema: Option<&Value>) -> Value {
        if let Some(ty) = schema.and_then(|s| s.get("type").and_then(Value::as_str)) {
            match ty {
                "integer" => val
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "number" => val
                    .parse::<f64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "boolean" => val
                    .parse::<bool>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                _ => Value::String(val.to_string()),
            }
        } else {
            Value::String(val.to_string())
        }
    }

    if let Some(ty) = schema.and_then(|s| s.get("type").and_then(Value::as_str)) {
        match ty {
            "array" => {
                let items = schema.and_then(|s| s.get("items"));
                let parts = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(|p| primitive(p.trim(), items))
                    .collect::<Vec<_>>();
                Value::Array(parts)
            }
            "object" => {
                serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
            }
            _ => primitive(value, schema),
        }
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id_schema() -> Arc<CompiledSchema> {
        CompiledSchema::new(json!({
            "type": "object",
            "properties": { "id": { "type": "integer" } },
            "required": ["id"]
        }))
        .unwrap()
    }

    #[test]
    fn test_coerces_declared_integer() {
        let schema = id_schema();
        let mut raw = HashMap::new();
        raw.insert("id".to_string(), "123".to_string());
        let value = schema.coerce_and_validate(&raw).unwrap();
        assert_eq!(value, json!({"id": 123}));
    }

    #[test]
    fn test_unparseable_value_fails_validation() {
        let schema = id_schema();
        let mut raw = HashMap::new();
        raw.insert("id".to_string(), "not-a-number".to_string());
        let errors = schema.coerce_and_validate(&raw).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_coerce_value_kinds() {
        assert_eq!(coerce_value("5", Some(&json!({"type": "integer"}))), json!(5));
        assert_eq!(
            coerce_value("2.5", Some(&json!({"type": "number"}))),
            json!(2.5)
        );
        assert_eq!(
            coerce_value("true", Some(&json!({"type": "boolean"}))),
            json!(true)
        );
        assert_eq!(
            coerce_value("1,2,3", Some(&json!({"type": "array", "items": {"type": "integer"}}))),
            json!([1, 2, 3])
        );
        assert_eq!(coerce_value("plain", None), json!("plain"));
    }

    #[test]
    fn test_malformed_schema_degrades_to_pass_through() {
        let schema = CompiledSchema::new(json!({"type": "no-such-type"})).unwrap();
        assert!(schema.validate(&json!({"anything": true})).is_ok());
    }

    #[test]
    fn test_non_object_rejected_at_wrap() {
        assert!(CompiledSchema::new(json!("just a string")).is_none());
        assert!(CompiledSchema::new(json!(false)).is_some());
    }
}
