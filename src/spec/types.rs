use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Media type given first-class treatment throughout the crate.
pub const APPLICATION_JSON: &str = "application/json";

/// The closed set of HTTP methods an operation can be registered under.
///
/// Serialized lower-case, matching the method keys of an OpenAPI path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl OpMethod {
    /// The full method set, used by `all` registrations.
    pub const ALL: [OpMethod; 5] = [
        OpMethod::Get,
        OpMethod::Post,
        OpMethod::Put,
        OpMethod::Delete,
        OpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpMethod::Get => "get",
            OpMethod::Post => "post",
            OpMethod::Put => "put",
            OpMethod::Delete => "delete",
            OpMethod::Patch => "patch",
        }
    }

    pub fn to_http(self) -> http::Method {
        match self {
            OpMethod::Get => http::Method::GET,
            OpMethod::Post => http::Method::POST,
            OpMethod::Put => http::Method::PUT,
            OpMethod::Delete => http::Method::DELETE,
            OpMethod::Patch => http::Method::PATCH,
        }
    }

    pub fn from_http(method: &http::Method) -> Option<Self> {
        match *method {
            http::Method::GET => Some(OpMethod::Get),
            http::Method::POST => Some(OpMethod::Post),
            http::Method::PUT => Some(OpMethod::Put),
            http::Method::DELETE => Some(OpMethod::Delete),
            http::Method::PATCH => Some(OpMethod::Patch),
            _ => None,
        }
    }
}

impl std::fmt::Display for OpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a request parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::Cookie => write!(f, "Cookie"),
        }
    }
}

/// Per-location request parameter schemas.
///
/// Each slot, when present, is a JSON Schema describing the full parameter
/// map for that location (an object whose properties are the parameters).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Value>,
}

/// A media-type entry: the schema plus any extra OpenAPI fields the caller
/// wants carried into the document (examples, encoding, vendor extensions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeObject {
    pub schema: Value,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl MediaTypeObject {
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            extra: Map::new(),
        }
    }
}

/// Request body descriptor: content keyed by media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: IndexMap<String, MediaTypeObject>,
}

/// One response descriptor: human description, content by media type, and an
/// optional schema for the response headers as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDesc {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaTypeObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
}

/// Response descriptors keyed by numeric status code.
///
/// JSON object keys are always strings, so numeral-shaped keys like `"201"`
/// are resolved to their numeric form on deserialization; lookups are always
/// by `u16`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Responses(pub BTreeMap<u16, ResponseDesc>);

impl Responses {
    pub fn get(&self, status: u16) -> Option<&ResponseDesc> {
        self.0.get(&status)
    }

    pub fn insert(&mut self, status: u16, desc: ResponseDesc) {
        self.0.insert(status, desc);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u16, &ResponseDesc)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, ResponseDesc>::deserialize(deserializer)?;
        let mut out = BTreeMap::new();
        for (key, desc) in raw {
            let status: u16 = key.trim().parse().map_err(|_| {
                serde::de::Error::custom(format!("invalid response status key `{key}`"))
            })?;
            out.insert(status, desc);
        }
        Ok(Responses(out))
    }
}

impl FromIterator<(u16, ResponseDesc)> for Responses {
    fn from_iter<I: IntoIterator<Item = (u16, ResponseDesc)>>(iter: I) -> Self {
        Responses(iter.into_iter().collect())
    }
}

/// Caller-supplied descriptor for one OpenAPI operation.
///
/// Immutable once registered; the registry stores it behind an `Arc` and
/// never inspects the schemas for well-formedness at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_params: Option<RequestParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: Responses,
}

impl OperationSpec {
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            request_params: None,
            request_body: None,
            responses: Responses::default(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_request_params(mut self, params: RequestParams) -> Self {
        self.request_params = Some(params);
        self
    }

    /// Shorthand for a path-parameter schema alone.
    pub fn with_path_params(mut self, schema: Value) -> Self {
        self.request_params
            .get_or_insert_with(RequestParams::default)
            .path = Some(schema);
        self
    }

    /// Shorthand for a query-parameter schema alone.
    pub fn with_query_params(mut self, schema: Value) -> Self {
        self.request_params
            .get_or_insert_with(RequestParams::default)
            .query = Some(schema);
        self
    }

    pub fn with_request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn with_response(mut self, status: u16, desc: ResponseDesc) -> Self {
        self.responses.insert(status, desc);
        self
    }

    /// The response descriptor registered for `status`, if any.
    pub fn response_for(&self, status: u16) -> Option<&ResponseDesc> {
        self.responses.get(status)
    }

    /// Content type registered for a response status.
    pub fn content_type_for(&self, status: u16) -> Option<&str> {
        self.response_for(status)?
            .content
            .as_ref()?
            .keys()
            .next()
            .map(String::as_str)
    }
}
