//! Per-request event passed to route handlers.

use crate::ids::RequestId;
use http::Method;
use std::collections::HashMap;

/// Everything extracted from one inbound request, plus the response parts a
/// handler or middleware fills in before the body is written.
///
/// Handlers receive the event together with their operation's
/// [`RouterContext`](crate::context::RouterContext); the context reads the
/// request side and writes the response side through
/// [`reply`](crate::context::RouterContext::reply).
#[derive(Debug, Clone)]
pub struct Event {
    /// Correlation id, taken from `x-request-id` when present.
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without the query string.
    pub path: String,
    /// Path parameters extracted by the live router match.
    pub path_params: HashMap<String, String>,
    /// Decoded query string parameters.
    pub query_params: HashMap<String, String>,
    /// Raw query string (without the `?`), kept for tracing attributes.
    pub raw_query: Option<String>,
    /// Request headers with lower-cased names.
    pub headers: HashMap<String, String>,
    /// Cookies parsed from the `Cookie` header.
    pub cookies: HashMap<String, String>,
    /// Raw request body bytes, if a body was sent.
    pub body: Option<Vec<u8>>,
    response: ResponseParts,
}

/// The response half of an event: status and headers accumulated while the
/// handler runs. The body travels separately as the handler's return value.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    pub status: u16,
    pub headers: HashMap<String, String>,
}

impl Default for ResponseParts {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
        }
    }
}

impl Event {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            raw_query: None,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            body: None,
            response: ResponseParts::default(),
        }
    }

    /// Get a request header by name (case-insensitive; stored keys are
    /// lower-cased at parse time).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }

    pub fn set_status(&mut self, status: u16) {
        self.response.status = status;
    }

    pub fn set_response_header(&mut self, name: &str, value: String) {
        self.response.headers.insert(name.to_string(), value);
    }

    pub fn response(&self) -> &ResponseParts {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut ResponseParts {
        &mut self.response
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.query_params
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Attach a JSON body and the matching content type.
    pub fn with_json_body(mut self, value: &serde_json::Value) -> Self {
        self.body = Some(serde_json::to_vec(value).unwrap_or_default());
        self.with_header("content-type", "application/json")
    }

    /// Attach raw body bytes under an explicit content type.
    pub fn with_body(mut self, bytes: Vec<u8>, content_type: &str) -> Self {
        self.body = Some(bytes);
        self.with_header("content-type", content_type)
    }
}
