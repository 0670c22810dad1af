use may_minihttp::Response;
use serde_json::Value;
use std::collections::HashMap;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a handler response: status, accumulated headers, and the body (JSON
/// for structured values, plain text for strings).
pub fn write_response(res: &mut Response, status: u16, headers: &HashMap<String, String>, body: Value) {
    res.status_code(status as usize, status_reason(status));
    let mut has_content_type = false;
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
        let header = format!("{name}: {value}").into_boxed_str();
        res.header(Box::leak(header));
    }
    match body {
        Value::String(text) => {
            if !has_content_type {
                res.header("Content-Type: text/plain");
            }
            res.body_vec(text.into_bytes());
        }
        other => {
            if !has_content_type {
                res.header("Content-Type: application/json");
            }
            res.body_vec(serde_json::to_vec(&other).unwrap_or_default());
        }
    }
}

/// Write a JSON error body with the given status.
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}
