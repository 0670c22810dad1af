//! Raw HTTP request parsing into [`Event`] parts.

use crate::event::Event;
use crate::ids::RequestId;
use http::Method;
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Parse cookies from a lower-cased header map.
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|cookie| {
            cookie
                .split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Decode a query string (without the `?`) into a parameter map.
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse an inbound `may_minihttp` request into an [`Event`].
///
/// Path parameters stay empty here; the route match fills them in. The body
/// is kept as raw bytes so the router context can decode it per content type.
pub fn parse_request(req: Request) -> Event {
    let method: Method = req.method().parse().unwrap_or(Method::GET);
    let raw_path = req.path().to_string();
    let (path, raw_query) = match raw_path.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (raw_path, None),
    };

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let cookies = parse_cookies(&headers);
    let query_params = raw_query.as_deref().map(parse_query_params).unwrap_or_default();
    let request_id = RequestId::from_header_or_new(headers.get("x-request-id").map(String::as_str));

    let mut buf = Vec::new();
    let body = match req.body().read_to_end(&mut buf) {
        Ok(n) if n > 0 => Some(buf),
        _ => None,
    };

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_count = query_params.len(),
        body_bytes = body.as_ref().map(Vec::len).unwrap_or(0),
        "request parsed"
    );

    let mut event = Event::new(method, path);
    event.request_id = request_id;
    event.raw_query = raw_query;
    event.headers = headers;
    event.cookies = cookies;
    event.query_params = query_params;
    event.body = body;
    event
}
