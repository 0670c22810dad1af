//! Live route table over host-syntax path patterns.

use crate::context::RouterContext;
use crate::error::Error;
use crate::event::Event;
use crate::middleware::Middleware;
use crate::paths::normalize_path;
use http::Method;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler signature: the request event plus the operation-bound context.
pub type Handler = Arc<dyn Fn(&mut Event, &RouterContext) -> Result<Value, Error> + Send + Sync>;

/// Options carried by a live route registration.
#[derive(Clone, Default)]
pub struct RouteOptions {
    /// Per-route middleware, run around the handler in registration order.
    pub middleware: Vec<Arc<dyn Middleware>>,
}

/// One mounted route: the matcher, the handler, and its operation context.
pub struct Route {
    pub method: Method,
    /// Pattern in host syntax (`/users/:id`, `/files/*`, `/docs/**`).
    pub pattern: String,
    regex: Regex,
    param_names: Vec<String>,
    pub handler: Handler,
    pub context: RouterContext,
    pub options: RouteOptions,
}

/// A matched route with the path parameters it captured.
pub struct RouteMatch {
    pub route: Arc<Route>,
    pub path_params: HashMap<String, String>,
}

/// Regex-backed route table.
///
/// Patterns use the host syntax: `:name` matches one segment and binds it,
/// `*` matches one unnamed segment (bound as `param`), and `**` matches the
/// remainder of the path (bound as `path`). Matching scans registration
/// order, so the first mounted route wins on overlap.
///
/// The table is filled during the configuration phase and shared immutably
/// with the serving side afterwards.
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Arc<Route>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a handler at `pattern` for `method`.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: Handler,
        context: RouterContext,
        options: RouteOptions,
    ) {
        let pattern = normalize_path(pattern);
        let (regex, param_names) = Self::pattern_to_regex(&pattern);
        debug!(
            method = %method,
            pattern = %pattern,
            operation_id = %context.operation().operation_id,
            "route mounted"
        );
        self.routes.push(Arc::new(Route {
            method,
            pattern,
            regex,
            param_names,
            handler,
            context,
            options,
        }));
    }

    /// Match a request against the table, extracting path parameters.
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        for route in &self.routes {
            if &route.method != method {
                continue;
            }
            if let Some(caps) = route.regex.captures(path) {
                let mut path_params = HashMap::new();
                for (i, name) in route.param_names.iter().enumerate() {
                    if let Some(m) = caps.get(i + 1) {
                        path_params.insert(name.clone(), m.as_str().to_string());
                    }
                }
                debug!(
                    method = %method,
                    path = %path,
                    pattern = %route.pattern,
                    path_params = ?path_params,
                    "route matched"
                );
                return Some(RouteMatch {
                    route: Arc::clone(route),
                    path_params,
                });
            }
        }
        warn!(method = %method, path = %path, "no route matched");
        None
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Compile a host-syntax pattern into a regex plus the ordered parameter
    /// names its capture groups bind.
    pub(crate) fn pattern_to_regex(pattern: &str) -> (Regex, Vec<String>) {
        if pattern == "/" {
            return (
                Regex::new(r"^/$").expect("failed to compile route regex"),
                Vec::new(),
            );
        }

        let mut out = String::with_capacity(pattern.len() + 8);
        out.push('^');
        let mut param_names = Vec::new();

        for segment in pattern.split('/') {
            if segment.is_empty() {
                continue;
            }
            if segment == "*" {
                out.push_str("/([^/]+)");
                param_names.push("param".to_string());
            } else if segment == "**" {
                out.push_str("/(.+)");
                param_names.push("path".to_string());
            } else if let Some(name) = segment.strip_prefix(':') {
                out.push_str("/([^/]+)");
                param_names.push(name.to_string());
            } else {
                out.push('/');
                out.push_str(&regex::escape(segment));
            }
        }

        out.push('$');
        let regex = Regex::new(&out).expect("failed to compile route regex");
        (regex, param_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_to_regex_params() {
        let (regex, names) = Router::pattern_to_regex("/users/:id/posts/:post_id");
        assert_eq!(names, vec!["id", "post_id"]);
        let caps = regex.captures("/users/42/posts/7").unwrap();
        assert_eq!(&caps[1], "42");
        assert_eq!(&caps[2], "7");
        assert!(!regex.is_match("/users/42"));
    }

    #[test]
    fn test_pattern_to_regex_wildcards() {
        let (regex, names) = Router::pattern_to_regex("/files/*");
        assert_eq!(names, vec!["param"]);
        assert!(regex.is_match("/files/report.pdf"));
        assert!(!regex.is_match("/files/a/b"));

        let (regex, names) = Router::pattern_to_regex("/docs/**");
        assert_eq!(names, vec!["path"]);
        let caps = regex.captures("/docs/guide/intro.md").unwrap();
        assert_eq!(&caps[1], "guide/intro.md");
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let (regex, _) = Router::pattern_to_regex("/v1.0/users");
        assert!(regex.is_match("/v1.0/users"));
        assert!(!regex.is_match("/v1x0/users"));
    }
}
