//! HTTP service wiring: route match → middleware → tracing → handler →
//! error-to-HTTP layer.

use super::request::parse_request;
use super::response::{write_json_error, write_response};
use crate::error::Error;
use crate::event::Event;
use crate::middleware::TracingMiddleware;
use crate::paths::OpenApiPaths;
use crate::router::{RouteMatch, Router};
use may_minihttp::{HttpService, Request, Response};
use serde_json::{json, Value};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The application service. One clone serves each connection; the route
/// table, document tree, and tracing middleware are shared read-only.
///
/// Handler errors are resolved into HTTP responses *inside* the traced
/// section, so the span status always derives from the wire status a client
/// actually sees; only panics reach the tracing middleware as exceptions.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub paths: Arc<OpenApiPaths>,
    pub tracing: Option<Arc<TracingMiddleware>>,
}

impl AppService {
    pub fn new(router: Router, paths: OpenApiPaths) -> Self {
        Self {
            router: Arc::new(router),
            paths: Arc::new(paths),
            tracing: None,
        }
    }

    /// Install tracing around the handler chain.
    pub fn with_tracing(mut self, tracing: TracingMiddleware) -> Self {
        self.tracing = Some(Arc::new(tracing));
        self
    }

    /// Run per-route middleware and the handler, resolving any handler error
    /// into the event's response parts.
    fn dispatch(&self, event: &mut Event, route_match: &RouteMatch) -> Value {
        let route = &route_match.route;

        let mut early: Option<Value> = None;
        for mw in &route.options.middleware {
            match mw.before(event) {
                Some(body) if early.is_none() => early = Some(body),
                _ => {}
            }
        }

        let started = Instant::now();
        let mut body = match early {
            Some(body) => body,
            None => match (route.handler)(event, &route.context) {
                Ok(body) => body,
                Err(err) => error_body(event, &err),
            },
        };
        let latency = started.elapsed();

        for mw in &route.options.middleware {
            mw.after(event, &mut body, latency);
        }
        body
    }
}

/// Resolve a handler error into response parts and an error body.
///
/// Validation failures carry their details to the caller; internal contract
/// failures are reported without detail.
fn error_body(event: &mut Event, err: &Error) -> Value {
    let status = err.status();
    event.set_status(status);
    error!(
        request_id = %event.request_id,
        status = status,
        error = %err,
        "handler error"
    );
    match err.public_details() {
        Some(details) => json!({ "error": err.to_string(), "details": details }),
        None => json!({ "error": err.to_string() }),
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_response(
        res,
        200,
        &Default::default(),
        json!({ "status": "ok" }),
    );
    Ok(())
}

/// Serves the accumulated document tree as the OpenAPI `paths` object.
pub fn openapi_endpoint(res: &mut Response, paths: &OpenApiPaths) -> io::Result<()> {
    write_response(
        res,
        200,
        &Default::default(),
        json!({ "paths": paths.to_value() }),
    );
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let mut event = parse_request(req);

        if event.method == http::Method::GET && event.path == "/health" {
            return health_endpoint(res);
        }
        if event.method == http::Method::GET && event.path == "/openapi.json" {
            return openapi_endpoint(res, &self.paths);
        }

        let Some(route_match) = self.router.route(&event.method, &event.path) else {
            write_json_error(
                res,
                404,
                json!({
                    "error": "Not Found",
                    "method": event.method.as_str(),
                    "path": event.path,
                }),
            );
            return Ok(());
        };
        event.path_params = route_match.path_params.clone();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match &self.tracing {
            Some(tracing) => tracing.handle(&mut event, |event| Ok(self.dispatch(event, &route_match))),
            None => Ok(self.dispatch(&mut event, &route_match)),
        }));

        match outcome {
            Ok(Ok(body)) => {
                info!(
                    request_id = %event.request_id,
                    method = %event.method,
                    path = %event.path,
                    status = event.response().status,
                    "request complete"
                );
                let response = event.response();
                write_response(res, response.status, &response.headers, body);
            }
            Ok(Err(err)) => {
                // only reachable with custom wiring that lets errors pass
                // through the tracing middleware unresolved
                write_json_error(res, err.status(), json!({ "error": err.to_string() }));
            }
            Err(_) => {
                error!(
                    request_id = %event.request_id,
                    method = %event.method,
                    path = %event.path,
                    "handler panicked"
                );
                write_json_error(res, 500, json!({ "error": "Internal Server Error" }));
            }
        }
        Ok(())
    }
}
