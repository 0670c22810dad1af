use std::time::Duration;

use crate::event::Event;
use serde_json::Value;

/// Hooks run around a route handler.
///
/// `before` may short-circuit the handler by returning a response body (after
/// setting status/headers on the event); `after` observes the final body and
/// the handler latency. Middleware attaches per route through
/// [`RouteOptions`](crate::router::RouteOptions).
pub trait Middleware: Send + Sync {
    fn before(&self, _event: &mut Event) -> Option<Value> {
        None
    }
    fn after(&self, _event: &mut Event, _body: &mut Value, _latency: Duration) {}
}
