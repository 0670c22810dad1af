use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::Middleware;
use crate::event::Event;
use serde_json::Value;

/// Passive request statistics middleware.
///
/// Counts requests, accumulates latency, and tracks server-side failures.
/// All counters use relaxed atomic operations, so collection is lock-free and
/// eventually consistent; this middleware never blocks or rejects a request.
#[derive(Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    total_latency_ns: AtomicU64,
    error_count: AtomicUsize,
}

impl MetricsMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of requests observed.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Mean handler latency across all observed requests; zero before the
    /// first request completes.
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Number of responses that ended with a 5xx status.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }
}

impl Middleware for MetricsMiddleware {
    fn before(&self, _event: &mut Event) -> Option<Value> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn after(&self, event: &mut Event, _body: &mut Value, latency: Duration) {
        self.total_latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);
        if event.response().status >= 500 {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_counts_requests_and_errors() {
        let metrics = MetricsMiddleware::new();
        let mut event = Event::new(Method::GET, "/pets");
        let mut body = Value::Null;

        assert!(metrics.before(&mut event).is_none());
        metrics.after(&mut event, &mut body, Duration::from_millis(2));
        assert_eq!(metrics.request_count(), 1);
        assert_eq!(metrics.error_count(), 0);
        assert!(metrics.average_latency().as_nanos() > 0);

        event.set_status(503);
        metrics.before(&mut event);
        metrics.after(&mut event, &mut body, Duration::from_millis(1));
        assert_eq!(metrics.request_count(), 2);
        assert_eq!(metrics.error_count(), 1);
    }
}
