//! Span-capturing test support.
//!
//! A minimal in-memory span exporter so tests can assert on finished spans
//! without pulling the SDK's `testing` feature (and the extra runtime
//! dependencies it drags in) into the build.

use opentelemetry::global::BoxedTracer;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::{SdkTracerProvider, SpanData, SpanExporter};
use oproute::middleware::{TracingConfig, TracingMiddleware};
use std::sync::{Arc, Mutex};

/// Collects every exported span for later assertions.
#[derive(Clone, Debug, Default)]
pub struct CapturingExporter {
    spans: Arc<Mutex<Vec<SpanData>>>,
}

impl CapturingExporter {
    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.spans.lock().expect("span buffer lock poisoned").clone()
    }
}

impl SpanExporter for CapturingExporter {
    fn export(
        &self,
        batch: Vec<SpanData>,
    ) -> impl std::future::Future<Output = OTelSdkResult> + Send {
        self.spans
            .lock()
            .expect("span buffer lock poisoned")
            .extend(batch);
        std::future::ready(Ok(()))
    }
}

/// Build a tracing middleware whose spans land in the returned exporter.
///
/// The provider must stay alive for the duration of the test, so it is
/// returned alongside the middleware.
pub fn test_tracing(
    config: TracingConfig,
) -> (TracingMiddleware, CapturingExporter, SdkTracerProvider) {
    let exporter = CapturingExporter::default();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    let tracer = BoxedTracer::new(Box::new(provider.tracer("test")));
    (
        TracingMiddleware::with_tracer(tracer, config),
        exporter,
        provider,
    )
}

/// Look up an attribute value on a finished span.
pub fn attr<'a>(span: &'a SpanData, key: &str) -> Option<&'a opentelemetry::Value> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| &kv.value)
}
