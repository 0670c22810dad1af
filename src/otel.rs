//! Telemetry bootstrap: structured logging and trace propagation.
//!
//! Logging uses `tracing` with JSON output for production and pretty-print
//! for development. Trace propagation installs the W3C trace-context
//! propagator as the process-wide default, which the tracing middleware
//! resolves to when no explicit propagator is configured.

use anyhow::{Context as _, Result};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error.
    pub log_level: String,
    /// Output format.
    pub format: LogFormat,
    /// Buffer log writes off the request path.
    pub async_logging: bool,
}

impl LogConfig {
    /// Read configuration from `OPROUTE_LOG_LEVEL`, `OPROUTE_LOG_FORMAT`,
    /// and `OPROUTE_LOG_ASYNC`, with production-leaning defaults.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("OPROUTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("OPROUTE_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            async_logging: env::var("OPROUTE_LOG_ASYNC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Initialize logging from the environment with an explicit level override.
pub fn init_logging(log_level: &str) -> Result<()> {
    let mut config = LogConfig::from_env();
    config.log_level = log_level.to_string();
    init_logging_with_config(&config)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_writer(writer)
                .boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("failed to initialize async logging")?;
        // keep the flush guard alive for the application lifetime
        std::mem::forget(guard);
    } else {
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().with_target(true).boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("failed to initialize logging")?;
    }
    Ok(())
}

/// Register the W3C trace-context propagator as the global default.
///
/// Without this (or an explicitly configured propagator) the global
/// propagator is a no-op and inbound `traceparent` headers are ignored.
pub fn init_propagation() {
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
}
