//! # oproute
//!
//! A thin structural layer over [`may_minihttp`] for building OpenAPI-first
//! HTTP services: typed operation registration, per-operation request and
//! response validation, composable route modules, and OpenTelemetry request
//! tracing.
//!
//! The crate invents no protocol of its own. HTTP parsing and the serving
//! loop are `may_minihttp`'s; schema validation is the [`jsonschema`]
//! crate's; telemetry is the [`opentelemetry`] API's. What lives here is the
//! orchestration between them:
//!
//! - **[`spec`]** - the operation descriptor model (`OperationSpec`,
//!   request/response descriptors) plus the `json_request`/`json_response`
//!   builders and schema extraction helpers
//! - **[`paths`]** - the operation registry: descriptors accumulate into a
//!   document tree keyed by path and method, and every registration hands
//!   back a context bound to that operation
//! - **[`context`]** - the validation/reply contract handlers program
//!   against: `params`/`query`/`body` validate inbound data against the
//!   operation's schemas (or pass raw values through when none are
//!   declared); `reply` threads typed output through unchecked while
//!   `valid_reply` enforces the declared response contract
//! - **[`convert`]** - host-router path syntax (`:name`, `*`, `**`) to
//!   OpenAPI `{name}` templating
//! - **[`router`]** - the live route table and the [`OperationRouter`] that
//!   keeps it in lockstep with the registry
//! - **[`route`]** - standalone route constructors, resolved lazily against
//!   a dependency container and batch-registered
//! - **[`middleware`]** - the middleware trait, request metrics, and the
//!   OpenTelemetry tracing middleware
//! - **[`server`]** - `may_minihttp` glue: request parsing, response
//!   writing, the `AppService`, and a server handle
//!
//! ## Quick start
//!
//! ```no_run
//! use oproute::server::{AppService, HttpServer};
//! use oproute::spec::{json_response, JsonResponseOpts, OperationSpec};
//! use oproute::{OpenApiPaths, OperationRouter, Router};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut app = Router::new();
//! let mut paths = OpenApiPaths::new();
//!
//! let operation = OperationSpec::new("get_pet")
//!     .with_path_params(json!({
//!         "type": "object",
//!         "properties": { "id": { "type": "integer" } },
//!         "required": ["id"]
//!     }))
//!     .with_response(
//!         200,
//!         json_response(
//!             json!({ "type": "object" }),
//!             JsonResponseOpts { description: "the pet".into(), ..Default::default() },
//!         ),
//!     );
//!
//! OperationRouter::new(&mut app, &mut paths).get(
//!     "/pets/:id",
//!     operation,
//!     Arc::new(|event, ctx| {
//!         let params = ctx.params(event)?;
//!         Ok(ctx.reply(event, 200, json!({ "id": params["id"] }), None))
//!     }),
//! );
//!
//! let service = AppService::new(app, paths);
//! let handle = HttpServer(service).start("0.0.0.0:8080").unwrap();
//! handle.join().unwrap();
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod event;
pub mod ids;
pub mod middleware;
pub mod otel;
pub mod paths;
pub mod route;
pub mod router;
pub mod runtime_config;
pub mod schema;
pub mod server;
pub mod spec;

pub use context::RouterContext;
pub use convert::to_openapi_path;
pub use error::Error;
pub use event::Event;
pub use middleware::{Middleware, TracingConfig, TracingMiddleware};
pub use paths::OpenApiPaths;
pub use route::{register_all, RouteConstructor, RouteSetup};
pub use router::{Handler, OperationRouter, RouteOptions, Router};
pub use spec::{json_request, json_response, OpMethod, OperationSpec};
