//! Standalone route constructors: deferred, container-resolved registration.
//!
//! A [`RouteConstructor`] captures everything needed to register a route -
//! method set, path, operation descriptor, and a setup hook - without
//! touching any registry. The hook runs once, at resolution time, with
//! access to a caller-supplied dependency container, and yields the handler
//! (optionally with route options). The resolved value is a registration
//! side effect that can be applied to any registry/app pair, so route
//! modules defined across a codebase batch-register in one place.

use crate::convert::to_openapi_path;
use crate::paths::OpenApiPaths;
use crate::router::{Handler, RouteOptions, Router};
use crate::spec::{OpMethod, OperationSpec};

/// What a constructor's setup hook produces: a bare handler, or a handler
/// with route options attached.
pub enum RouteSetup {
    Handler(Handler),
    Configured {
        handler: Handler,
        options: RouteOptions,
    },
}

impl RouteSetup {
    fn into_parts(self) -> (Handler, RouteOptions) {
        match self {
            RouteSetup::Handler(handler) => (handler, RouteOptions::default()),
            RouteSetup::Configured { handler, options } => (handler, options),
        }
    }
}

/// A route defined independently of any registry, generic over the
/// dependency container `C` its setup hook resolves against.
pub struct RouteConstructor<C> {
    methods: Vec<OpMethod>,
    path: String,
    operation: OperationSpec,
    setup: Box<dyn FnOnce(&C) -> RouteSetup + Send>,
}

impl<C> RouteConstructor<C> {
    pub fn new<I, F>(methods: I, path: impl Into<String>, operation: OperationSpec, setup: F) -> Self
    where
        I: IntoIterator<Item = OpMethod>,
        F: FnOnce(&C) -> RouteSetup + Send + 'static,
    {
        Self {
            methods: methods.into_iter().collect(),
            path: path.into(),
            operation,
            setup: Box::new(setup),
        }
    }

    /// Resolve against a container. The setup hook runs exactly once, here.
    pub fn build(self, deps: &C) -> RoutePlugin {
        let (handler, options) = (self.setup)(deps).into_parts();
        RoutePlugin {
            methods: self.methods,
            path: self.path,
            operation: self.operation,
            handler,
            options,
        }
    }
}

/// The registration side effect produced by a resolved constructor.
pub struct RoutePlugin {
    methods: Vec<OpMethod>,
    path: String,
    operation: OperationSpec,
    handler: Handler,
    options: RouteOptions,
}

impl RoutePlugin {
    /// Register the operation (accumulate policy, converted path) and mount
    /// the handler at the original path with its options.
    pub fn register(self, paths: &mut OpenApiPaths, app: &mut Router) {
        let context = paths.on(
            self.methods.iter().copied(),
            &to_openapi_path(&self.path),
            self.operation,
        );
        for method in &self.methods {
            app.register(
                method.to_http(),
                &self.path,
                Handler::clone(&self.handler),
                context.clone(),
                self.options.clone(),
            );
        }
    }
}

/// Resolve and register a batch of independently defined routes against one
/// registry/app pair.
pub fn register_all<C>(
    paths: &mut OpenApiPaths,
    app: &mut Router,
    deps: &C,
    routes: Vec<RouteConstructor<C>>,
) {
    for route in routes {
        route.build(deps).register(paths, app);
    }
}
