//! Operation router: atomic OpenAPI + live-route registration.

use super::core::{Handler, RouteOptions, Router};
use crate::convert::to_openapi_path;
use crate::paths::OpenApiPaths;
use crate::spec::{OpMethod, OperationSpec};

/// Registers an operation descriptor and its live handler in one call.
///
/// For each verb the handler-declared path is converted to OpenAPI syntax
/// for the document, the descriptor is registered at the converted path, and
/// the handler is mounted at the *original* pattern on the live router with
/// the resulting [`RouterContext`](crate::context::RouterContext) injected as
/// its second argument. Every verb method returns `&mut Self` so route
/// configuration chains:
///
/// ```rust,ignore
/// OperationRouter::new(&mut app, &mut paths)
///     .get("/pets/:id", get_pet_op(), get_pet_handler())
///     .post("/pets", add_pet_op(), add_pet_handler());
/// ```
pub struct OperationRouter<'a> {
    app: &'a mut Router,
    paths: &'a mut OpenApiPaths,
}

impl<'a> OperationRouter<'a> {
    pub fn new(app: &'a mut Router, paths: &'a mut OpenApiPaths) -> Self {
        Self { app, paths }
    }

    /// Register `operation` and mount `handler` for every method in
    /// `methods`.
    pub fn on<I>(
        &mut self,
        methods: I,
        path: &str,
        operation: OperationSpec,
        handler: Handler,
    ) -> &mut Self
    where
        I: IntoIterator<Item = OpMethod>,
    {
        let methods: Vec<OpMethod> = methods.into_iter().collect();
        let context = self
            .paths
            .on(methods.iter().copied(), &to_openapi_path(path), operation);
        for method in &methods {
            self.app.register(
                method.to_http(),
                path,
                Handler::clone(&handler),
                context.clone(),
                RouteOptions::default(),
            );
        }
        self
    }

    pub fn get(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on([OpMethod::Get], path, operation, handler)
    }

    pub fn post(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on([OpMethod::Post], path, operation, handler)
    }

    pub fn put(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on([OpMethod::Put], path, operation, handler)
    }

    pub fn delete(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on([OpMethod::Delete], path, operation, handler)
    }

    pub fn patch(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on([OpMethod::Patch], path, operation, handler)
    }

    /// Register under the full method set {get, post, put, delete, patch}.
    pub fn all(&mut self, path: &str, operation: OperationSpec, handler: Handler) -> &mut Self {
        self.on(OpMethod::ALL, path, operation, handler)
    }
}
