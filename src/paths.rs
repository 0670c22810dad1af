//! Operation registry: the accumulated OpenAPI document tree.

use crate::context::RouterContext;
use crate::spec::{OpMethod, OperationSpec};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Methods registered for one normalized path.
pub type PathItem = IndexMap<OpMethod, Arc<OperationSpec>>;

/// Accumulates operation descriptors under `(path, method)` keys and hands
/// back a [`RouterContext`] bound to each registered operation.
///
/// Two registration policies coexist, split by entry point:
///
/// - [`on`](OpenApiPaths::on) and the verb helpers are
///   **accumulate-first-wins**: a later registration for an already-populated
///   `(path, method)` slot is dropped silently, so config-time duplicates can
///   never replace an earlier registration.
/// - [`set`](OpenApiPaths::set) is **direct overwrite**: the last write wins.
///
/// Under either policy, registering a new method on an existing path never
/// drops a previously registered method; methods accumulate within the path
/// item. Registration cannot fail and schemas are stored exactly as given.
///
/// The tree is mutated only during the single-threaded configuration phase
/// and read thereafter (by document builders and the `/openapi.json`
/// endpoint).
#[derive(Debug, Default)]
pub struct OpenApiPaths {
    paths: IndexMap<String, PathItem>,
}

impl OpenApiPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `operation` under every method in `methods` at `path`,
    /// returning a context bound to the operation.
    pub fn on<I>(&mut self, methods: I, path: &str, operation: OperationSpec) -> RouterContext
    where
        I: IntoIterator<Item = OpMethod>,
    {
        let operation = Arc::new(operation);
        let path = normalize_path(path);
        let item = self.paths.entry(path.clone()).or_default();
        for method in methods {
            if item.contains_key(&method) {
                debug!(
                    path = %path,
                    method = %method,
                    operation_id = %operation.operation_id,
                    "duplicate registration dropped"
                );
                continue;
            }
            item.insert(method, Arc::clone(&operation));
        }
        RouterContext::new(operation)
    }

    pub fn get(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on([OpMethod::Get], path, operation)
    }

    pub fn post(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on([OpMethod::Post], path, operation)
    }

    pub fn put(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on([OpMethod::Put], path, operation)
    }

    pub fn delete(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on([OpMethod::Delete], path, operation)
    }

    pub fn patch(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on([OpMethod::Patch], path, operation)
    }

    /// Register under the full method set {get, post, put, delete, patch}.
    pub fn all(&mut self, path: &str, operation: OperationSpec) -> RouterContext {
        self.on(OpMethod::ALL, path, operation)
    }

    /// Direct registration: always sets the `(path, method)` slot, replacing
    /// any earlier descriptor for that exact pair.
    pub fn set(&mut self, method: OpMethod, path: &str, operation: OperationSpec) -> RouterContext {
        let operation = Arc::new(operation);
        let path = normalize_path(path);
        self.paths
            .entry(path)
            .or_default()
            .insert(method, Arc::clone(&operation));
        RouterContext::new(operation)
    }

    /// The accumulated document tree, in registration order.
    pub fn paths(&self) -> &IndexMap<String, PathItem> {
        &self.paths
    }

    /// Look up the descriptor registered for a `(path, method)` pair.
    pub fn operation(&self, path: &str, method: OpMethod) -> Option<&Arc<OperationSpec>> {
        self.paths.get(&normalize_path(path))?.get(&method)
    }

    /// Serialize the tree as the OpenAPI `paths` object.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.paths).unwrap_or(Value::Null)
    }
}

/// Paths always start with `/` in the document tree.
pub(crate) fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
