mod core;
mod operation;

pub use core::{Handler, Route, RouteMatch, RouteOptions, Router};
pub use operation::OperationRouter;
