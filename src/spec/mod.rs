mod helpers;
mod types;

pub use helpers::*;
pub use types::*;
