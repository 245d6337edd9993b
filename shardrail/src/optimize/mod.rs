//! INSERT optimization.

pub mod condition;
pub mod engine;
pub mod error;
pub mod generated_key;
pub mod result;

pub use condition::{RouteValue, RoutingCondition};
pub use engine::InsertOptimizer;
pub use error::Error;
pub use generated_key::GeneratedKey;
pub use result::{OptimizeResult, OptimizeResultUnit};
