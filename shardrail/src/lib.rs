//! INSERT optimization stage of a sharding router.
//!
//! Takes an already-parsed `INSERT` statement plus its bound
//! parameters and produces a per-row intermediate representation:
//! routing conditions for shard selection, per-row value/parameter
//! slices for statement rewriting, and generated-key bookkeeping.

pub mod encrypt;
pub mod keygen;
pub mod optimize;
pub mod rule;
pub mod statement;

pub use encrypt::EncryptRule;
pub use optimize::{Error, GeneratedKey, InsertOptimizer, OptimizeResult, OptimizeResultUnit};
pub use rule::ShardingRule;
pub use statement::{ExpressionSegment, InsertRow, InsertStatement, Value};
