//! Generated-key value suppliers.
//!
//! The optimizer only consumes the sequence of values; how they are
//! produced is up to the generator configured for the table.

pub mod snowflake;

pub use snowflake::{Error, SnowflakeGenerator};

/// Produces primary-key values for rows that omit them.
pub trait KeyGenerator: std::fmt::Debug + Send + Sync {
    /// Next key in the sequence.
    fn generate(&self) -> i64;
}
