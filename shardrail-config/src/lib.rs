// Submodules
pub mod core;
pub mod encrypt;
pub mod error;
pub mod sharding;

pub use core::Config;
pub use encrypt::EncryptedColumn;
pub use error::Error;
pub use sharding::ShardedTable;
