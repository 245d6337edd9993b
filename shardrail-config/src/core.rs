use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::PathBuf;
use tracing::{info, warn};

use super::encrypt::EncryptedColumn;
use super::error::Error;
use super::sharding::ShardedTable;

/// shardrail.toml
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Config {
    /// Sharded tables.
    #[serde(default)]
    pub sharded_tables: Vec<ShardedTable>,
    /// Encrypted columns.
    #[serde(default)]
    pub encrypted_columns: Vec<EncryptedColumn>,
}

impl Config {
    /// Load configuration from disk or use defaults.
    pub fn load(config_path: &PathBuf) -> Result<Self, Error> {
        let config: Config = if let Ok(config) = read_to_string(config_path) {
            let config = match toml::from_str(&config) {
                Ok(config) => config,
                Err(err) => return Err(Error::toml(&config_path.display().to_string(), err)),
            };
            info!("loaded \"{}\"", config_path.display());
            config
        } else {
            warn!(
                "\"{}\" doesn't exist, loading defaults instead",
                config_path.display()
            );
            Config::default()
        };

        Ok(config)
    }

    /// Sharded tables for the given table name.
    pub fn sharded_table(&self, name: &str) -> Option<&ShardedTable> {
        self.sharded_tables.iter().find(|table| table.name == name)
    }

    /// Encrypted columns declared for the given table.
    pub fn encrypted_columns<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a EncryptedColumn> + 'a {
        self.encrypted_columns
            .iter()
            .filter(move |column| column.table == table)
    }
}
