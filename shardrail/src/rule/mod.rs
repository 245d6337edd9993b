//! Sharding rule metadata.
//!
//! Answers which columns route rows to shards and which tables get a
//! middleware-generated primary key. Shard selection itself (hash,
//! range, ...) happens downstream off the routing conditions the
//! optimizer emits.

use std::sync::Arc;

use shardrail_config::Config;

use crate::keygen::{Error as KeygenError, KeyGenerator, SnowflakeGenerator};

#[derive(Debug, Clone)]
struct TableRule {
    name: String,
    column: String,
    generated_key_column: Option<String>,
}

/// Sharding rules for all configured tables.
#[derive(Debug, Clone)]
pub struct ShardingRule {
    tables: Vec<TableRule>,
    key_generator: Arc<dyn KeyGenerator>,
}

impl ShardingRule {
    /// Build rules from config with the default snowflake generator.
    pub fn new(config: &Config, node_id: u64) -> Result<Self, KeygenError> {
        let generator: Arc<dyn KeyGenerator> = Arc::new(SnowflakeGenerator::new(node_id)?);
        Ok(Self::with_key_generator(config, generator))
    }

    /// Build rules with a caller-supplied key generator.
    pub fn with_key_generator(config: &Config, key_generator: Arc<dyn KeyGenerator>) -> Self {
        let tables = config
            .sharded_tables
            .iter()
            .map(|table| TableRule {
                name: table.name.clone(),
                column: table.column.clone(),
                generated_key_column: table.generated_key_column.clone(),
            })
            .collect();

        Self {
            tables,
            key_generator,
        }
    }

    fn table(&self, name: &str) -> Option<&TableRule> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Does this column route rows of the table to shards?
    pub fn is_routing_column(&self, column: &str, table: &str) -> bool {
        self.table(table)
            .map(|rule| rule.column == column)
            .unwrap_or(false)
    }

    /// Primary-key column the middleware maintains for the table.
    pub fn generated_key_column(&self, table: &str) -> Option<&str> {
        self.table(table)?.generated_key_column.as_deref()
    }

    /// Key generator for the table. Present only when the table has a
    /// generated-key column.
    pub fn key_generator(&self, table: &str) -> Option<&dyn KeyGenerator> {
        self.generated_key_column(table)
            .map(|_| self.key_generator.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use shardrail_config::ShardedTable;

    fn config() -> Config {
        Config {
            sharded_tables: vec![
                ShardedTable {
                    name: "users".into(),
                    column: "id".into(),
                    generated_key_column: Some("id".into()),
                },
                ShardedTable {
                    name: "orders".into(),
                    column: "user_id".into(),
                    generated_key_column: None,
                },
            ],
            encrypted_columns: vec![],
        }
    }

    #[test]
    fn test_routing_columns() {
        let rule = ShardingRule::new(&config(), 0).unwrap();

        assert!(rule.is_routing_column("id", "users"));
        assert!(!rule.is_routing_column("email", "users"));
        assert!(rule.is_routing_column("user_id", "orders"));
        assert!(!rule.is_routing_column("id", "unsharded"));
    }

    #[test]
    fn test_generated_key_lookup() {
        let rule = ShardingRule::new(&config(), 0).unwrap();

        assert_eq!(rule.generated_key_column("users"), Some("id"));
        assert_eq!(rule.generated_key_column("orders"), None);
        assert!(rule.key_generator("users").is_some());
        assert!(rule.key_generator("orders").is_none());
    }
}
