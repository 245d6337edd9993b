//! Encryption metadata.
//!
//! Only the column mapping lives here: which columns carry an
//! assisted-query (plaintext-searchable) counterpart. Encryption and
//! decryption of values happen elsewhere in the pipeline.

use indexmap::IndexMap;

use shardrail_config::Config;

/// Assisted-query column mapping, per table.
///
/// The optimizer consumes only [`assisted_query_column`]; the count
/// and presence accessors exist for the statement rewriter and
/// other downstream consumers of the mapping.
///
/// [`assisted_query_column`]: EncryptRule::assisted_query_column
#[derive(Debug, Clone, Default)]
pub struct EncryptRule {
    // table -> (column -> assisted counterpart), in config order.
    tables: IndexMap<String, IndexMap<String, String>>,
}

impl EncryptRule {
    pub fn new(config: &Config) -> Self {
        let mut tables: IndexMap<String, IndexMap<String, String>> = IndexMap::new();

        for column in &config.encrypted_columns {
            if let Some(assisted) = &column.assisted_query_column {
                tables
                    .entry(column.table.clone())
                    .or_default()
                    .insert(column.column.clone(), assisted.clone());
            }
        }

        Self { tables }
    }

    /// Assisted-query counterpart for the column, if configured.
    pub fn assisted_query_column(&self, table: &str, column: &str) -> Option<&str> {
        self.tables
            .get(table)?
            .get(column)
            .map(|name| name.as_str())
    }

    /// How many assisted-query columns the table carries.
    pub fn assisted_query_column_count(&self, table: &str) -> usize {
        self.tables.get(table).map(|map| map.len()).unwrap_or(0)
    }

    pub fn has_assisted_query_columns(&self, table: &str) -> bool {
        self.assisted_query_column_count(table) > 0
    }
}
