use serde::{Deserialize, Serialize};

/// Sharded table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ShardedTable {
    /// Table name.
    pub name: String,
    /// Table sharded on this column.
    pub column: String,
    /// Primary-key column whose value the middleware synthesizes
    /// when the statement omits it.
    #[serde(default)]
    pub generated_key_column: Option<String>,
}
