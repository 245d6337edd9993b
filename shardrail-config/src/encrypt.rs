use serde::{Deserialize, Serialize};

/// Encrypted column.
///
/// The optional assisted-query column is a plaintext-searchable
/// duplicate maintained alongside the cipher column, so equality
/// queries don't require decryption.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptedColumn {
    /// Table the column belongs to.
    pub table: String,
    /// Column name as declared in statements.
    pub column: String,
    /// Assisted-query counterpart column, if configured.
    #[serde(default)]
    pub assisted_query_column: Option<String>,
}
