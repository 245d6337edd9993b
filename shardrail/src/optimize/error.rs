//! Optimizer errors.
//!
//! Every variant is a precondition violation: the parser or the rule
//! metadata handed us something inconsistent. Nothing here is
//! retried; callers reject the statement.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("statement for table \"{table}\" has {rows} value rows but {groups} predicate groups")]
    RowCountMismatch {
        table: String,
        rows: usize,
        groups: usize,
    },

    #[error("generated key sequence for table \"{table}\" exhausted at row {row}")]
    GeneratedKeyExhausted { table: String, row: usize },

    #[error("column \"{column}\" of table \"{table}\" missing from statement at row {row}")]
    MissingColumn {
        table: String,
        column: String,
        row: usize,
    },

    #[error("missing parameter: ${0}")]
    MissingParameter(usize),
}
