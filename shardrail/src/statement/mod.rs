//! Parsed `INSERT` statement model.
//!
//! Statements arrive here already parsed. The model carries only what
//! the optimizer needs: declared columns, `VALUES` rows, per-row
//! predicate groups over the sharding columns, and the target table.

pub mod condition;
pub mod expression;
pub mod value;

pub use condition::{Predicate, PredicateGroup, PredicateValue};
pub use expression::ExpressionSegment;
pub use value::Value;

/// One row of a `VALUES` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRow {
    assignments: Vec<ExpressionSegment>,
    parameters_count: usize,
}

impl InsertRow {
    /// Build a row from its assignment expressions. The placeholder
    /// count is derived from the expressions themselves.
    pub fn new(assignments: Vec<ExpressionSegment>) -> Self {
        let parameters_count = assignments
            .iter()
            .filter(|expr| expr.is_placeholder())
            .count();
        Self {
            assignments,
            parameters_count,
        }
    }

    pub fn assignments(&self) -> &[ExpressionSegment] {
        &self.assignments
    }

    /// How many slots of the flat parameter list this row consumes.
    pub fn parameters_count(&self) -> usize {
        self.parameters_count
    }
}

/// An `INSERT` statement, post-parse.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    table: String,
    columns: Vec<String>,
    rows: Vec<InsertRow>,
    predicate_groups: Vec<PredicateGroup>,
}

impl InsertStatement {
    pub fn new(
        table: &str,
        columns: Vec<String>,
        rows: Vec<InsertRow>,
        predicate_groups: Vec<PredicateGroup>,
    ) -> Self {
        Self {
            table: table.to_owned(),
            columns,
            rows,
            predicate_groups,
        }
    }

    /// Target table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Declared column names, in statement order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `VALUES` rows, in statement order.
    pub fn rows(&self) -> &[InsertRow] {
        &self.rows
    }

    /// Sharding predicate groups, one per row.
    pub fn predicate_groups(&self) -> &[PredicateGroup] {
        &self.predicate_groups
    }

    /// Total placeholders across all rows.
    pub fn parameters_count(&self) -> usize {
        self.rows.iter().map(|row| row.parameters_count()).sum()
    }
}
