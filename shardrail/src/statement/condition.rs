//! Per-row predicate groups extracted by the parser.

use super::Value;

/// Where a predicate value comes from: written into the statement or
/// bound at a position in the flat parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Literal(Value),
    Parameter(usize),
}

/// One `column = value(s)` constraint on a sharding column.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub values: Vec<PredicateValue>,
}

impl Predicate {
    pub fn new(column: &str, values: Vec<PredicateValue>) -> Self {
        Self {
            column: column.to_owned(),
            values,
        }
    }

    /// Single equality constraint against a literal.
    pub fn eq(column: &str, value: Value) -> Self {
        Self::new(column, vec![PredicateValue::Literal(value)])
    }

    /// Single equality constraint against a bound parameter.
    pub fn eq_parameter(column: &str, index: usize) -> Self {
        Self::new(column, vec![PredicateValue::Parameter(index)])
    }
}

/// Conjunction of predicates for one `VALUES` row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredicateGroup {
    pub predicates: Vec<Predicate>,
}

impl PredicateGroup {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }
}
