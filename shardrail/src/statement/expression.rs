//! Column-assignment expression.

use std::fmt::Display;

use super::Value;

/// One assignment in a `VALUES` tuple.
///
/// A placeholder refers to a slot in the parameter list that travels
/// with the expression's row: in the input statement that's the row's
/// share of the flat bound-parameter list, in an optimized unit it's
/// the unit's own parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionSegment {
    Literal(Value),
    Placeholder(usize),
}

impl ExpressionSegment {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl Display for ExpressionSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Placeholder(slot) => write!(f, "${}", slot + 1),
        }
    }
}
