//! Optimizer output.

use crate::statement::{ExpressionSegment, Value};

use super::{GeneratedKey, RoutingCondition};

/// One row's worth of optimized values.
///
/// Value expressions are positionally aligned with the result's final
/// column list. Placeholder expressions refer to slots in this unit's
/// own parameter list, not the statement's flat one.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeResultUnit {
    values: Vec<ExpressionSegment>,
    parameters: Vec<Value>,
    parameters_count: usize,
}

impl OptimizeResultUnit {
    pub(super) fn new(
        values: Vec<ExpressionSegment>,
        parameters: Vec<Value>,
        parameters_count: usize,
    ) -> Self {
        Self {
            values,
            parameters,
            parameters_count,
        }
    }

    /// Fill one derived slot.
    ///
    /// Parametrized statements get a placeholder pointing at the slot
    /// appended to this unit's parameter list; literal-only statements
    /// get the value inlined, since there is no parameter list to
    /// extend.
    pub(super) fn fill_derived(&mut self, value: Value, parametrized: bool) {
        if parametrized {
            self.values
                .push(ExpressionSegment::Placeholder(self.parameters.len()));
            self.parameters.push(value);
        } else {
            self.values.push(ExpressionSegment::Literal(value));
        }
    }

    /// Resolve the value at a column position, whichever way it is
    /// represented.
    pub fn column_value(&self, index: usize) -> Option<&Value> {
        match self.values.get(index)? {
            ExpressionSegment::Literal(value) => Some(value),
            ExpressionSegment::Placeholder(slot) => self.parameters.get(*slot),
        }
    }

    /// Value expressions, original then derived.
    pub fn values(&self) -> &[ExpressionSegment] {
        &self.values
    }

    /// Parameter values consumed by this row, original then derived.
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Placeholders the original row consumed from the flat list.
    pub fn parameters_count(&self) -> usize {
        self.parameters_count
    }
}

/// Per-row intermediate representation of an optimized `INSERT`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeResult {
    column_names: Vec<String>,
    units: Vec<OptimizeResultUnit>,
    routing_conditions: Vec<RoutingCondition>,
    generated_key: Option<GeneratedKey>,
}

impl OptimizeResult {
    pub(super) fn new(
        column_names: Vec<String>,
        units: Vec<OptimizeResultUnit>,
        routing_conditions: Vec<RoutingCondition>,
        generated_key: Option<GeneratedKey>,
    ) -> Self {
        Self {
            column_names,
            units,
            routing_conditions,
            generated_key,
        }
    }

    /// Final column list: declared columns followed by derived ones.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// One unit per input row, in statement order.
    pub fn units(&self) -> &[OptimizeResultUnit] {
        &self.units
    }

    /// One routing condition per input row, in statement order.
    pub fn routing_conditions(&self) -> &[RoutingCondition] {
        &self.routing_conditions
    }

    /// Generated-key bookkeeping, echoed back to the caller whether
    /// the values were synthesized or user-supplied.
    pub fn generated_key(&self) -> Option<&GeneratedKey> {
        self.generated_key.as_ref()
    }
}
