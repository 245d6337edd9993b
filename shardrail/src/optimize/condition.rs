//! Routing conditions handed to the shard selector.

use crate::statement::{PredicateGroup, PredicateValue, Value};

use super::Error;

/// Candidate values for one column of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteValue {
    column: String,
    table: String,
    values: Vec<Value>,
}

impl RouteValue {
    pub fn new(column: &str, table: &str, values: Vec<Value>) -> Self {
        Self {
            column: column.to_owned(),
            table: table.to_owned(),
            values,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Conjunction of column constraints for one row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingCondition {
    route_values: Vec<RouteValue>,
}

impl RoutingCondition {
    /// Turn a row's predicate group into routing values, resolving
    /// parameter markers against the flat bound-parameter list.
    pub fn extract(
        group: &PredicateGroup,
        table: &str,
        parameters: &[Value],
    ) -> Result<Self, Error> {
        let mut route_values = Vec::with_capacity(group.predicates.len());

        for predicate in &group.predicates {
            let values = predicate
                .values
                .iter()
                .map(|value| match value {
                    PredicateValue::Literal(value) => Ok(value.clone()),
                    PredicateValue::Parameter(index) => parameters
                        .get(*index)
                        .cloned()
                        .ok_or(Error::MissingParameter(*index)),
                })
                .collect::<Result<Vec<_>, Error>>()?;
            route_values.push(RouteValue::new(&predicate.column, table, values));
        }

        Ok(Self { route_values })
    }

    pub fn push(&mut self, route_value: RouteValue) {
        self.route_values.push(route_value);
    }

    pub fn route_values(&self) -> &[RouteValue] {
        &self.route_values
    }

    /// Routing values for the given column, if any.
    pub fn find(&self, column: &str) -> Option<&RouteValue> {
        self.route_values.iter().find(|rv| rv.column() == column)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::statement::Predicate;

    #[test]
    fn test_extract_literals_and_parameters() {
        let group = PredicateGroup::new(vec![
            Predicate::eq("region", Value::from("emea")),
            Predicate::eq_parameter("user_id", 1),
        ]);
        let parameters = vec![Value::from(10), Value::from(25)];

        let condition = RoutingCondition::extract(&group, "orders", &parameters).unwrap();

        assert_eq!(condition.route_values().len(), 2);
        assert_eq!(
            condition.find("region").unwrap().values(),
            &[Value::from("emea")]
        );
        assert_eq!(
            condition.find("user_id").unwrap().values(),
            &[Value::from(25)]
        );
        assert_eq!(condition.find("user_id").unwrap().table(), "orders");
    }

    #[test]
    fn test_missing_parameter() {
        let group = PredicateGroup::new(vec![Predicate::eq_parameter("user_id", 3)]);

        let err = RoutingCondition::extract(&group, "orders", &[]).unwrap_err();
        assert_eq!(err, Error::MissingParameter(3));
    }
}
