//! Generated-key resolution.

use tracing::debug;

use crate::rule::ShardingRule;
use crate::statement::{ExpressionSegment, InsertStatement, Value};

use super::Error;

/// Generated-key bookkeeping for one statement.
///
/// Present whenever the table declares a generated-key column. The
/// `generated` flag says whether the middleware synthesized the
/// values or collected them from the statement; either way the
/// per-row values are echoed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedKey {
    column: String,
    generated: bool,
    values: Vec<Value>,
}

impl GeneratedKey {
    /// Decide which case applies for this statement.
    ///
    /// If the statement already assigns the key column, its values are
    /// collected as-is. Otherwise one value per row is pulled from the
    /// table's key generator.
    pub fn resolve(
        rule: &ShardingRule,
        statement: &InsertStatement,
        parameters: &[Value],
    ) -> Result<Option<Self>, Error> {
        let table = statement.table();
        let (Some(column), Some(generator)) =
            (rule.generated_key_column(table), rule.key_generator(table))
        else {
            return Ok(None);
        };

        let position = statement.columns().iter().position(|name| name == column);

        let key = match position {
            Some(position) => {
                let mut values = Vec::with_capacity(statement.rows().len());
                let mut offset = 0;

                for (row, insert_row) in statement.rows().iter().enumerate() {
                    let expression =
                        insert_row
                            .assignments()
                            .get(position)
                            .ok_or_else(|| Error::MissingColumn {
                                table: table.to_owned(),
                                column: column.to_owned(),
                                row,
                            })?;

                    let value = match expression {
                        ExpressionSegment::Literal(value) => value.clone(),
                        ExpressionSegment::Placeholder(slot) => parameters
                            .get(offset + slot)
                            .cloned()
                            .ok_or(Error::MissingParameter(offset + slot))?,
                    };

                    values.push(value);
                    offset += insert_row.parameters_count();
                }

                Self {
                    column: column.to_owned(),
                    generated: false,
                    values,
                }
            }

            None => {
                debug!(
                    "synthesizing {} key value(s) for table \"{}\"",
                    statement.rows().len(),
                    table
                );

                let values = statement
                    .rows()
                    .iter()
                    .map(|_| Value::Integer(generator.generate()))
                    .collect();

                Self {
                    column: column.to_owned(),
                    generated: true,
                    values,
                }
            }
        };

        Ok(Some(key))
    }

    #[cfg(test)]
    pub(crate) fn synthesized(column: &str, values: Vec<Value>) -> Self {
        Self {
            column: column.to_owned(),
            generated: true,
            values,
        }
    }

    /// Key column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Were the values synthesized by the middleware?
    pub fn generated(&self) -> bool {
        self.generated
    }

    /// Effective key value per row, in statement order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::keygen::test::IncrementingGenerator;
    use crate::statement::{InsertRow, PredicateGroup};
    use shardrail_config::{Config, ShardedTable};

    fn rule(start: i64) -> ShardingRule {
        let config = Config {
            sharded_tables: vec![ShardedTable {
                name: "users".into(),
                column: "id".into(),
                generated_key_column: Some("id".into()),
            }],
            encrypted_columns: vec![],
        };
        ShardingRule::with_key_generator(&config, Arc::new(IncrementingGenerator::new(start)))
    }

    fn statement(columns: Vec<String>, rows: Vec<InsertRow>) -> InsertStatement {
        let groups = rows.iter().map(|_| PredicateGroup::default()).collect();
        InsertStatement::new("users", columns, rows, groups)
    }

    #[test]
    fn test_not_configured() {
        let config = Config::default();
        let rule = ShardingRule::new(&config, 0).unwrap();
        let statement = statement(vec!["id".into()], vec![]);

        assert_eq!(GeneratedKey::resolve(&rule, &statement, &[]).unwrap(), None);
    }

    #[test]
    fn test_synthesized_when_column_omitted() {
        let rule = rule(100);
        let statement = statement(
            vec!["email".into()],
            vec![
                InsertRow::new(vec![ExpressionSegment::Placeholder(0)]),
                InsertRow::new(vec![ExpressionSegment::Placeholder(0)]),
            ],
        );

        let key = GeneratedKey::resolve(&rule, &statement, &[Value::from("a"), Value::from("b")])
            .unwrap()
            .unwrap();

        assert!(key.generated());
        assert_eq!(key.column(), "id");
        assert_eq!(key.values(), &[Value::from(100), Value::from(101)]);
    }

    #[test]
    fn test_user_supplied_literals() {
        let rule = rule(100);
        let statement = statement(
            vec!["id".into(), "email".into()],
            vec![InsertRow::new(vec![
                ExpressionSegment::Literal(Value::from(42)),
                ExpressionSegment::Literal(Value::from("a")),
            ])],
        );

        let key = GeneratedKey::resolve(&rule, &statement, &[])
            .unwrap()
            .unwrap();

        assert!(!key.generated());
        assert_eq!(key.values(), &[Value::from(42)]);
    }

    #[test]
    fn test_user_supplied_parameters() {
        let rule = rule(100);
        let statement = statement(
            vec!["email".into(), "id".into()],
            vec![
                InsertRow::new(vec![
                    ExpressionSegment::Placeholder(0),
                    ExpressionSegment::Placeholder(1),
                ]),
                InsertRow::new(vec![
                    ExpressionSegment::Placeholder(0),
                    ExpressionSegment::Placeholder(1),
                ]),
            ],
        );
        let parameters = vec![
            Value::from("a"),
            Value::from(7),
            Value::from("b"),
            Value::from(8),
        ];

        let key = GeneratedKey::resolve(&rule, &statement, &parameters)
            .unwrap()
            .unwrap();

        assert!(!key.generated());
        assert_eq!(key.values(), &[Value::from(7), Value::from(8)]);
    }

    #[test]
    fn test_user_supplied_missing_parameter() {
        let rule = rule(100);
        let statement = statement(
            vec!["id".into()],
            vec![InsertRow::new(vec![ExpressionSegment::Placeholder(0)])],
        );

        let err = GeneratedKey::resolve(&rule, &statement, &[]).unwrap_err();
        assert_eq!(err, Error::MissingParameter(0));
    }
}
