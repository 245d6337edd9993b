//! Insert optimization engine.
//!
//! Single pass over the statement's rows. Each row produces one
//! result unit (value expressions + the row's slice of the flat
//! parameter list, both extended with derived values) and one routing
//! condition for the shard selector.

use tracing::trace;

use crate::encrypt::EncryptRule;
use crate::rule::ShardingRule;
use crate::statement::{InsertStatement, Value};

use super::{
    Error, GeneratedKey, OptimizeResult, OptimizeResultUnit, RouteValue, RoutingCondition,
};

pub struct InsertOptimizer<'a> {
    rule: &'a ShardingRule,
    encrypt: &'a EncryptRule,
    statement: &'a InsertStatement,
    parameters: &'a [Value],
}

impl<'a> InsertOptimizer<'a> {
    pub fn new(
        rule: &'a ShardingRule,
        encrypt: &'a EncryptRule,
        statement: &'a InsertStatement,
        parameters: &'a [Value],
    ) -> Self {
        Self {
            rule,
            encrypt,
            statement,
            parameters,
        }
    }

    pub fn optimize(&self) -> Result<OptimizeResult, Error> {
        let generated_key = GeneratedKey::resolve(self.rule, self.statement, self.parameters)?;
        self.optimize_with_key(generated_key)
    }

    fn optimize_with_key(
        &self,
        generated_key: Option<GeneratedKey>,
    ) -> Result<OptimizeResult, Error> {
        let table = self.statement.table();
        let rows = self.statement.rows();
        let groups = self.statement.predicate_groups();

        if rows.len() != groups.len() {
            return Err(Error::RowCountMismatch {
                table: table.to_owned(),
                rows: rows.len(),
                groups: groups.len(),
            });
        }

        let synthesized_key = generated_key.as_ref().filter(|key| key.generated());

        if rows.is_empty() {
            return Ok(OptimizeResult::new(
                self.statement.columns().to_vec(),
                vec![],
                vec![],
                generated_key,
            ));
        }

        // Derived column names are appended once for the whole
        // statement: the generated key first, assisted-query
        // counterparts second. Units fill their derived slots in the
        // same order.
        let mut column_names = self.statement.columns().to_vec();
        if let Some(key) = synthesized_key {
            column_names.push(key.column().to_owned());
        }

        let assisted: Vec<(usize, String)> = column_names
            .iter()
            .enumerate()
            .filter_map(|(index, column)| {
                self.encrypt
                    .assisted_query_column(table, column)
                    .map(|name| (index, name.to_owned()))
            })
            .collect();
        column_names.extend(assisted.iter().map(|(_, name)| name.clone()));

        let parametrized = !self.parameters.is_empty();
        let derived_count = assisted.len() + usize::from(synthesized_key.is_some());
        let mut key_values = synthesized_key.map(|key| key.values().iter());

        let mut units = Vec::with_capacity(rows.len());
        let mut conditions = Vec::with_capacity(rows.len());
        let mut offset = 0;

        for (row_index, row) in rows.iter().enumerate() {
            let mut values = Vec::with_capacity(row.assignments().len() + derived_count);
            values.extend_from_slice(row.assignments());

            let parameters = if row.parameters_count() == 0 {
                vec![]
            } else {
                let end = offset + row.parameters_count();
                let slice = self
                    .parameters
                    .get(offset..end)
                    .ok_or(Error::MissingParameter(end - 1))?;
                let mut parameters = Vec::with_capacity(slice.len() + derived_count);
                parameters.extend_from_slice(slice);
                parameters
            };
            offset += row.parameters_count();

            let mut unit = OptimizeResultUnit::new(values, parameters, row.parameters_count());
            let mut condition =
                RoutingCondition::extract(&groups[row_index], table, self.parameters)?;

            if let (Some(key), Some(values)) = (synthesized_key, key_values.as_mut()) {
                let value = values
                    .next()
                    .ok_or_else(|| Error::GeneratedKeyExhausted {
                        table: table.to_owned(),
                        row: row_index,
                    })?
                    .clone();
                unit.fill_derived(value.clone(), parametrized);

                if self.rule.is_routing_column(key.column(), table) {
                    condition.push(RouteValue::new(key.column(), table, vec![value]));
                }
            }

            for (source, _) in &assisted {
                let value =
                    unit.column_value(*source)
                        .cloned()
                        .ok_or_else(|| Error::MissingColumn {
                            table: table.to_owned(),
                            column: column_names[*source].clone(),
                            row: row_index,
                        })?;
                unit.fill_derived(value, parametrized);
            }

            units.push(unit);
            conditions.push(condition);
        }

        let result = OptimizeResult::new(column_names, units, conditions, generated_key);
        trace!("insert optimize result: {:#?}", result);

        Ok(result)
    }
}
