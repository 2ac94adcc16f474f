//! The closed set of query shapes and their row masks.

use tabulon_core::error::Result;
use tabulon_core::Table;

use crate::criteria::{Criteria, IntPredicate};

#[derive(Debug, Clone)]
pub enum Query {
    /// One integer predicate over one column of the queried table.
    OrdinalSingleFieldInteger {
        column: usize,
        predicate: IntPredicate,
    },
    /// Conjunction of criteria; an empty list matches every row.
    PointedCriteria(Vec<Criteria>),
}

impl Query {
    pub fn ordinal_int(column: usize, f: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Query::OrdinalSingleFieldInteger {
            column,
            predicate: IntPredicate::new(f),
        }
    }

    pub fn criteria(criteria: impl IntoIterator<Item = Criteria>) -> Self {
        Query::PointedCriteria(criteria.into_iter().collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Query::OrdinalSingleFieldInteger { .. } => "ordinal_integer",
            Query::PointedCriteria(_) => "criteria",
        }
    }

    /// Deepest pointer path used by the query.
    pub fn max_pointer_depth(&self) -> usize {
        match self {
            Query::OrdinalSingleFieldInteger { .. } => 1,
            Query::PointedCriteria(list) => list
                .iter()
                .map(|c| c.pointer().depth())
                .max()
                .unwrap_or(0),
        }
    }

    pub fn criteria_count(&self) -> usize {
        match self {
            Query::OrdinalSingleFieldInteger { .. } => 1,
            Query::PointedCriteria(list) => list.len(),
        }
    }

    /// Structural checks that do not depend on any row: ordinals in range and
    /// column variants matching their predicates.
    pub fn validate(&self, table: &Table) -> Result<()> {
        match self {
            Query::OrdinalSingleFieldInteger { column, .. } => {
                table.column(*column)?.expect_ints()?;
            }
            Query::PointedCriteria(list) => {
                for criteria in list {
                    criteria.check(table)?;
                }
            }
        }
        Ok(())
    }

    /// One entry per row of `table`: does the row match?
    ///
    /// The query is validated first, so a malformed query fails even when the
    /// table is empty or an earlier criteria already rejected every row.
    pub fn mask(&self, table: &Table) -> Result<Vec<bool>> {
        self.validate(table)?;
        match self {
            Query::OrdinalSingleFieldInteger { column, predicate } => {
                let values = table.column(*column)?.expect_ints()?;
                Ok(values.iter().map(|v| predicate.test(*v)).collect())
            }
            Query::PointedCriteria(list) => {
                let mut mask = Vec::with_capacity(table.row_count());
                for row in 0..table.row_count() {
                    mask.push(all_match(list, table, row)?);
                }
                Ok(mask)
            }
        }
    }

    /// One line per predicate, for `explain` output.
    pub fn describe(&self) -> Vec<String> {
        match self {
            Query::OrdinalSingleFieldInteger { column, predicate } => vec![format!(
                "#{} {}",
                column,
                predicate.label().unwrap_or("<integer predicate>")
            )],
            Query::PointedCriteria(list) => list.iter().map(ToString::to_string).collect(),
        }
    }
}

fn all_match(criteria: &[Criteria], table: &Table, row: usize) -> Result<bool> {
    for c in criteria {
        if !c.test(table, row)? {
            return Ok(false);
        }
    }
    Ok(true)
}
