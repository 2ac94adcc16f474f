//! Row-aligned tables and the to-one associations between them.
//!
//! Invariants:
//! - every column of a `Table` has exactly `row_count()` values;
//! - every association mapping has exactly `row_count()` entries, and each
//!   present entry is a valid row of the association's target table.
//!
//! Targets are shared through `Arc<Table>` so that many source tables (and the
//! filtered tables derived from them) can point at one target without copying.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::{Field, Schema};
use crate::types::{check_mask, select, Column};

/// A to-one mapping from each row of a source table to a row of `target`.
///
/// `None` marks a source row with no target (only produced by
/// [`Table::associate_to_partial`]).
#[derive(Debug, Clone)]
pub struct Association {
    target: Arc<Table>,
    mapping: Vec<Option<usize>>,
}

impl Association {
    pub fn target(&self) -> &Arc<Table> {
        &self.target
    }

    pub fn mapping(&self) -> &[Option<usize>] {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// True when every source row has a target.
    pub fn is_total(&self) -> bool {
        self.mapping.iter().all(Option::is_some)
    }

    /// Target row for `source_row`. `ordinal` is only used for the error message.
    pub fn target_row(&self, ordinal: usize, source_row: usize) -> Result<usize> {
        match self.mapping.get(source_row) {
            Some(Some(row)) => Ok(*row),
            Some(None) => Err(Error::MissingAssociation {
                ordinal,
                source_row,
            }),
            None => Err(Error::RowOutOfRange {
                row: source_row,
                len: self.mapping.len(),
            }),
        }
    }

    fn filter(&self, mask: &[bool]) -> Association {
        Association {
            target: Arc::clone(&self.target),
            mapping: select(&self.mapping, mask),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    names: Vec<Option<String>>,
    associations: Vec<Association>,
    row_count: usize,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Build a table of positional (unnamed) columns.
    pub fn of_columns(columns: impl IntoIterator<Item = Column>) -> Result<Table> {
        columns
            .into_iter()
            .fold(Table::builder(), TableBuilder::column)
            .build()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, ordinal: usize) -> Result<&Column> {
        self.columns.get(ordinal).ok_or(Error::ColumnOutOfRange {
            ordinal,
            count: self.columns.len(),
        })
    }

    pub fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.names.get(ordinal).and_then(|n| n.as_deref())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_deref() == Some(name))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn association(&self, ordinal: usize) -> Result<&Association> {
        self.associations
            .get(ordinal)
            .ok_or(Error::AssociationOutOfRange {
                ordinal,
                count: self.associations.len(),
            })
    }

    pub fn schema(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .zip(&self.names)
                .map(|(col, name)| Field::new(name.clone(), col.data_type()))
                .collect(),
        )
    }

    /// Attach a total to-one association. Returns the new association's ordinal.
    pub fn associate_to(&mut self, target: Arc<Table>, mapping: Vec<usize>) -> Result<usize> {
        self.associate_to_partial(target, mapping.into_iter().map(Some).collect())
    }

    /// Attach an association where `None` marks a row without a target.
    pub fn associate_to_partial(
        &mut self,
        target: Arc<Table>,
        mapping: Vec<Option<usize>>,
    ) -> Result<usize> {
        if mapping.len() != self.row_count {
            return Err(Error::AssociationLength {
                expected: self.row_count,
                actual: mapping.len(),
            });
        }
        let target_rows = target.row_count();
        for (source_row, target_row) in mapping.iter().enumerate() {
            if let Some(target_row) = *target_row {
                if target_row >= target_rows {
                    return Err(Error::InvalidAssociationTarget {
                        source_row,
                        target_row,
                        target_rows,
                    });
                }
            }
        }
        self.associations.push(Association { target, mapping });
        Ok(self.associations.len() - 1)
    }

    /// New table holding only the rows whose mask entry is `true`.
    ///
    /// Column order, names and associations carry over; association mappings
    /// are filtered by the same mask, so the result can itself be queried
    /// through them.
    pub fn filter(&self, mask: &[bool]) -> Result<Table> {
        check_mask(mask, self.row_count)?;
        let columns = self
            .columns
            .iter()
            .map(|c| c.filter(mask))
            .collect::<Result<Vec<_>>>()?;
        let associations = self.associations.iter().map(|a| a.filter(mask)).collect();
        Ok(Table {
            columns,
            names: self.names.clone(),
            associations,
            row_count: mask.iter().filter(|keep| **keep).count(),
        })
    }
}

/// Collects already-built columns and checks the row-count invariant on `build`.
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
    names: Vec<Option<String>>,
}

impl TableBuilder {
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self.names.push(None);
        self
    }

    pub fn named_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.columns.push(column);
        self.names.push(Some(name.into()));
        self
    }

    pub fn build(self) -> Result<Table> {
        let row_count = self.columns.first().map(Column::len).unwrap_or(0);
        for (idx, col) in self.columns.iter().enumerate() {
            if col.len() != row_count {
                return Err(Error::InconsistentColumnLength {
                    column: idx,
                    expected: row_count,
                    actual: col.len(),
                });
            }
        }
        Ok(Table {
            columns: self.columns,
            names: self.names,
            associations: Vec::new(),
            row_count,
        })
    }
}
