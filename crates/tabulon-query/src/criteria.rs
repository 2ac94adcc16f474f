//! Criteria: a pointer plus a predicate over the scalar type it should reach.
//!
//! The pointer's target type is not checked at construction; a criteria whose
//! pointer lands on a column of the other variant fails with `TypeMismatch`
//! when evaluated.

use std::fmt;
use std::sync::Arc;

use tabulon_core::error::{Error, Result};
use tabulon_core::schema::DataType;
use tabulon_core::types::Column;
use tabulon_core::Table;

use crate::pointer::Pointer;

/// Shared, thread-safe predicate over integers.
#[derive(Clone)]
pub struct IntPredicate {
    f: Arc<dyn Fn(i64) -> bool + Send + Sync>,
    label: Option<Arc<str>>,
}

impl IntPredicate {
    pub fn new(f: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(f),
            label: None,
        }
    }

    /// Human-readable description used by `explain` and in logs.
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn test(&self, value: i64) -> bool {
        (self.f)(value)
    }
}

impl fmt::Debug for IntPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntPredicate({})", self.label().unwrap_or(".."))
    }
}

/// Shared, thread-safe predicate over strings.
#[derive(Clone)]
pub struct StrPredicate {
    f: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    label: Option<Arc<str>>,
}

impl StrPredicate {
    pub fn new(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(f),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn test(&self, value: &str) -> bool {
        (self.f)(value)
    }
}

impl fmt::Debug for StrPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrPredicate({})", self.label().unwrap_or(".."))
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Int(IntPredicate),
    Str(StrPredicate),
}

impl Predicate {
    pub fn expected_type(&self) -> DataType {
        match self {
            Predicate::Int(_) => DataType::Integer,
            Predicate::Str(_) => DataType::String,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Predicate::Int(p) => p.label(),
            Predicate::Str(p) => p.label(),
        }
    }

    /// Apply to `column[row]`, failing if the column is of the other variant.
    pub fn test_cell(&self, column: &Column, row: usize) -> Result<bool> {
        let hit = match (self, column) {
            (Predicate::Int(p), Column::Integer(values)) => values.get(row).map(|v| p.test(*v)),
            (Predicate::Str(p), Column::String(values)) => values.get(row).map(|v| p.test(v)),
            _ => return Err(self.mismatch(column)),
        };
        hit.ok_or(Error::RowOutOfRange {
            row,
            len: column.len(),
        })
    }

    /// Row-independent half of `test_cell`: does the column have the right variant?
    pub fn check_column(&self, column: &Column) -> Result<()> {
        if column.data_type() == self.expected_type() {
            Ok(())
        } else {
            Err(self.mismatch(column))
        }
    }

    fn mismatch(&self, column: &Column) -> Error {
        Error::TypeMismatch {
            expected: self.expected_type(),
            actual: column.data_type(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Criteria {
    pointer: Pointer,
    predicate: Predicate,
}

impl Criteria {
    pub fn new(pointer: Pointer, predicate: Predicate) -> Self {
        Self { pointer, predicate }
    }

    pub fn int(pointer: Pointer, f: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Self::new(pointer, Predicate::Int(IntPredicate::new(f)))
    }

    pub fn string(pointer: Pointer, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::new(pointer, Predicate::Str(StrPredicate::new(f)))
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Structural check against `table`: ordinals in range, column variant matches.
    pub fn check(&self, table: &Table) -> Result<()> {
        let column = self.pointer.resolve_column(table)?;
        self.predicate.check_column(column)
    }

    pub fn test(&self, table: &Table, row: usize) -> Result<bool> {
        let resolved = self.pointer.resolve(table, row)?;
        self.predicate.test_cell(resolved.column, resolved.row)
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate.label() {
            Some(label) => write!(f, "{} {}", self.pointer, label),
            None => write!(f, "{} <{} predicate>", self.pointer, self.predicate.expected_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Table {
        Table::of_columns([
            Column::of_strings(["a", "b", "c"]),
            Column::of_ints([1, 2, 3]),
        ])
        .unwrap()
    }

    #[test]
    fn string_criteria_tests_each_row() {
        let t = words();
        let c = Criteria::string(Pointer::ordinal(0), |s| s > "a");
        let hits: Vec<bool> = (0..3).map(|r| c.test(&t, r).unwrap()).collect();
        assert_eq!(hits, vec![false, true, true]);
    }

    #[test]
    fn wrong_variant_is_a_type_mismatch() {
        let t = words();
        let c = Criteria::int(Pointer::ordinal(0), |i| i > 0);
        let expected = Error::TypeMismatch {
            expected: DataType::Integer,
            actual: DataType::String,
        };
        assert_eq!(c.test(&t, 0), Err(expected.clone()));
        assert_eq!(c.check(&t), Err(expected));
        assert!(Criteria::int(Pointer::ordinal(1), |i| i > 0).check(&t).is_ok());
    }

    #[test]
    fn display_prefers_the_label() {
        let c = Criteria::new(
            Pointer::nested(0, Pointer::ordinal(1)),
            Predicate::Str(StrPredicate::new(|s| s == "SD").with_label("== \"SD\"")),
        );
        assert_eq!(c.to_string(), "@0.#1 == \"SD\"");
        let c = Criteria::int(Pointer::ordinal(2), |i| i == 0);
        assert_eq!(c.to_string(), "#2 <integer predicate>");
    }
}
