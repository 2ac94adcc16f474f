//! Typed columns and the scalars they hold.
//!
//! A `Column` is a closed sum over the supported scalar types. Columns are
//! immutable once built: `filter` always returns a new column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::DataType;

/// Owned scalar, used for query literals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Str(String),
}

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Int(_) => DataType::Integer,
            Scalar::Str(_) => DataType::String,
        }
    }

    pub fn borrowed(&self) -> ScalarRef<'_> {
        match self {
            Scalar::Int(i) => ScalarRef::Int(*i),
            Scalar::Str(s) => ScalarRef::Str(s),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.borrowed().fmt(f)
    }
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarRef<'a> {
    Int(i64),
    Str(&'a str),
}

impl ScalarRef<'_> {
    pub fn data_type(&self) -> DataType {
        match self {
            ScalarRef::Int(_) => DataType::Integer,
            ScalarRef::Str(_) => DataType::String,
        }
    }
}

impl fmt::Display for ScalarRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarRef::Int(i) => write!(f, "{i}"),
            ScalarRef::Str(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Column {
    Integer(Vec<i64>),
    String(Vec<String>),
}

impl Column {
    pub fn of_ints(values: impl IntoIterator<Item = i64>) -> Self {
        Column::Integer(values.into_iter().collect())
    }

    pub fn of_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Column::String(values.into_iter().map(Into::into).collect())
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Integer(_) => DataType::Integer,
            Column::String(_) => DataType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(v) => v.len(),
            Column::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Column::Integer(v) => Some(v),
            Column::String(_) => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Column::String(v) => Some(v),
            Column::Integer(_) => None,
        }
    }

    /// Like `as_ints`, but reports the actual variant on mismatch.
    pub fn expect_ints(&self) -> Result<&[i64]> {
        self.as_ints().ok_or(Error::TypeMismatch {
            expected: DataType::Integer,
            actual: self.data_type(),
        })
    }

    pub fn expect_strings(&self) -> Result<&[String]> {
        self.as_strings().ok_or(Error::TypeMismatch {
            expected: DataType::String,
            actual: self.data_type(),
        })
    }

    pub fn value_at(&self, row: usize) -> Result<ScalarRef<'_>> {
        let out = match self {
            Column::Integer(v) => v.get(row).map(|i| ScalarRef::Int(*i)),
            Column::String(v) => v.get(row).map(|s| ScalarRef::Str(s)),
        };
        out.ok_or(Error::RowOutOfRange {
            row,
            len: self.len(),
        })
    }

    /// Keep the values whose mask entry is `true`, in their original order.
    pub fn filter(&self, mask: &[bool]) -> Result<Column> {
        check_mask(mask, self.len())?;
        Ok(match self {
            Column::Integer(v) => Column::Integer(select(v, mask)),
            Column::String(v) => Column::String(select(v, mask)),
        })
    }
}

pub(crate) fn check_mask(mask: &[bool], expected: usize) -> Result<()> {
    if mask.len() != expected {
        return Err(Error::MaskLength {
            expected,
            actual: mask.len(),
        });
    }
    Ok(())
}

pub(crate) fn select<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    let kept = mask.iter().filter(|keep| **keep).count();
    let mut out = Vec::with_capacity(kept);
    for (val, keep) in values.iter().zip(mask) {
        if *keep {
            out.push(val.clone());
        }
    }
    out
}
