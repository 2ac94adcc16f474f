use thiserror::Error;

use crate::schema::DataType;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("row {row} out of range for {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("column ordinal {ordinal} out of range; table has {count} columns")]
    ColumnOutOfRange { ordinal: usize, count: usize },

    #[error("association ordinal {ordinal} out of range; table has {count} associations")]
    AssociationOutOfRange { ordinal: usize, count: usize },

    #[error("column {column} has {actual} rows but the table has {expected}")]
    InconsistentColumnLength {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("association mapping has {actual} entries but the source table has {expected} rows")]
    AssociationLength { expected: usize, actual: usize },

    #[error(
        "association maps source row {source_row} to row {target_row}, \
         but the target table has {target_rows} rows"
    )]
    InvalidAssociationTarget {
        source_row: usize,
        target_row: usize,
        target_rows: usize,
    },

    #[error("mask has {actual} entries but the column has {expected} values")]
    MaskLength { expected: usize, actual: usize },

    #[error("type mismatch: expected a {expected} column but found {actual}")]
    TypeMismatch { expected: DataType, actual: DataType },

    #[error("source row {source_row} has no target through association {ordinal}")]
    MissingAssociation { ordinal: usize, source_row: usize },

    #[error("pointer depth {depth} exceeds the configured maximum of {max}")]
    PointerTooDeep { depth: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for the ordinal/row bounds family (a query referenced something that isn't there).
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Error::RowOutOfRange { .. }
                | Error::ColumnOutOfRange { .. }
                | Error::AssociationOutOfRange { .. }
        )
    }
}
