//! Convenient re-exports for downstream crates.

pub use crate::config::{ConfigOverrides, EngineConfig};
pub use crate::error::{Error, Result};
pub use crate::schema::{DataType, Field, Schema};
pub use crate::table::{Association, Table, TableBuilder};
pub use crate::types::{Column, Scalar, ScalarRef};
