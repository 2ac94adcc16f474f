#![forbid(unsafe_code)]
//! tabulon-core: the in-memory data model of the engine.
//!
//! - `types`: typed, immutable columns and the scalars they hold.
//! - `table`: row-aligned tables and the to-one associations between them.
//! - `config`: engine limits shared by the query and exec crates.
//!
//! Nothing here knows about queries; `tabulon-query` and `tabulon-exec` build on top.

pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use table::{Association, Table, TableBuilder};
pub use types::{Column, Scalar, ScalarRef};
