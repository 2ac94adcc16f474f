#![forbid(unsafe_code)]
//! tabulon: an in-memory columnar query engine.
//!
//! Facade over the workspace crates:
//! - [`core`]: columns, tables, associations, errors, config;
//! - [`query`]: pointers, criteria, queries, query documents;
//! - [`exec`]: the executor and its `Success`/`Failure` results.
//!
//! ```
//! use std::sync::Arc;
//! use tabulon::prelude::*;
//!
//! let states = Arc::new(Table::of_columns([Column::of_strings(["Minnesota", "South Dakota"])])?);
//! let mut cities = Table::of_columns([Column::of_strings(["Minneapolis", "Pierre", "Duluth"])])?;
//! cities.associate_to(states, vec![0, 1, 0])?;
//!
//! let query = Query::criteria([Criteria::string(
//!     Pointer::nested(0, Pointer::ordinal(0)),
//!     |s| s == "South Dakota",
//! )]);
//! let out = match_query(&query, &cities).into_result().expect("query succeeds");
//! assert_eq!(out.columns()[0].as_strings(), Some(&["Pierre".to_string()][..]));
//! # Ok::<(), tabulon::core::Error>(())
//! ```

pub use tabulon_core as core;
pub use tabulon_exec as exec;
pub use tabulon_query as query;

pub mod prelude {
    pub use tabulon_core::prelude::*;
    pub use tabulon_exec::{match_query, Executor, MatchStats, QueryResult};
    pub use tabulon_query::{parse_json_query, parse_yaml_query, Criteria, Pointer, Query};
}
