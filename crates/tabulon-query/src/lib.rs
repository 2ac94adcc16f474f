#![forbid(unsafe_code)]
//! tabulon-query: how to say *which rows* of a table you want.
//!
//! - `pointer`: paths to a scalar, optionally through associations.
//! - `criteria`: a pointer plus a typed predicate.
//! - `query`: the closed set of query shapes, and mask computation.
//! - `dsl`: YAML/JSON query documents compiled into `Query` values.
//!
//! Evaluation is pure; the exec crate wraps it with limits, logging, and the
//! `Success`/`Failure` boundary.

pub mod criteria;
pub mod dsl;
pub mod error;
pub mod pointer;
pub mod query;

pub use criteria::{Criteria, IntPredicate, Predicate, StrPredicate};
pub use dsl::yaml::{parse_json_query, parse_yaml_query};
pub use dsl::{CompareOp, QueryDocument, QuerySpec};
pub use error::DslError;
pub use pointer::{Pointer, Resolved};
pub use query::Query;
