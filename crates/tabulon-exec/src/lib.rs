#![forbid(unsafe_code)]
//! tabulon-exec: runs a `Query` against a `Table`.
//!
//! The executor is the error boundary of the engine: anything that goes wrong
//! while evaluating a query comes back as `QueryResult::Failure`, never as a
//! panic or an `Err` the caller must propagate.

pub mod metrics;
pub mod runtime;

pub use runtime::{match_query, ExecError, Executor, MatchStats, QueryResult};
