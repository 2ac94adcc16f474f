//! Runtime: evaluate a query's mask and filter every column with it.
//!
//! Behavior:
//! - Checks the query against the configured limits (pointer depth, criteria count).
//! - Computes the row mask (`Query::mask`), which validates ordinals and types.
//! - Builds a new table with `Table::filter`; the input is never touched.
//! - Converts every error on the way into `QueryResult::Failure(message)`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabulon_core::config::EngineConfig;
use tabulon_core::Table;
use tabulon_query::Query;

use crate::metrics;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("query has {count} criteria; the limit is {max}")]
    TooManyCriteria { count: usize, max: usize },

    #[error(transparent)]
    Core(#[from] tabulon_core::Error),
}

/// Outcome of `match`: the filtered table, or the reason the query failed.
#[derive(Debug, Clone)]
pub enum QueryResult {
    Success(Table),
    Failure(String),
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }

    pub fn table(&self) -> Option<&Table> {
        match self {
            QueryResult::Success(t) => Some(t),
            QueryResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            QueryResult::Success(_) => None,
            QueryResult::Failure(msg) => Some(msg),
        }
    }

    pub fn into_result(self) -> Result<Table, String> {
        match self {
            QueryResult::Success(t) => Ok(t),
            QueryResult::Failure(msg) => Err(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub rows_scanned: usize,
    pub rows_matched: usize,
    pub elapsed_micros: u64,
}

/// Executor owns only its configuration and holds no per-query state.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    cfg: EngineConfig,
}

impl Executor {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn run(&self, query: &Query, table: &Table) -> QueryResult {
        self.run_with_stats(query, table).0
    }

    pub fn run_with_stats(&self, query: &Query, table: &Table) -> (QueryResult, MatchStats) {
        let started = Instant::now();
        let mut stats = MatchStats {
            rows_scanned: table.row_count(),
            ..MatchStats::default()
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            kind = query.kind(),
            rows = table.row_count(),
            criteria = query.criteria_count(),
            "matching query"
        );

        let result = match self.try_run(query, table) {
            Ok(out) => {
                stats.rows_matched = out.row_count();
                QueryResult::Success(out)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(kind = query.kind(), error = %e, "query failed");
                QueryResult::Failure(e.to_string())
            }
        };
        stats.elapsed_micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        metrics::emit_span(
            "match",
            &[
                ("kind", query.kind().to_string()),
                ("ok", result.is_success().to_string()),
                ("rows_scanned", stats.rows_scanned.to_string()),
                ("rows_matched", stats.rows_matched.to_string()),
                ("elapsed_us", stats.elapsed_micros.to_string()),
            ],
        );
        (result, stats)
    }

    fn try_run(&self, query: &Query, table: &Table) -> Result<Table, ExecError> {
        self.check_limits(query)?;
        let mask = query.mask(table)?;

        if self.cfg.trace_masks {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                kind = query.kind(),
                rows = mask.len(),
                selectivity = metrics::selectivity(&mask),
                "mask computed"
            );
        }

        Ok(table.filter(&mask)?)
    }

    fn check_limits(&self, query: &Query) -> Result<(), ExecError> {
        self.cfg.validate()?;
        let depth = query.max_pointer_depth();
        if depth > self.cfg.max_pointer_depth {
            return Err(tabulon_core::Error::PointerTooDeep {
                depth,
                max: self.cfg.max_pointer_depth,
            }
            .into());
        }
        let count = query.criteria_count();
        if count > self.cfg.max_criteria {
            return Err(ExecError::TooManyCriteria {
                count,
                max: self.cfg.max_criteria,
            });
        }
        Ok(())
    }
}

/// `match(query, table)` with the default configuration.
pub fn match_query(query: &Query, table: &Table) -> QueryResult {
    Executor::default().run(query, table)
}
