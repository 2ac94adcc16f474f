//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest pointer path (associations crossed + the final column) a query may use.
    pub max_pointer_depth: usize,

    /// Maximum number of criteria in one conjunction.
    pub max_criteria: usize,

    /// Log per-query mask selectivity at TRACE level.
    pub trace_masks: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_pointer_depth: 16,
            max_criteria: 256,
            trace_masks: false,
        }
    }
}

/// Partial overrides, e.g. the `config:` block of a query document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub max_pointer_depth: Option<usize>,
    pub max_criteria: Option<usize>,
    pub trace_masks: Option<bool>,
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TABULON_MAX_POINTER_DEPTH`: longest allowed pointer path
    /// - `TABULON_MAX_CRITERIA`: largest allowed conjunction
    /// - `TABULON_TRACE_MASKS`: `1`/`true` to trace mask selectivity
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TABULON_MAX_POINTER_DEPTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_pointer_depth = v;
            }
        }

        if let Ok(s) = std::env::var("TABULON_MAX_CRITERIA") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_criteria = v;
            }
        }

        if let Ok(s) = std::env::var("TABULON_TRACE_MASKS") {
            if let Some(v) = parse_flag(&s) {
                cfg.trace_masks = v;
            }
        }

        cfg
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_pointer_depth {
            self.max_pointer_depth = v;
        }
        if let Some(v) = overrides.max_criteria {
            self.max_criteria = v;
        }
        if let Some(v) = overrides.trace_masks {
            self.trace_masks = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pointer_depth == 0 {
            return Err(Error::Config(
                "max_pointer_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
