//! Metrics/tracing hooks.
//!
//! With the `tracing` feature off these compile to nothing. Subscribers are
//! installed by the binary layer (see `tabulon-cli`).

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::TRACE, "tabulon", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) { /* no-op */
}

/// Fraction of rows kept by a mask, for selectivity logging.
pub fn selectivity(mask: &[bool]) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.iter().filter(|keep| **keep).count() as f64 / mask.len() as f64
}
