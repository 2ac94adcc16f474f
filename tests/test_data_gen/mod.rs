//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use tabulon_core::types::Column;
use tabulon_core::Table;

/// states: [name, abbreviation]
pub fn states() -> Arc<Table> {
    Arc::new(
        Table::builder()
            .named_column("name", Column::of_strings(["Minnesota", "South Dakota"]))
            .named_column("abbr", Column::of_strings(["MN", "SD"]))
            .build()
            .expect("states table"),
    )
}

/// cities: [name, population], association 0 → states.
pub fn cities() -> Arc<Table> {
    let mut cities = Table::builder()
        .named_column("name", Column::of_strings(["Minneapolis", "Pierre", "Duluth"]))
        .named_column("population", Column::of_ints([425_336, 13_646, 86_697]))
        .build()
        .expect("cities table");
    cities
        .associate_to(states(), vec![0, 1, 0])
        .expect("city → state");
    Arc::new(cities)
}

/// zips: [code], association 0 → cities (and from there → states).
pub fn zips() -> Table {
    let mut zips = Table::builder()
        .named_column("code", Column::of_strings(["55401", "57501", "55802", "55402"]))
        .build()
        .expect("zips table");
    zips.associate_to(cities(), vec![0, 1, 2, 0])
        .expect("zip → city");
    zips
}

/// Deterministic pseudo-random integers (LCG) so property tests are repeatable.
pub fn generate_ints(rows: usize, seed: u64, modulo: i64) -> Vec<i64> {
    let mut state = seed;
    (0..rows)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as i64) % modulo
        })
        .collect()
}

pub fn generate_mask(rows: usize, seed: u64) -> Vec<bool> {
    generate_ints(rows, seed, 2).into_iter().map(|v| v == 1).collect()
}

pub fn strings(col: &Column) -> Vec<&str> {
    col.as_strings()
        .expect("string column")
        .iter()
        .map(String::as_str)
        .collect()
}
