//! End-to-end executor tests over small geography tables.

mod test_data_gen;

use std::sync::Arc;

use tabulon_core::types::Column;
use tabulon_core::Table;
use tabulon_exec::{match_query, QueryResult};
use tabulon_query::{Criteria, Pointer, Query};
use test_data_gen::{cities, generate_ints, strings, zips};

fn success(result: QueryResult) -> Table {
    match result {
        QueryResult::Success(t) => t,
        QueryResult::Failure(msg) => panic!("query failed: {msg}"),
    }
}

#[test]
fn test_int_query_one_column_table() {
    let table = Table::of_columns([Column::of_ints([-1, 0, 1, 2, 3])]).unwrap();
    let query = Query::ordinal_int(0, |i| i > 0);

    let out = success(match_query(&query, &table));

    assert_eq!(out.columns().len(), 1);
    assert_eq!(out.columns()[0].as_ints(), Some(&[1, 2, 3][..]));
}

#[test]
fn test_int_query_two_column_table() {
    let corpus = Table::of_columns([
        Column::of_strings(["Minneapolis", "Rochester", "Duluth"]),
        Column::of_ints([425_336, 121_395, 86_697]),
    ])
    .unwrap();
    let query = Query::ordinal_int(1, |pop| pop > 100_000 && pop < 150_000);

    let out = success(match_query(&query, &corpus));

    assert_eq!(out.columns().len(), 2);
    assert_eq!(strings(&out.columns()[0]), vec!["Rochester"]);
}

#[test]
fn test_multi_criteria() {
    let corpus = Table::of_columns([Column::of_strings(["a", "a", "b", "c", "c", "d"])]).unwrap();
    let query = Query::criteria([
        Criteria::string(Pointer::ordinal(0), |s| s > "a"),
        Criteria::string(Pointer::ordinal(0), |s| s < "d"),
    ]);

    let out = success(match_query(&query, &corpus));

    assert_eq!(strings(&out.columns()[0]), vec!["b", "c", "c"]);
}

#[test]
fn test_query_on_association_property() {
    let cities = cities();
    let state_name = || Pointer::nested(0, Pointer::ordinal(0));

    let sd = Query::criteria([Criteria::string(state_name(), |s| s == "South Dakota")]);
    let out = success(match_query(&sd, &cities));
    assert_eq!(out.columns().len(), 2);
    assert_eq!(strings(&out.columns()[0]), vec!["Pierre"]);

    let mn = Query::criteria([Criteria::string(state_name(), |s| s == "Minnesota")]);
    let out = success(match_query(&mn, &cities));
    assert_eq!(strings(&out.columns()[0]), vec!["Minneapolis", "Duluth"]);
}

#[test]
fn test_two_hop_association() {
    let zips = zips();
    let state_abbr = Pointer::from_path(&[0, 0, 1]).unwrap();
    let query = Query::criteria([Criteria::string(state_abbr, |s| s == "MN")]);

    let out = success(match_query(&query, &zips));

    assert_eq!(strings(&out.columns()[0]), vec!["55401", "55802", "55402"]);
}

#[test]
fn test_mixed_local_and_associated_criteria() {
    let cities = cities();
    let query = Query::criteria([
        Criteria::string(Pointer::nested(0, Pointer::ordinal(1)), |s| s == "MN"),
        Criteria::int(Pointer::ordinal(1), |pop| pop < 100_000),
    ]);

    let out = success(match_query(&query, &cities));

    assert_eq!(strings(&out.columns()[0]), vec!["Duluth"]);
    assert_eq!(out.columns()[1].as_ints(), Some(&[86_697][..]));
}

#[test]
fn test_result_can_be_queried_through_its_associations() {
    let cities = cities();
    let small = success(match_query(&Query::ordinal_int(1, |p| p < 100_000), &cities));
    assert_eq!(strings(&small.columns()[0]), vec!["Pierre", "Duluth"]);

    let in_sd = Query::criteria([Criteria::string(
        Pointer::nested(0, Pointer::ordinal(0)),
        |s| s == "South Dakota",
    )]);
    let out = success(match_query(&in_sd, &small));
    assert_eq!(strings(&out.columns()[0]), vec!["Pierre"]);
}

#[test]
fn test_failure_surfacing() {
    let cities = cities();

    let bad_column = Query::ordinal_int(9, |_| true);
    assert!(!match_query(&bad_column, &cities).is_success());

    let bad_assoc = Query::criteria([Criteria::string(
        Pointer::nested(3, Pointer::ordinal(0)),
        |_| true,
    )]);
    let res = match_query(&bad_assoc, &cities);
    assert!(res.failure().unwrap().contains("association ordinal 3"));

    let wrong_type = Query::criteria([Criteria::int(
        Pointer::nested(0, Pointer::ordinal(0)),
        |_| true,
    )]);
    let res = match_query(&wrong_type, &cities);
    assert!(res.failure().unwrap().contains("type mismatch"));
}

#[test]
fn test_missing_association_is_a_failure_not_a_panic() {
    let states = Arc::new(Table::of_columns([Column::of_strings(["Minnesota"])]).unwrap());
    let mut places = Table::of_columns([Column::of_strings(["Duluth", "Nowhere"])]).unwrap();
    places
        .associate_to_partial(states, vec![Some(0), None])
        .unwrap();
    let query = Query::criteria([Criteria::string(
        Pointer::nested(0, Pointer::ordinal(0)),
        |_| true,
    )]);

    let res = match_query(&query, &places);

    assert!(res.failure().unwrap().contains("no target"));
}

#[test]
fn test_soundness_against_original_rows() {
    let values = generate_ints(500, 7, 1_000);
    let table = Table::of_columns([Column::of_ints(values.clone())]).unwrap();
    let pred = |v: i64| v % 3 == 0 && v > 250;
    let query = Query::ordinal_int(0, pred);

    let out = success(match_query(&query, &table));

    let kept = out.columns()[0].as_ints().unwrap();
    assert!(kept.iter().all(|v| pred(*v)));
    let expected: Vec<i64> = values.iter().copied().filter(|v| pred(*v)).collect();
    assert_eq!(kept, expected.as_slice());
    assert_eq!(out.row_count(), expected.len());
}

#[test]
fn test_input_table_is_not_mutated() {
    let cities = cities();
    let before = cities.columns().to_vec();

    let _ = match_query(&Query::ordinal_int(1, |_| false), &cities);

    assert_eq!(cities.columns(), before.as_slice());
    assert_eq!(cities.row_count(), 3);
}
