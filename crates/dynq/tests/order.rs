mod common;

use common::*;
use dynq::{
    error::{ErrorClass, ErrorOrigin},
    prelude::*,
};

fn names(rows: &[Entity]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

fn ids(rows: &[Entity]) -> Vec<i32> {
    rows.iter().map(|row| row.id).collect()
}

#[test]
fn order_by_name_sorts_alphabetically() {
    let rows = Query::<Entity>::new()
        .order_by("Name")
        .and_then(|query| query.load(&entities()))
        .expect("order by name");

    assert_eq!(names(&rows), vec!["Alpha", "Beta", "Gamma", "Gamma"]);
}

#[test]
fn equal_keys_keep_source_order() {
    let rows = Query::<Entity>::new()
        .order_by_desc("name")
        .and_then(|query| query.load(&entities()))
        .expect("order by name descending");

    assert_eq!(names(&rows), vec!["Gamma", "Gamma", "Beta", "Alpha"]);
    assert_eq!(ids(&rows), vec![1, 4, 3, 2]);
}

#[test]
fn order_by_unknown_field_fails() {
    let err = Query::<Entity>::new()
        .order_by(MISSING_FIELD)
        .expect_err("unknown field");

    assert_eq!(err.to_string(), missing_field_message("Entity", MISSING_FIELD));
    assert!(err.is_field_not_found());
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[test]
fn then_by_breaks_ties_on_the_primary_key() {
    let filter = EntityFilter {
        name: Some("Gamma".to_string()),
        ..Default::default()
    };

    let ascending = Query::<Entity>::new()
        .filter_by(&filter)
        .and_then(|query| query.order_by("Name"))
        .and_then(|query| query.then_by("Id"))
        .and_then(|query| query.load(&entities()))
        .expect("then by id");
    assert_eq!(ids(&ascending), vec![1, 4]);

    let descending = Query::<Entity>::new()
        .filter_by(&filter)
        .and_then(|query| query.order_by("Name"))
        .and_then(|query| query.then_by_desc("Id"))
        .and_then(|query| query.load(&entities()))
        .expect("then by id descending");
    assert_eq!(ids(&descending), vec![4, 1]);
}

#[test]
fn then_by_unknown_field_fails() {
    let err = Query::<Entity>::new()
        .order_by("Name")
        .and_then(|query| query.then_by(MISSING_FIELD))
        .expect_err("unknown tie-break field");

    assert_eq!(err.to_string(), missing_field_message("Entity", MISSING_FIELD));
}

#[test]
fn order_by_replaces_an_existing_order() {
    let rows = Query::<Entity>::new()
        .order_by("name")
        .and_then(|query| query.order_by_desc("id"))
        .and_then(|query| query.load(&entities()))
        .expect("re-ordered query");

    assert_eq!(ids(&rows), vec![4, 3, 2, 1]);
}

#[test]
fn every_scalar_width_is_orderable() {
    for field in [
        "is_active",
        "number_of_relatives",
        "number_of_siblings",
        "salary",
        "expected_salary",
        "number_of_friends",
        "number_of_days",
        "number_of_seconds",
        "tax_rate",
        "social_insurance_rate",
        "index_funds_rate",
        "gender",
    ] {
        let rows = Query::<Entity>::new()
            .order_by_desc(field)
            .and_then(|query| query.load(&entities()))
            .unwrap_or_else(|err| panic!("order by {field}: {err}"));

        // row 1 holds every maximum (and is the only active row before row 4)
        assert_eq!(rows[0].id, 1, "descending by {field}");
    }
}

#[test]
fn descending_direction_on_then_by_applies_per_key() {
    let rows = Query::<Entity>::new()
        .order_by("is_active")
        .and_then(|query| query.then_by_desc("id"))
        .and_then(|query| query.load(&entities()))
        .expect("mixed directions");

    assert_eq!(ids(&rows), vec![3, 2, 4, 1]);
}

#[test]
fn nested_record_fields_are_not_orderable() {
    let err = Query::<Customer>::new()
        .order_by("address")
        .expect_err("records have no ordering");

    assert!(matches!(err, QueryError::UnorderableField { .. }));
    assert_eq!(err.origin(), ErrorOrigin::Order);
}

#[test]
fn timestamps_order_with_name_tie_break() {
    let rows = Query::<Customer>::new()
        .order_by("registered_at")
        .and_then(|query| query.then_by_dir("full_name", Direction::Desc))
        .and_then(|query| query.load(&customers()))
        .expect("order by registration");

    let first_four: Vec<&str> = rows
        .iter()
        .take(4)
        .map(|row| row.full_name.as_str())
        .collect();

    assert_eq!(
        first_four,
        vec!["Helena Borg", "Alice Smith", "Daichi Tanaka", "Jyoti Patel"]
    );
}

#[test]
fn explain_lists_order_keys_by_declared_name() {
    let query = Query::<Entity>::new()
        .order_by("NAME")
        .and_then(|query| query.then_by_desc("Id"))
        .expect("ordered query");

    assert_eq!(
        query.explain(),
        "SELECT * FROM Entity ORDER BY name ASC, id DESC"
    );
}
