use super::*;
use crate::{
    test_fixtures::{Person, people},
    traits::Record,
};

fn names(rows: &[Person]) -> Vec<(&str, u32)> {
    rows.iter().map(|p| (p.name.as_str(), p.id)).collect()
}

#[test]
fn primary_orders_ascending() {
    let spec = primary(Person::model(), "name", Direction::Asc).unwrap();
    let rows = spec.sort(people());

    assert_eq!(
        names(&rows),
        vec![("Alpha", 2), ("Beta", 3), ("Gamma", 1), ("Gamma", 4)]
    );
}

#[test]
fn primary_orders_descending_and_keeps_ties_stable() {
    let spec = primary(Person::model(), "Name", Direction::Desc).unwrap();
    let rows = spec.sort(people());

    assert_eq!(
        names(&rows),
        vec![("Gamma", 1), ("Gamma", 4), ("Beta", 3), ("Alpha", 2)]
    );
}

#[test]
fn secondary_only_breaks_ties() {
    let spec = primary(Person::model(), "name", Direction::Desc).unwrap();
    let spec = secondary(spec, Person::model(), "id", Direction::Desc).unwrap();
    let rows = spec.sort(people());

    assert_eq!(
        names(&rows),
        vec![("Gamma", 4), ("Gamma", 1), ("Beta", 3), ("Alpha", 2)]
    );
    assert_eq!(spec.to_string(), "name DESC, id DESC");
}

#[test]
fn optional_nulls_sort_first_ascending() {
    let spec = primary(Person::model(), "age", Direction::Asc).unwrap();
    let ids: Vec<u32> = spec.sort(people()).iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![3, 2, 1, 4]);
}

#[test]
fn unknown_field_is_fatal() {
    let err = primary(Person::model(), "nmae", Direction::Asc).unwrap_err();

    assert!(err.is_field_not_found());
    assert_eq!(err.to_string(), "type [Person] does not have field [nmae]");
}

#[test]
fn secondary_unknown_field_is_fatal() {
    let spec = primary(Person::model(), "name", Direction::Asc).unwrap();
    let err = secondary(spec, Person::model(), "missing", Direction::Asc).unwrap_err();

    assert!(err.is_field_not_found());
}

#[test]
fn non_scalar_fields_are_unorderable() {
    for field in ["tags", "address"] {
        let err = primary(Person::model(), field, Direction::Asc).unwrap_err();
        assert!(
            matches!(err, QueryError::UnorderableField { .. }),
            "{field}: {err}"
        );
    }
}

#[test]
fn direction_from_ascending_flag() {
    assert_eq!(Direction::from_ascending(true), Direction::Asc);
    assert_eq!(Direction::from_ascending(false), Direction::Desc);
    assert_eq!(Direction::default(), Direction::Asc);
}

mod property {
    use super::*;
    use proptest::prelude::*;

    fn rows(pairs: Vec<(u8, u8)>) -> Vec<Person> {
        let mut template = people().remove(0);
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, age))| {
                template.id = u32::try_from(i).unwrap();
                template.name = format!("n{}", name % 4);
                template.age = Some(i16::from(age % 5));
                template.clone()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn primary_order_is_monotonic(pairs in prop::collection::vec((any::<u8>(), any::<u8>()), 0..24)) {
            let spec = primary(Person::model(), "name", Direction::Asc).unwrap();
            let sorted = spec.sort(rows(pairs));

            for w in sorted.windows(2) {
                prop_assert!(w[0].name <= w[1].name);
            }
        }

        #[test]
        fn then_by_preserves_primary_and_stability(pairs in prop::collection::vec((any::<u8>(), any::<u8>()), 0..24)) {
            let by_name = primary(Person::model(), "name", Direction::Asc).unwrap();
            let by_name_age = secondary(by_name.clone(), Person::model(), "age", Direction::Desc).unwrap();

            let primary_only = by_name.sort(rows(pairs.clone()));
            let chained = by_name_age.sort(rows(pairs));

            // primary grouping unchanged
            let a: Vec<&str> = primary_only.iter().map(|p| p.name.as_str()).collect();
            let b: Vec<&str> = chained.iter().map(|p| p.name.as_str()).collect();
            prop_assert_eq!(a, b);

            for w in chained.windows(2) {
                if w[0].name == w[1].name {
                    prop_assert!(w[0].age >= w[1].age);
                    if w[0].age == w[1].age {
                        // full ties keep input order
                        prop_assert!(w[0].id < w[1].id);
                    }
                }
            }
        }
    }
}
