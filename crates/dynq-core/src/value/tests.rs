use crate::{model::FieldKind, value::{Value, coerce_literal}};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::{cmp::Ordering, str::FromStr};
use ulid::Ulid;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal literal")
}

// ---- construction ------------------------------------------------------

#[test]
fn integer_widths_collapse_by_signedness() {
    assert_eq!(Value::from(-3i8), Value::Int(-3));
    assert_eq!(Value::from(-3i16), Value::Int(-3));
    assert_eq!(Value::from(-3i32), Value::Int(-3));
    assert_eq!(Value::from(7u8), Value::Uint(7));
    assert_eq!(Value::from(7u16), Value::Uint(7));
    assert_eq!(Value::from(7u32), Value::Uint(7));
    assert_eq!(Value::from(u64::MAX), Value::Uint(u64::MAX));
}

#[test]
fn option_none_is_null() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some("x")), v_txt("x"));
}

#[test]
fn from_list_converts_items() {
    assert_eq!(
        Value::from_list([1u32, 2]),
        Value::List(vec![Value::Uint(1), Value::Uint(2)])
    );
}

// ---- comparison --------------------------------------------------------

#[test]
fn strict_eq_requires_same_variant() {
    assert!(Value::Int(1).strict_eq(&Value::Int(1)));
    assert!(!Value::Int(1).strict_eq(&Value::Uint(1)));
    assert!(!Value::Float64(1.0).strict_eq(&Value::Int(1)));
}

#[test]
fn canonical_cmp_sorts_null_first() {
    let mut values = vec![v_txt("b"), Value::Null, v_txt("a")];
    values.sort_by(Value::canonical_cmp);

    assert_eq!(values, vec![Value::Null, v_txt("a"), v_txt("b")]);
}

#[test]
fn canonical_cmp_is_total_for_nan() {
    let nan = Value::Float64(f64::NAN);
    assert_eq!(Value::canonical_cmp(&nan, &nan), Ordering::Equal);
    assert_eq!(
        Value::canonical_cmp(&Value::Float64(1.0), &nan),
        Ordering::Less
    );
}

#[test]
fn canonical_cmp_lists_are_lexicographic() {
    let short = Value::from_list([1i64]);
    let long = Value::from_list([1i64, 0]);
    let bigger = Value::from_list([2i64]);

    assert_eq!(Value::canonical_cmp(&short, &long), Ordering::Less);
    assert_eq!(Value::canonical_cmp(&long, &bigger), Ordering::Less);
}

// ---- display -----------------------------------------------------------

#[test]
fn display_quotes_text_and_lists() {
    assert_eq!(v_txt("O'Brien").to_string(), "'O''Brien'");
    assert_eq!(Value::from_list([1i64, 2]).to_string(), "(1, 2)");
    assert_eq!(Value::Null.to_string(), "null");
}

// ---- coercion ----------------------------------------------------------

#[test]
fn coerce_same_kind_is_identity() {
    assert_eq!(
        coerce_literal(&v_txt("x"), &FieldKind::Text),
        Some(v_txt("x"))
    );
    assert_eq!(
        coerce_literal(&Value::Null, &FieldKind::Uint),
        Some(Value::Null)
    );
}

#[test]
fn coerce_integers_across_signedness() {
    assert_eq!(
        coerce_literal(&Value::Int(5), &FieldKind::Uint),
        Some(Value::Uint(5))
    );
    assert_eq!(coerce_literal(&Value::Int(-5), &FieldKind::Uint), None);
    assert_eq!(coerce_literal(&Value::Uint(u64::MAX), &FieldKind::Int), None);
}

#[test]
fn coerce_numbers_to_floats_and_decimals() {
    assert_eq!(
        coerce_literal(&Value::Int(2), &FieldKind::Float64),
        Some(Value::Float64(2.0))
    );
    assert_eq!(
        coerce_literal(&Value::Float64(0.1), &FieldKind::Float32),
        Some(Value::Float32(0.1))
    );
    assert_eq!(
        coerce_literal(&Value::Int(12), &FieldKind::Decimal),
        Some(Value::Decimal(Decimal::from(12)))
    );
    assert_eq!(
        coerce_literal(&v_txt("19.99"), &FieldKind::Decimal),
        Some(Value::Decimal(dec("19.99")))
    );
}

#[test]
fn coerce_integers_to_floats_only_when_exact() {
    // both maxima round up to a power of two that does not fit back
    assert_eq!(coerce_literal(&Value::Int(i64::MAX), &FieldKind::Float64), None);
    assert_eq!(coerce_literal(&Value::Uint(u64::MAX), &FieldKind::Float64), None);
    assert_eq!(coerce_literal(&Value::Int(i64::MAX), &FieldKind::Float32), None);
    assert_eq!(coerce_literal(&Value::Uint(u64::MAX), &FieldKind::Float32), None);
    assert_eq!(coerce_literal(&Value::Int((1 << 53) + 1), &FieldKind::Float64), None);

    // powers of two at the bounds are exact
    assert_eq!(
        coerce_literal(&Value::Int(i64::MIN), &FieldKind::Float64),
        Some(Value::Float64(-(2f64.powi(63))))
    );
    assert_eq!(
        coerce_literal(&Value::Int(i64::MIN), &FieldKind::Float32),
        Some(Value::Float32(-(2f32.powi(63))))
    );
    assert_eq!(
        coerce_literal(&Value::Uint(1 << 63), &FieldKind::Float64),
        Some(Value::Float64(2f64.powi(63)))
    );
}

#[test]
fn coerce_text_to_temporal_and_ids() {
    assert_eq!(
        coerce_literal(&v_txt("2024-02-29"), &FieldKind::Date),
        NaiveDate::from_ymd_opt(2024, 2, 29).map(Value::Date)
    );
    assert_eq!(coerce_literal(&v_txt("2024-02-30"), &FieldKind::Date), None);

    let id = Ulid::from_parts(1_700_000_000_000, 42);
    assert_eq!(
        coerce_literal(&v_txt(&id.to_string()), &FieldKind::Ulid),
        Some(Value::Ulid(id))
    );
}

#[test]
fn coerce_single_char_text_only() {
    assert_eq!(
        coerce_literal(&v_txt("x"), &FieldKind::Char),
        Some(Value::Char('x'))
    );
    assert_eq!(coerce_literal(&v_txt("xy"), &FieldKind::Char), None);
    assert_eq!(coerce_literal(&v_txt(""), &FieldKind::Char), None);
}

#[test]
fn coerce_rejects_unrelated_kinds() {
    assert_eq!(coerce_literal(&Value::Bool(true), &FieldKind::Int), None);
    assert_eq!(coerce_literal(&v_txt("1"), &FieldKind::Int), None);
    assert_eq!(
        coerce_literal(&Value::Int(1), &FieldKind::List(Box::new(FieldKind::Int))),
        None
    );
}
