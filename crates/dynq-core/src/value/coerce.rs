//! Literal coercion toward a declared field kind.
//!
//! Typed filters already carry the right variant; this exists for literals
//! that arrive untyped (JSON numbers, ISO strings) and must be normalized
//! before strict comparison. Coercion never loses information: a literal that
//! cannot be represented exactly in the target kind is rejected.

use crate::{model::FieldKind, value::Value};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use ulid::Ulid;

/// Coerce one literal into the value variant of `kind`.
///
/// `Null` passes through unchanged. Returns `None` when the literal has no
/// exact representation in the target kind.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn coerce_literal(value: &Value, kind: &FieldKind) -> Option<Value> {
    if value.is_null() {
        return Some(Value::Null);
    }

    match (kind, value) {
        (FieldKind::Bool, Value::Bool(_))
        | (FieldKind::Char, Value::Char(_))
        | (FieldKind::Int, Value::Int(_))
        | (FieldKind::Uint, Value::Uint(_))
        | (FieldKind::Float32, Value::Float32(_))
        | (FieldKind::Float64, Value::Float64(_))
        | (FieldKind::Decimal, Value::Decimal(_))
        | (FieldKind::Text, Value::Text(_))
        | (FieldKind::Date, Value::Date(_))
        | (FieldKind::Timestamp, Value::Timestamp(_))
        | (FieldKind::Ulid, Value::Ulid(_)) => Some(value.clone()),

        (FieldKind::Char, Value::Text(text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }

        (FieldKind::Int, Value::Uint(v)) => i64::try_from(*v).ok().map(Value::Int),
        (FieldKind::Uint, Value::Int(v)) => u64::try_from(*v).ok().map(Value::Uint),

        // Accept when the f32 prints as the same literal, so `0.1` still
        // reaches a `f32` field.
        (FieldKind::Float32, Value::Float64(v)) => {
            let narrowed = *v as f32;
            let same_literal = narrowed.to_string().parse::<f64>().ok() == Some(*v);
            (f64::from(narrowed) == *v || same_literal).then_some(Value::Float32(narrowed))
        }
        (FieldKind::Float32, Value::Int(v)) => {
            let f = *v as f32;
            round_trips(i128::from(*v), f64::from(f)).then_some(Value::Float32(f))
        }
        (FieldKind::Float32, Value::Uint(v)) => {
            let f = *v as f32;
            round_trips(i128::from(*v), f64::from(f)).then_some(Value::Float32(f))
        }

        (FieldKind::Float64, Value::Float32(v)) => Some(Value::Float64(f64::from(*v))),
        (FieldKind::Float64, Value::Int(v)) => {
            let f = *v as f64;
            round_trips(i128::from(*v), f).then_some(Value::Float64(f))
        }
        (FieldKind::Float64, Value::Uint(v)) => {
            let f = *v as f64;
            round_trips(i128::from(*v), f).then_some(Value::Float64(f))
        }

        (FieldKind::Decimal, Value::Int(v)) => Some(Value::Decimal(Decimal::from(*v))),
        (FieldKind::Decimal, Value::Uint(v)) => Some(Value::Decimal(Decimal::from(*v))),
        (FieldKind::Decimal, Value::Float64(v)) => {
            Decimal::try_from(*v).ok().map(Value::Decimal)
        }
        (FieldKind::Decimal, Value::Text(text)) => {
            Decimal::from_str_exact(text).ok().map(Value::Decimal)
        }

        (FieldKind::Date, Value::Text(text)) => {
            NaiveDate::from_str(text).ok().map(Value::Date)
        }
        (FieldKind::Timestamp, Value::Text(text)) => {
            NaiveDateTime::from_str(text).ok().map(Value::Timestamp)
        }
        (FieldKind::Ulid, Value::Text(text)) => Ulid::from_string(text).ok().map(Value::Ulid),

        _ => None,
    }
}

// Integer-to-float is exact only when the float converts back to the same
// integer. The check runs in i128 so a float rounded up past i64::MAX or
// u64::MAX cannot saturate back onto the original.
#[allow(clippy::cast_possible_truncation)]
fn round_trips(int: i128, float: f64) -> bool {
    float as i128 == int
}
