use crate::value::Value;

///
/// Canonical Value Rank
///
/// Stable rank used for cross-variant ordering.
/// Rank order is part of deterministic sort behavior.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Char(_) => 2,
        Value::Int(_) => 3,
        Value::Uint(_) => 4,
        Value::Float32(_) => 5,
        Value::Float64(_) => 6,
        Value::Decimal(_) => 7,
        Value::Text(_) => 8,
        Value::Date(_) => 9,
        Value::Timestamp(_) => 10,
        Value::Ulid(_) => 11,
        Value::List(_) => 12,
        Value::Record(_) => 13,
    }
}
