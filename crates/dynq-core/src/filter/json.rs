use crate::{
    error::FilterError,
    filter::{FilterNode, FilterValue},
    value::Value,
};
use serde_json::{Map, Value as JsonValue};

impl FilterNode {
    /// Build a filter graph from untyped JSON.
    ///
    /// Objects become nested nodes, arrays become sets, `null` is "no
    /// constraint". Numbers keep their JSON shape (`Int`, `Uint` or
    /// `Float64`); the predicate compiler coerces them to the target kind.
    pub fn from_json(json: &JsonValue) -> Result<Self, FilterError> {
        match json {
            JsonValue::Object(map) => Ok(node_from_map(map)),
            other => Err(FilterError::NotAnObject {
                found: json_label(other),
            }),
        }
    }
}

fn node_from_map(map: &Map<String, JsonValue>) -> FilterNode {
    let mut node = FilterNode::new();
    for (key, value) in map {
        node.insert(key.clone(), json_to_filter_value(value));
    }

    node
}

fn json_to_filter_value(json: &JsonValue) -> FilterValue {
    match json {
        JsonValue::Null => FilterValue::Null,
        JsonValue::Object(map) => FilterValue::Node(node_from_map(map)),
        JsonValue::Array(items) => FilterValue::Set(items.iter().map(json_to_value).collect()),
        scalar => FilterValue::Scalar(json_to_value(scalar)),
    }
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(v) => Value::Bool(*v),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_u64().map(Value::Uint))
            .or_else(|| n.as_f64().map(Value::Float64))
            .unwrap_or(Value::Null),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        JsonValue::Object(map) => Value::Record(map.values().map(json_to_value).collect()),
    }
}

const fn json_label(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
