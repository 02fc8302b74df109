//! Top-level payload shape.

use serde_json::{Map, Value};

/// A parsed payload split by its top-level JSON kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A batch of events.
    Sequence(Vec<Value>),
    /// A single response or request.
    Mapping(Map<String, Value>),
    /// Anything else (null, bool, number, string).
    Scalar(Value),
}

impl Shape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Mapping(map),
            other => Shape::Scalar(other),
        }
    }

    /// Name of the JSON kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sequence(_) => "array",
            Shape::Mapping(_) => "object",
            Shape::Scalar(Value::Null) => "null",
            Shape::Scalar(Value::Bool(_)) => "boolean",
            Shape::Scalar(Value::Number(_)) => "number",
            Shape::Scalar(Value::String(_)) => "string",
            // classify never wraps containers in Scalar
            Shape::Scalar(_) => "value",
        }
    }
}
