//! Coercions for loosely-typed backend fields. Numeric columns arrive either
//! as JSON numbers or as strings depending on the backend's serializer.

use serde_json::Value;

/// Parses a wire value as a float. Absent or non-numeric input yields NaN,
/// which is propagated rather than defaulted.
pub(crate) fn float_field(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Parses a wire value as a non-negative count, defaulting to 0.
pub(crate) fn count_field(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().map(|v| v as u32).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}
