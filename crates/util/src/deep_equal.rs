use serde_json::Value;

/// Performs a deep, order-insensitive structural equality check.
///
/// Objects compare as key/value sets, so two objects with identical pairs
/// in different insertion order are equal here while their
/// [`canonical_json`](crate::canonical_json) strings are not. The dirty
/// check deliberately uses the canonical strings, not this function.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use use_model_util::deep_equal;
///
/// let a = json!({"foo": [1, 2, 3]});
/// let b = json!({"foo": [1, 2, 3]});
/// let c = json!({"foo": [1, 2, 4]});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| deep_equal(va, vb)))
        }
        _ => false,
    }
}
