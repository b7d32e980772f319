use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("value is not JSON-representable: {0}")]
    NotRepresentable(#[from] serde_json::Error),
}

/// Serialize/deserialize round trip: turns any serializable value into
/// plain JSON data.
///
/// The model's write path stores only the output of this function, never
/// the caller's value, so the snapshot holds no live references to the
/// outside world. Fails only for inputs that have no JSON representation
/// (e.g. maps with non-string keys).
pub fn clone_normalize<T: Serialize>(value: &T) -> Result<Value, NormalizeError> {
    Ok(serde_json::to_value(value)?)
}

/// Creates a deep clone of an already-plain JSON value.
///
/// Recursive clone producing new instances of all nested objects and
/// arrays, preserving property insertion order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use use_model_util::clone_value;
///
/// let original = json!({"foo": [1, 2, 3]});
/// let cloned = clone_value(&original);
///
/// assert_eq!(original, cloned);
/// ```
pub fn clone_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone_value).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::new();
            for (key, val) in obj {
                new_obj.insert(key.clone(), clone_value(val));
            }
            Value::Object(new_obj)
        }
    }
}
