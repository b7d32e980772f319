use serde_json::Value;

/// Canonical serialization of a JSON value.
///
/// Deterministic and sensitive to property insertion order: two objects
/// holding the same key/value pairs in different insertion order serialize
/// to different strings. Dirty checking depends on exactly this strictness,
/// so every comparison in the workspace goes through this one function.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use use_model_util::canonical_json;
///
/// let a = json!({"x": 1, "y": 2});
/// let b = json!({"y": 2, "x": 1});
///
/// assert_eq!(a, b);
/// assert_ne!(canonical_json(&a), canonical_json(&b));
/// ```
pub fn canonical_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
