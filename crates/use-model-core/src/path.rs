use serde_json::Value;

/// One step of a path from the model root to a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

pub(crate) fn value_at_path<'a>(value: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut cur = value;
    for step in path {
        cur = match (step, cur) {
            (PathStep::Key(key), Value::Object(map)) => map.get(key)?,
            (PathStep::Index(idx), Value::Array(arr)) => arr.get(*idx)?,
            _ => return None,
        };
    }
    Some(cur)
}

pub(crate) fn get_path_mut<'a>(value: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut cur = value;
    for step in path {
        match (step, cur) {
            (PathStep::Key(key), Value::Object(map)) => {
                cur = map.get_mut(key)?;
            }
            (PathStep::Index(idx), Value::Array(arr)) => {
                cur = arr.get_mut(*idx)?;
            }
            _ => return None,
        }
    }
    Some(cur)
}

/// Renders a path in the dot/bracket form used by validation errors,
/// e.g. `children[2].age`.
pub fn format_field_path(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        match step {
            PathStep::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathStep::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}
