//! Runtime validation — walks a value against a compiled schema, collecting
//! every field-level failure in document order.

use serde_json::Value;

use crate::compile::{CompiledField, CompiledNode};

/// Machine-readable discriminant of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Bool,
    Num,
    Int,
    NumMin,
    NumMax,
    Str,
    StrMinLen,
    StrMaxLen,
    StrPattern,
    Obj,
    Required,
    UnknownKey,
    Arr,
    ArrMinItems,
    ArrMaxItems,
}

impl ErrorCode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Num => "NUM",
            Self::Int => "INT",
            Self::NumMin => "NUM_MIN",
            Self::NumMax => "NUM_MAX",
            Self::Str => "STR",
            Self::StrMinLen => "STR_MIN_LEN",
            Self::StrMaxLen => "STR_MAX_LEN",
            Self::StrPattern => "STR_PATTERN",
            Self::Obj => "OBJ",
            Self::Required => "REQUIRED",
            Self::UnknownKey => "UNKNOWN_KEY",
            Self::Arr => "ARR",
            Self::ArrMinItems => "ARR_MIN_ITEMS",
            Self::ArrMaxItems => "ARR_MAX_ITEMS",
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dot/bracket path of the offending field, e.g. `children[3].age`.
    /// Empty for the root value.
    pub field: String,
    /// Human-readable description.
    pub message: String,
    pub code: ErrorCode,
}

fn err(errors: &mut Vec<FieldError>, field: &str, code: ErrorCode, message: String) {
    errors.push(FieldError {
        field: field.to_owned(),
        message,
        code,
    });
}

pub(crate) fn validate_node(
    node: &CompiledNode,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    match node {
        CompiledNode::Any => {}
        CompiledNode::Bool => {
            if !value.is_boolean() {
                err(errors, path, ErrorCode::Bool, "expected a boolean".to_owned());
            }
        }
        CompiledNode::Num { min, max, integer } => {
            validate_num(*min, *max, *integer, value, path, errors);
        }
        CompiledNode::Str {
            min_length,
            max_length,
            pattern,
        } => validate_str(*min_length, *max_length, pattern.as_ref(), value, path, errors),
        CompiledNode::Obj { fields, strict } => validate_obj(fields, *strict, value, path, errors),
        CompiledNode::Arr {
            item,
            min_items,
            max_items,
        } => validate_arr(item, *min_items, *max_items, value, path, errors),
    }
}

fn validate_num(
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let Some(num) = value.as_f64() else {
        err(errors, path, ErrorCode::Num, "expected a number".to_owned());
        return;
    };
    if integer && num.fract() != 0.0 {
        err(errors, path, ErrorCode::Int, "expected an integer".to_owned());
    }
    if let Some(min) = min {
        if num < min {
            err(errors, path, ErrorCode::NumMin, format!("must be at least {min}"));
        }
    }
    if let Some(max) = max {
        if num > max {
            err(errors, path, ErrorCode::NumMax, format!("must be at most {max}"));
        }
    }
}

fn validate_str(
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&regex::Regex>,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let Some(s) = value.as_str() else {
        err(errors, path, ErrorCode::Str, "expected a string".to_owned());
        return;
    };
    let len = s.chars().count();
    if let Some(min) = min_length {
        if len < min {
            err(
                errors,
                path,
                ErrorCode::StrMinLen,
                format!("must be at least {min} characters long"),
            );
        }
    }
    if let Some(max) = max_length {
        if len > max {
            err(
                errors,
                path,
                ErrorCode::StrMaxLen,
                format!("must be at most {max} characters long"),
            );
        }
    }
    if let Some(pattern) = pattern {
        if !pattern.is_match(s) {
            err(
                errors,
                path,
                ErrorCode::StrPattern,
                format!("must match pattern {:?}", pattern.as_str()),
            );
        }
    }
}

fn validate_obj(
    fields: &[CompiledField],
    strict: bool,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let Some(map) = value.as_object() else {
        err(errors, path, ErrorCode::Obj, "expected an object".to_owned());
        return;
    };
    for field in fields {
        let child_path = join_key(path, &field.key);
        match map.get(&field.key) {
            None if field.optional => {}
            None => err(
                errors,
                &child_path,
                ErrorCode::Required,
                "required field is missing".to_owned(),
            ),
            Some(child) => validate_node(&field.node, child, &child_path, errors),
        }
    }
    if strict {
        for key in map.keys() {
            if !fields.iter().any(|f| f.key == *key) {
                err(
                    errors,
                    &join_key(path, key),
                    ErrorCode::UnknownKey,
                    "unknown field".to_owned(),
                );
            }
        }
    }
}

fn validate_arr(
    item: &CompiledNode,
    min_items: Option<usize>,
    max_items: Option<usize>,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let Some(arr) = value.as_array() else {
        err(errors, path, ErrorCode::Arr, "expected an array".to_owned());
        return;
    };
    if let Some(min) = min_items {
        if arr.len() < min {
            err(
                errors,
                path,
                ErrorCode::ArrMinItems,
                format!("must have at least {min} items"),
            );
        }
    }
    if let Some(max) = max_items {
        if arr.len() > max {
            err(
                errors,
                path,
                ErrorCode::ArrMaxItems,
                format!("must have at most {max} items"),
            );
        }
    }
    for (index, element) in arr.iter().enumerate() {
        validate_node(item, element, &format!("{path}[{index}]"), errors);
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, ArrSchema, NumSchema, SchemaBuilder, StrSchema};
    use serde_json::json;

    fn person_schema() -> crate::CompiledSchema {
        let b = SchemaBuilder::new();
        compile(&b.obj(vec![
            b.key(
                "name",
                b.str_of(StrSchema {
                    min_length: Some(5),
                    ..Default::default()
                }),
            ),
            b.key(
                "children",
                b.arr(b.obj(vec![b.key(
                    "age",
                    b.num_of(NumSchema {
                        min: Some(0.0),
                        integer: true,
                        ..Default::default()
                    }),
                )])),
            ),
        ]))
        .unwrap()
    }

    #[test]
    fn conforming_value_has_no_errors() {
        let validator = person_schema();
        let data = json!({"name": "Jochen", "children": [{"age": 3}]});
        assert!(validator.validate(&data).is_empty());
    }

    #[test]
    fn errors_come_in_schema_walk_order() {
        let validator = person_schema();
        let data = json!({"name": "Jo", "children": [{"age": -1}, {"age": -2}]});
        let errors = validator.validate(&data);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "children[0].age", "children[1].age"]);
    }

    #[test]
    fn min_length_message_names_the_bound() {
        let validator = person_schema();
        let errors = validator.validate(&json!({"name": "Jo", "children": []}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::StrMinLen);
        assert!(errors[0].message.contains("at least 5 characters"));
    }

    #[test]
    fn missing_required_field_is_reported_at_its_path() {
        let validator = person_schema();
        let errors = validator.validate(&json!({"name": "Jochen"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "children");
        assert_eq!(errors[0].code, ErrorCode::Required);
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let b = SchemaBuilder::new();
        let validator = compile(&b.obj(vec![b.key_opt("nick", b.str())])).unwrap();
        assert!(validator.validate(&json!({})).is_empty());
        assert_eq!(validator.validate(&json!({"nick": 7})).len(), 1);
    }

    #[test]
    fn strict_objects_reject_unknown_keys() {
        let b = SchemaBuilder::new();
        let validator = compile(&b.obj_strict(vec![b.key("name", b.str())])).unwrap();
        let errors = validator.validate(&json!({"name": "Jochen", "extra": 1}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "extra");
        assert_eq!(errors[0].code, ErrorCode::UnknownKey);
    }

    #[test]
    fn integer_rule_rejects_fractions() {
        let b = SchemaBuilder::new();
        let validator = compile(&b.num_of(NumSchema {
            integer: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(validator.validate(&json!(1.5))[0].code, ErrorCode::Int);
        assert!(validator.validate(&json!(2)).is_empty());
    }

    #[test]
    fn pattern_rule_matches_whole_input() {
        let b = SchemaBuilder::new();
        let validator = compile(&b.str_of(StrSchema {
            pattern: Some("^[a-z]+$".to_owned()),
            ..Default::default()
        }))
        .unwrap();
        assert!(validator.validate(&json!("abc")).is_empty());
        assert_eq!(validator.validate(&json!("a1"))[0].code, ErrorCode::StrPattern);
    }

    #[test]
    fn array_bounds_are_checked_before_elements() {
        let b = SchemaBuilder::new();
        let validator = compile(&b.arr_of(ArrSchema {
            item: Box::new(b.num()),
            min_items: Some(2),
            max_items: None,
        }))
        .unwrap();
        let errors = validator.validate(&json!(["x"]));
        assert_eq!(errors[0].code, ErrorCode::ArrMinItems);
        assert_eq!(errors[1].field, "[0]");
        assert_eq!(errors[1].code, ErrorCode::Num);
    }

    #[test]
    fn root_errors_use_the_empty_path() {
        let validator = person_schema();
        let errors = validator.validate(&json!(42));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "");
        assert_eq!(errors[0].code, ErrorCode::Obj);
    }

    #[test]
    fn error_codes_have_stable_names() {
        assert_eq!(ErrorCode::StrMinLen.name(), "STR_MIN_LEN");
        assert_eq!(ErrorCode::UnknownKey.name(), "UNKNOWN_KEY");
    }
}
