//! Schema compilation — rule-grammar checks and regex pre-compilation.

use std::collections::HashSet;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::schema::Schema;
use crate::validate::{validate_node, FieldError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("empty numeric range: min {min} is greater than max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error("empty length range: {min} is greater than {max}")]
    EmptyLengthRange { min: usize, max: usize },
    #[error("duplicate field {key:?}")]
    DuplicateField { key: String },
}

/// Reusable executable validator produced by [`compile`].
///
/// Validation is a plain synchronous method, so asynchronous rule
/// evaluation is unrepresentable by construction.
#[derive(Debug)]
pub struct CompiledSchema {
    root: CompiledNode,
}

#[derive(Debug)]
pub(crate) enum CompiledNode {
    Any,
    Bool,
    Num {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    Str {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
    },
    Obj {
        fields: Vec<CompiledField>,
        strict: bool,
    },
    Arr {
        item: Box<CompiledNode>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
}

#[derive(Debug)]
pub(crate) struct CompiledField {
    pub(crate) key: String,
    pub(crate) node: CompiledNode,
    pub(crate) optional: bool,
}

/// Compiles a schema into a reusable validator.
///
/// Malformed rule sets fail here, never in
/// [`validate`](CompiledSchema::validate).
pub fn compile(schema: &Schema) -> Result<CompiledSchema, CompileError> {
    Ok(CompiledSchema {
        root: compile_node(schema)?,
    })
}

fn compile_node(schema: &Schema) -> Result<CompiledNode, CompileError> {
    match schema {
        Schema::Any => Ok(CompiledNode::Any),
        Schema::Bool => Ok(CompiledNode::Bool),
        Schema::Num(s) => {
            if let (Some(min), Some(max)) = (s.min, s.max) {
                if min > max {
                    return Err(CompileError::EmptyRange { min, max });
                }
            }
            Ok(CompiledNode::Num {
                min: s.min,
                max: s.max,
                integer: s.integer,
            })
        }
        Schema::Str(s) => {
            if let (Some(min), Some(max)) = (s.min_length, s.max_length) {
                if min > max {
                    return Err(CompileError::EmptyLengthRange { min, max });
                }
            }
            let pattern = match &s.pattern {
                None => None,
                Some(source) => Some(Regex::new(source).map_err(|e| CompileError::BadPattern {
                    pattern: source.clone(),
                    source: Box::new(e),
                })?),
            };
            Ok(CompiledNode::Str {
                min_length: s.min_length,
                max_length: s.max_length,
                pattern,
            })
        }
        Schema::Obj(s) => {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut fields = Vec::with_capacity(s.fields.len());
            for field in &s.fields {
                if !seen.insert(&field.key) {
                    return Err(CompileError::DuplicateField {
                        key: field.key.clone(),
                    });
                }
                fields.push(CompiledField {
                    key: field.key.clone(),
                    node: compile_node(&field.schema)?,
                    optional: field.optional,
                });
            }
            Ok(CompiledNode::Obj {
                fields,
                strict: s.strict,
            })
        }
        Schema::Arr(s) => {
            if let (Some(min), Some(max)) = (s.min_items, s.max_items) {
                if min > max {
                    return Err(CompileError::EmptyLengthRange { min, max });
                }
            }
            Ok(CompiledNode::Arr {
                item: Box::new(compile_node(&s.item)?),
                min_items: s.min_items,
                max_items: s.max_items,
            })
        }
    }
}

impl CompiledSchema {
    /// Validates a value, returning the ordered list of field errors.
    ///
    /// An empty list means the value conforms. Errors appear in schema
    /// declaration order (object fields first, then undeclared-key checks,
    /// array elements by index). Never cached: each call walks the value.
    pub fn validate(&self, data: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate_node(&self.root, data, "", &mut errors);
        errors
    }
}
