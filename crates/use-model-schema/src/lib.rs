//! Declarative validation for plain JSON model data.
//!
//! A [`Schema`] describes the expected shape of a value; [`compile`] turns
//! it into a reusable [`CompiledSchema`] whose
//! [`validate`](CompiledSchema::validate) runs synchronously and reports an
//! ordered list of field-level errors. Compilation is the expensive step
//! (rule-grammar checks, regex compilation); callers hold on to the
//! compiled validator for the lifetime of the schema.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use use_model_schema::{compile, SchemaBuilder, StrSchema};
//!
//! let b = SchemaBuilder::new();
//! let schema = b.obj(vec![b.key(
//!     "name",
//!     b.str_of(StrSchema { min_length: Some(5), ..Default::default() }),
//! )]);
//!
//! let validator = compile(&schema).unwrap();
//! let errors = validator.validate(&json!({"name": "Jo"}));
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].field, "name");
//! ```

mod schema;
pub use schema::{ArrSchema, FieldSchema, NumSchema, ObjSchema, Schema, StrSchema};

mod builder;
pub use builder::SchemaBuilder;

mod compile;
pub use compile::{compile, CompileError, CompiledSchema};

mod validate;
pub use validate::{ErrorCode, FieldError};
