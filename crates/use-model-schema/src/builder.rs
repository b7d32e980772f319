//! Schema builder — fluent construction of [`Schema`] values.

use crate::schema::*;

/// Builder with shorthand constructors for every schema kind.
///
/// ```
/// use use_model_schema::{NumSchema, SchemaBuilder};
///
/// let b = SchemaBuilder::new();
/// let schema = b.obj(vec![
///     b.key("name", b.str()),
///     b.key_opt("age", b.num_of(NumSchema { min: Some(0.0), ..Default::default() })),
/// ]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Shorthand constructors (no options)

    pub fn any(&self) -> Schema {
        Schema::Any
    }

    pub fn bool(&self) -> Schema {
        Schema::Bool
    }

    pub fn num(&self) -> Schema {
        Schema::Num(NumSchema::default())
    }

    pub fn str(&self) -> Schema {
        Schema::Str(StrSchema::default())
    }

    // ------------------------------------------------------------------
    // Constructors with options

    pub fn num_of(&self, options: NumSchema) -> Schema {
        Schema::Num(options)
    }

    pub fn str_of(&self, options: StrSchema) -> Schema {
        Schema::Str(options)
    }

    pub fn obj(&self, fields: Vec<FieldSchema>) -> Schema {
        Schema::Obj(ObjSchema {
            fields,
            strict: false,
        })
    }

    /// Object schema that rejects undeclared keys.
    pub fn obj_strict(&self, fields: Vec<FieldSchema>) -> Schema {
        Schema::Obj(ObjSchema {
            fields,
            strict: true,
        })
    }

    pub fn arr(&self, item: Schema) -> Schema {
        Schema::Arr(ArrSchema {
            item: Box::new(item),
            min_items: None,
            max_items: None,
        })
    }

    pub fn arr_of(&self, options: ArrSchema) -> Schema {
        Schema::Arr(options)
    }

    // ------------------------------------------------------------------
    // Field helpers

    pub fn key(&self, key: impl Into<String>, schema: Schema) -> FieldSchema {
        FieldSchema {
            key: key.into(),
            schema,
            optional: false,
        }
    }

    pub fn key_opt(&self, key: impl Into<String>, schema: Schema) -> FieldSchema {
        FieldSchema {
            key: key.into(),
            schema,
            optional: true,
        }
    }
}
