/// Declarative rule tree describing the expected shape of a JSON value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Accepts anything.
    Any,
    /// Boolean value.
    Bool,
    /// Numeric value with optional bounds.
    Num(NumSchema),
    /// String value with optional length bounds and pattern.
    Str(StrSchema),
    /// Object with declared fields.
    Obj(ObjSchema),
    /// Array whose elements share one item schema.
    Arr(ArrSchema),
}

#[derive(Debug, Clone, Default)]
pub struct NumSchema {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Reject values with a fractional part.
    pub integer: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StrSchema {
    /// Minimum length in characters.
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Regular expression the whole string must match.
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjSchema {
    /// Declared fields, validated in declaration order.
    pub fields: Vec<FieldSchema>,
    /// Reject keys that are not declared.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub key: String,
    pub schema: Schema,
    /// Absent optional fields produce no error.
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct ArrSchema {
    pub item: Box<Schema>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}
