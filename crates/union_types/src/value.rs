use std::borrow::Cow;

use indexmap::IndexMap;

/// Key of an ordered array entry, integer or string keyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

/// A runtime value as seen by the assertion engine.
///
/// The engine never evaluates values; it only classifies them into canonical
/// type tags and renders them for diagnostics. Objects carry their
/// fully-qualified class name, closures classify as their own runtime class
/// (`Closure`), and `Opaque` stands for host-internal payloads the engine
/// cannot label.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Array(IndexMap<ArrayKey, Value>),
    Null,
    Object { class: String },
    Closure,
    Resource { id: u64 },
    Opaque,
}

impl Value {
    /// Build an integer-keyed array from a list of values.
    pub fn list(values: impl IntoIterator<Item = Value>) -> Value {
        let map = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (ArrayKey::Int(i as i64), value))
            .collect();
        Value::Array(map)
    }

    /// Build an object value of the given class.
    pub fn object(class: impl Into<String>) -> Value {
        Value::Object {
            class: class.into(),
        }
    }

    /// The canonical type tag of this value.
    ///
    /// One of `int`, `float`, `string`, `bool`, `array`, `null`, `resource`,
    /// the runtime class name for objects and closures, or the informational
    /// sentinel `Unknown type`. Total: never fails, never allocates for the
    /// canonical tags.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Float(_) => Cow::Borrowed("float"),
            Value::String(_) => Cow::Borrowed("string"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Array(_) => Cow::Borrowed("array"),
            Value::Null => Cow::Borrowed("null"),
            Value::Object { class } => Cow::Owned(class.clone()),
            Value::Closure => Cow::Borrowed("Closure"),
            Value::Resource { .. } => Cow::Borrowed("resource"),
            Value::Opaque => Cow::Borrowed("Unknown type"),
        }
    }

    /// A short diagnostic rendering of this value.
    ///
    /// Strings are single-quoted, arrays render as the literal `Array`
    /// regardless of contents (so messages stay bounded), objects and
    /// closures as `object(<ClassName>)`, resources as `Resource id #<n>`.
    pub fn stringify(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("'{s}'"),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::Null => "null".to_string(),
            Value::Object { class } => format!("object({class})"),
            Value::Closure => "object(Closure)".to_string(),
            Value::Resource { id } => format!("Resource id #{id}"),
            Value::Opaque => "Unknown value type".to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
