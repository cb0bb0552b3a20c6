//! Attribute key/value pairs

use std::fmt;
use std::time::Duration;

/// Key used when a non-string value shows up where a key was expected
pub const BAD_KEY: &str = "!BADKEY";

/// Rendering of [`Value::Missing`]
pub const MISSING_VALUE: &str = "!MISSING";

/// Value half of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Nested attributes, rendered under the enclosing key
    Group(Vec<Attr>),
    /// Placeholder for a key that was given without a value
    Missing,
}

impl Value {
    /// The string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the placeholder for an absent value
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                f.write_str("]")
            }
            Value::Missing => f.write_str(MISSING_VALUE),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(Uint as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Group(v)
    }
}

/// A single key/value pair attached to a record or a logger
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    /// Create an attribute
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a group attribute holding nested attributes
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Pair up an alternating key/value argument list
///
/// A string followed by any value forms one attribute. A string in the last
/// position has no value and is paired with [`Value::Missing`]. Anything
/// other than a string in key position is kept under [`BAD_KEY`].
pub fn args_to_attrs(args: &[Value]) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(args.len().div_ceil(2));
    let mut rest = args;

    while let Some((first, tail)) = rest.split_first() {
        match first {
            Value::String(key) => match tail.split_first() {
                Some((value, tail)) => {
                    attrs.push(Attr::new(key.clone(), value.clone()));
                    rest = tail;
                }
                None => {
                    attrs.push(Attr::new(key.clone(), Value::Missing));
                    rest = tail;
                }
            },
            other => {
                attrs.push(Attr::new(BAD_KEY, other.clone()));
                rest = tail;
            }
        }
    }

    attrs
}
