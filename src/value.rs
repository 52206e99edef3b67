//! Value: dynamic data for structural comparison.
//!
//! Arrays and objects are shared handles (`Rc<RefCell<..>>`): cloning a
//! `Value` clones the handle, not the contents. That is what lets the
//! same container appear twice in one structure and lets callers build
//! cycles such as `a.foo = b; b.foo = a`.

use core::cell::RefCell;
use core::fmt;
use indexmap::IndexMap;
use std::rc::Rc;
use thiserror::Error;

type ArrayRef = Rc<RefCell<Vec<Value>>>;
type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Debug output stops descending after this many levels.
const DEBUG_DEPTH: usize = 8;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(ArrayRef),
    /// Properties in insertion order.
    Object(ObjectRef),
}

/// Runtime type category of a [`Value`].
///
/// `Null`, arrays and objects all belong to `Object`; structural
/// comparison tells them apart in later steps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Undefined,
    Boolean,
    Number,
    String,
    Object,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("expected an array, found {found}")]
    NotAnArray { found: &'static str },
}

impl Value {
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn object<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Object(Rc::new(RefCell::new(
            props.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn empty_object() -> Self {
        Value::Object(Rc::default())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Null | Value::Array(_) | Value::Object(_) => Kind::Object,
        }
    }

    /// Short name used in error messages; unlike [`Kind`] it separates
    /// null, arrays and objects.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Identity: equal primitives, or the very same array/object
    /// allocation. Never looks inside containers. `NaN` is not the same
    /// as itself.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Element count for arrays, property count for objects.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.borrow().len()),
            Value::Object(o) => Some(o.borrow().len()),
            _ => None,
        }
    }

    /// Clone of the property `key` of an object.
    pub fn property(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Sets `key` on an object through the shared handle, returning the
    /// previous value. New keys go last; existing keys keep their place.
    pub fn set_property(
        &self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, ValueError> {
        match self {
            Value::Object(o) => Ok(o.borrow_mut().insert(key.into(), value)),
            other => Err(ValueError::NotAnObject {
                found: other.type_name(),
            }),
        }
    }

    /// Appends to an array through the shared handle.
    pub fn push(&self, value: Value) -> Result<(), ValueError> {
        match self {
            Value::Array(a) => {
                a.borrow_mut().push(value);
                Ok(())
            }
            other => Err(ValueError::NotAnArray {
                found: other.type_name(),
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::from(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from)),
            Json::Object(props) => Value::object(props.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Limited(self, DEBUG_DEPTH), f)
    }
}

// Depth-limited view so cyclic values still print.
struct Limited<'a>(&'a Value, usize);

impl fmt::Debug for Limited<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Limited(value, budget) = *self;
        match value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(_) | Value::Object(_) if budget == 0 => f.write_str(".."),
            Value::Array(a) => f
                .debug_list()
                .entries(a.borrow().iter().map(|v| Limited(v, budget - 1)))
                .finish(),
            Value::Object(o) => f
                .debug_map()
                .entries(o.borrow().iter().map(|(k, v)| (k, Limited(v, budget - 1))))
                .finish(),
        }
    }
}
