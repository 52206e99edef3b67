//! Structural (deep) equality over [`Value`].
//!
//! Comparison runs in a fixed order: identity, depth guard, kind,
//! primitives, null, arrays, objects. Every level of array or object
//! nesting spends one unit of the depth budget; once the budget is below
//! zero, anything not identical compares unequal. That ceiling is the
//! only thing that stops recursion on cyclic values. There is no visited
//! set, so two structurally identical cycles are still unequal.

use crate::key_equality::KeyEquality;
use crate::value::Value;
use indexmap::IndexMap;
use log::trace;

/// Depth budget used by [`deep_equals`] and `StructuralEq::default()`.
pub const DEFAULT_MAX_DEPTH: i32 = 5;

/// How the property names of two objects are matched.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum KeyOrder {
    /// Same set of names, in any order.
    #[default]
    Ignore,
    /// Same names in the same insertion order.
    Strict,
}

/// Configurable structural equality predicate.
///
/// ```
/// use equality_map::{EqualityMap, KeyOrder, StructuralEq, Value};
///
/// let strict = StructuralEq::default().with_key_order(KeyOrder::Strict);
/// let mut map = EqualityMap::new(strict);
/// map.set(Value::object([("x", Value::from(1))]), "one");
/// assert_eq!(map.get(&Value::object([("x", Value::from(1))])), Some(&"one"));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructuralEq {
    max_depth: i32,
    key_order: KeyOrder,
}

impl Default for StructuralEq {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralEq {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            key_order: KeyOrder::Ignore,
        }
    }

    /// A negative depth makes everything except identical values unequal.
    pub const fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        self.compare(a, b, self.max_depth)
    }

    fn compare(&self, a: &Value, b: &Value, depth: i32) -> bool {
        if a.is_same(b) {
            return true;
        }
        if depth < 0 {
            trace!("structural equality: depth ceiling reached, reporting unequal");
            return false;
        }
        if a.kind() != b.kind() {
            return false;
        }

        match (a, b) {
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Array(xs), Value::Array(ys)) => {
                let (xs, ys) = (xs.borrow(), ys.borrow());
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .zip(ys.iter())
                        .all(|(x, y)| self.compare(x, y, depth - 1))
            }
            (Value::Object(xs), Value::Object(ys)) => {
                let (xs, ys) = (xs.borrow(), ys.borrow());
                self.same_keys(&xs, &ys)
                    && xs.iter().all(|(key, x)| {
                        ys.get(key)
                            .is_some_and(|y| self.compare(x, y, depth - 1))
                    })
            }
            // Arrays never match plain objects; unequal primitives land here too.
            _ => false,
        }
    }

    // Name lists are flat strings, so matching them spends no depth.
    fn same_keys(&self, xs: &IndexMap<String, Value>, ys: &IndexMap<String, Value>) -> bool {
        if xs.len() != ys.len() {
            return false;
        }
        match self.key_order {
            KeyOrder::Ignore => xs.keys().all(|k| ys.contains_key(k)),
            KeyOrder::Strict => xs.keys().eq(ys.keys()),
        }
    }
}

impl KeyEquality<Value> for StructuralEq {
    #[inline]
    fn eq_keys(&self, query: &Value, stored: &Value) -> bool {
        self.equals(query, stored)
    }
}

/// Deep equality with the default depth ceiling and order-insensitive
/// property names. Usable directly as an `EqualityMap` predicate.
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    StructuralEq::new().equals(a, b)
}

/// [`deep_equals`] with an explicit depth ceiling.
pub fn deep_equals_with_depth(a: &Value, b: &Value, max_depth: i32) -> bool {
    StructuralEq::new().with_max_depth(max_depth).equals(a, b)
}
