//! equality-map: a small single-threaded map keyed by a caller-supplied
//! equality predicate, plus structural deep equality to use as one.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: associate values with keys whose notion of "same" is not
//!   `Eq + Hash`: deep structural equality, equality by type, case-folded
//!   strings, and so on.
//! - Pieces:
//!   - EqualityMap<K, V, E>: insertion-ordered `Vec` of entries; every
//!     lookup is a linear scan asking `E: KeyEquality<K>`.
//!   - KeyEquality<K>: the predicate seam; any `Fn(&K, &K) -> bool` is one.
//!   - Value: dynamic data with shared, possibly cyclic, arrays and objects.
//!   - deep_equals / StructuralEq: recursive comparison of `Value`s with
//!     a depth ceiling.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (reentrancy marker on the map, `Rc`
//!   inside `Value`).
//! - O(n) predicate calls per operation; intended for small maps. There is
//!   no hashing, since a caller-defined predicate need not agree with any
//!   hash function.
//! - No duplicates under the predicate: `set` on a matching key overwrites
//!   that entry in place, keeping its position.
//! - Entries are never removed.
//!
//! Absence
//! - `get` returns `Option<&V>`, so a stored value can never be confused
//!   with a missing key. `has` stays available for presence-only queries.
//!
//! Reentrancy policy
//! - The only user code the map runs is the predicate, during a scan. A
//!   predicate that calls back into the same map trips a debug-only guard.
//!   Predicate panics unwind to the caller unchanged and leave the map
//!   untouched.
//!
//! Structural equality and cycles
//! - Each nested array/object level spends one unit of a depth budget
//!   (default 5). Past the budget, anything not identical is unequal, which
//!   is how cyclic values terminate. Identity (same primitive, same
//!   allocation) is checked first, so a value always equals itself.
//! - Property names are compared as sets by default (`KeyOrder::Ignore`);
//!   `KeyOrder::Strict` also requires the same insertion order.
//!
//! Notes and non-goals
//! - No iteration, removal, ordering or persistence API.
//! - Predicates are fixed at construction.

mod equality_map;
#[cfg(test)]
mod equality_map_proptest;
mod key_equality;
mod reentrancy;
mod structural;
mod value;

// Public surface
pub use equality_map::EqualityMap;
pub use key_equality::KeyEquality;
pub use structural::{
    deep_equals, deep_equals_with_depth, KeyOrder, StructuralEq, DEFAULT_MAX_DEPTH,
};
pub use value::{Kind, Value, ValueError};
