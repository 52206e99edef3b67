//! EqualityMap: insertion-ordered entries looked up by a key predicate.

use crate::key_equality::KeyEquality;
use crate::reentrancy::DebugReentrancy;
use core::fmt;
use core::mem;
use log::trace;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A map whose key equality is whatever the caller says it is.
///
/// Every operation is a linear scan that asks the predicate
/// `eq_keys(query, stored)` for each stored key in insertion order and
/// stops at the first `true`. That is O(n) predicate calls per
/// operation, so this map is meant for a handful of entries, keyed by
/// things that cannot be hashed consistently with their equality.
///
/// Entries are never removed. Setting a key that matches an existing
/// entry replaces that entry's key and value in place, so positions are
/// those of first insertion.
///
/// ```
/// use equality_map::{deep_equals, EqualityMap, Value};
///
/// let mut map = EqualityMap::new(deep_equals);
/// map.set(Value::object([("i", Value::from(1))]), "first");
/// assert!(map.has(&Value::object([("i", Value::from(1))])));
/// assert_eq!(map.get(&Value::object([("i", Value::from(2))])), None);
/// ```
pub struct EqualityMap<K, V, E> {
    entries: Vec<Entry<K, V>>,
    eq: E,
    reentrancy: DebugReentrancy,
}

impl<K, V, E> EqualityMap<K, V, E>
where
    E: KeyEquality<K>,
{
    pub fn new(eq: E) -> Self {
        Self::with_capacity(0, eq)
    }

    pub fn with_capacity(capacity: usize, eq: E) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            eq,
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Builds a map by calling `set` for each pair in order.
    pub fn from_entries<I>(eq: E, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(eq);
        map.extend(entries);
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn equality(&self) -> &E {
        &self.eq
    }

    // Callers hold the reentrancy guard.
    fn scan(&self, key: &K) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| self.eq.eq_keys(key, &entry.key))
    }

    pub(crate) fn find_index(&self, key: &K) -> Option<usize> {
        let _g = self.reentrancy.enter();
        self.scan(key)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let i = self.find_index(key)?;
        Some(&self.entries[i].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_index(key)?;
        Some(&mut self.entries[i].value)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let i = self.find_index(key)?;
        let entry = &self.entries[i];
        Some((&entry.key, &entry.value))
    }

    /// Stores `value` under `key`. A matching entry is overwritten in place
    /// (key included); otherwise the pair is appended.
    pub fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Like [`set`](Self::set), returning the value that was replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter();
        match self.scan(&key) {
            Some(i) => {
                trace!("equality map: overwriting entry {i}");
                let old = mem::replace(&mut self.entries[i], Entry { key, value });
                Some(old.value)
            }
            None => {
                trace!("equality map: appending entry {}", self.entries.len());
                self.entries.push(Entry { key, value });
                None
            }
        }
    }
}

impl<K, V, E> Default for EqualityMap<K, V, E>
where
    E: KeyEquality<K> + Default,
{
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<K, V, E> Extend<(K, V)> for EqualityMap<K, V, E>
where
    E: KeyEquality<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, E> fmt::Debug for EqualityMap<K, V, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.key, &e.value)))
            .finish()
    }
}
