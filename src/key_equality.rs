//! The predicate seam between `EqualityMap` and its callers.

/// Decides whether a query key and a stored key name the same entry.
///
/// Implementations do not have to be reflexive, symmetric or transitive;
/// the map only ever asks `eq_keys(query, stored)` and takes the first
/// stored key that answers `true`. Typical predicates are equivalence
/// relations, and the map's get-after-set guarantees assume at least
/// reflexivity.
///
/// Any `Fn(&K, &K) -> bool` is a `KeyEquality<K>`, so plain closures and
/// function items such as [`deep_equals`](crate::deep_equals) can be
/// passed directly.
pub trait KeyEquality<K: ?Sized> {
    fn eq_keys(&self, query: &K, stored: &K) -> bool;
}

impl<K, F> KeyEquality<K> for F
where
    K: ?Sized,
    F: ?Sized + Fn(&K, &K) -> bool,
{
    #[inline]
    fn eq_keys(&self, query: &K, stored: &K) -> bool {
        self(query, stored)
    }
}
