//! Debug-only reentrancy guard.
//!
//! `EqualityMap` calls into user code (the key predicate) while it scans
//! its entries. A predicate that reaches back into the same map from
//! inside that scan is a usage error; in debug builds it panics here. In
//! release builds the guard compiles to nothing.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map scan tracker. Public entry points open a section with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // !Send + !Sync: the map is single-threaded.
    _nosend: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Open a guarded section. In debug builds, panics if one is already open.
    #[inline]
    pub(crate) fn enter(&self) -> ScanGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: key predicate called back into the map during a scan"
            );
            ScanGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ScanGuard { _z: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by `DebugReentrancy::enter`.
pub(crate) struct ScanGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
