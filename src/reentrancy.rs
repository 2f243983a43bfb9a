//! Nested-entry check for `RawTable`.
//!
//! Probing runs `K: Hash` and `K: Eq`. If either reaches back into the table
//! it is probing, it sees a slot store in the middle of an update. Debug
//! builds count active entries and panic on the second one; release builds
//! keep only the `!Sync` marker.

use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug, Default)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Keeps RawTable !Sync in every build; Send is unaffected.
    _unsync: PhantomData<Cell<()>>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _unsync: PhantomData,
        }
    }

    /// Marks the table as entered until the returned value is dropped.
    #[inline]
    pub(crate) fn enter(&self) -> Entered<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: nested entry into hash table"
            );
        }
        Entered { check: self }
    }
}

/// Held for the duration of one table operation.
pub(crate) struct Entered<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    check: &'a ReentrancyCheck,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.check.active.set(false);
    }
}
