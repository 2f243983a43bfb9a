//! Capacity sizing: base capacities are rounded up to the next prime.

/// Base capacity selected when a table is created (or rebuilt) with base 0.
pub const DEFAULT_BASE_CAPACITY: usize = 50;

/// Trial division over 6k ± 1 candidates.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime `>= n`. Never returns less than 2.
///
/// # Panics
///
/// Panics with "capacity overflow" if no such prime fits in a `usize`.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = match candidate.checked_add(1) {
            Some(next) => next,
            None => capacity_overflow(),
        };
    }
    candidate
}

#[cold]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

/// Resolve a requested base capacity: 0 means the default.
pub(crate) fn resolve_base(base_capacity: usize) -> usize {
    if base_capacity == 0 {
        DEFAULT_BASE_CAPACITY
    } else {
        base_capacity
    }
}

/// Slot count used for `base_capacity` (after resolving 0 to the default).
pub fn capacity_for(base_capacity: usize) -> usize {
    next_prime(resolve_base(base_capacity))
}
