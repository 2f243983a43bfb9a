//! Probe sequence: double hashing over a prime-sized slot array.
//!
//! `index(attempt) = (h1 + attempt * step) mod capacity` where `h1` comes
//! from the low half of the key hash and `step` from the high half, folded
//! into `1..capacity`. With a prime capacity every step is coprime to it, so
//! attempts `0..capacity` visit each slot exactly once.

#[inline]
fn start(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

#[inline]
fn step(hash: u64, capacity: usize) -> usize {
    if capacity < 2 {
        return 1;
    }
    1 + ((hash >> 32) % (capacity as u64 - 1)) as usize
}

/// Slot index for `attempt` of the probe sequence of `hash`.
///
/// # Panics
///
/// Panics if `capacity` is 0.
#[inline]
pub fn probe(hash: u64, capacity: usize, attempt: usize) -> usize {
    assert!(capacity > 0, "probe over an empty slot array");
    let offset = (attempt as u128 * step(hash, capacity) as u128) % capacity as u128;
    (start(hash, capacity) + offset as usize) % capacity
}

/// Iterator over the first `capacity` indices of a probe sequence.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    pos: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// A `capacity` of 0 yields an empty sequence.
    pub fn new(hash: u64, capacity: usize) -> Self {
        if capacity == 0 {
            return Self {
                pos: 0,
                step: 1,
                capacity: 0,
                remaining: 0,
            };
        }
        Self {
            pos: start(hash, capacity),
            step: step(hash, capacity),
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.pos;
        // pos and step are both < capacity, so the sum cannot overflow in practice.
        self.pos = (self.pos + self.step) % self.capacity;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
