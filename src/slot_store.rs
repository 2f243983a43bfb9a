//! Slot store: the flat slot array plus its occupancy counters.
//!
//! Slots are `Empty` (never used since the last rebuild), `Tombstone`
//! (deleted; probing continues past it) or `Occupied`. Every probe walk stops
//! at the first `Empty` slot, so the store keeps at least one `Empty` slot at
//! all times; callers rebuild before an insert could claim the last one.

use crate::capacity::{capacity_overflow, next_prime, resolve_base};
use crate::probe::ProbeSeq;
use core::mem;

#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(Bucket<K, V>),
}

/// Outcome of walking a probe sequence for an insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Locate {
    /// Matching key at this index.
    Found(usize),
    /// No match before the first Empty slot, which is at this index.
    Vacant(usize),
}

pub(crate) struct SlotStore<K, V> {
    slots: Box<[Slot<K, V>]>,
    base_capacity: usize,
    count: usize,
    tombstones: usize,
}

impl<K, V> SlotStore<K, V> {
    /// Largest slot count whose array fits in `isize::MAX` bytes.
    pub(crate) fn max_capacity() -> usize {
        isize::MAX as usize / mem::size_of::<Slot<K, V>>().max(1)
    }

    /// Empty store sized for `base_capacity` (0 selects the default).
    ///
    /// Panics with "capacity overflow" when the slot array could not be
    /// allocated.
    pub(crate) fn new(base_capacity: usize) -> Self {
        let base_capacity = resolve_base(base_capacity);
        if base_capacity > Self::max_capacity() {
            capacity_overflow();
        }
        let capacity = next_prime(base_capacity);
        if capacity > Self::max_capacity() {
            capacity_overflow();
        }
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            base_capacity,
            count: 0,
            tombstones: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn base_capacity(&self) -> usize {
        self.base_capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Occupied slots as an integer percentage of capacity.
    #[inline]
    pub(crate) fn load(&self) -> usize {
        self.count * 100 / self.capacity()
    }

    /// Non-Empty slots (occupied plus tombstones) as a percentage of capacity.
    #[inline]
    pub(crate) fn used_load(&self) -> usize {
        (self.count + self.tombstones) * 100 / self.capacity()
    }

    /// Index of the Occupied slot whose key satisfies `eq`, skipping
    /// tombstones and stopping at the first Empty slot.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(b) => {
                    if b.hash == hash && eq(&b.key) {
                        return Some(idx);
                    }
                }
            }
        }
        None
    }

    /// Walk the whole chain looking for a match; fall back to the first
    /// Empty slot. Tombstones are never insertion targets.
    pub(crate) fn locate(&self, hash: u64, eq: impl FnMut(&K) -> bool) -> Locate {
        match self.find(hash, eq) {
            Some(idx) => Locate::Found(idx),
            None => Locate::Vacant(self.first_empty(hash)),
        }
    }

    fn first_empty(&self, hash: u64) -> usize {
        ProbeSeq::new(hash, self.capacity())
            .find(|&idx| matches!(self.slots[idx], Slot::Empty))
            .unwrap_or_else(|| unreachable!("slot store has no Empty slot"))
    }

    #[inline]
    pub(crate) fn bucket(&self, idx: usize) -> Option<&Bucket<K, V>> {
        match &self.slots[idx] {
            Slot::Occupied(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn bucket_mut(&mut self, idx: usize) -> Option<&mut Bucket<K, V>> {
        match &mut self.slots[idx] {
            Slot::Occupied(b) => Some(b),
            _ => None,
        }
    }

    /// Fill the Empty slot at `idx`.
    pub(crate) fn occupy(&mut self, idx: usize, bucket: Bucket<K, V>) {
        debug_assert!(matches!(self.slots[idx], Slot::Empty));
        self.slots[idx] = Slot::Occupied(bucket);
        self.count += 1;
    }

    /// Swap the bucket in the Occupied slot at `idx`, returning the old one.
    pub(crate) fn replace(&mut self, idx: usize, bucket: Bucket<K, V>) -> Bucket<K, V> {
        match mem::replace(&mut self.slots[idx], Slot::Occupied(bucket)) {
            Slot::Occupied(old) => old,
            _ => unreachable!("replace on a slot that is not Occupied"),
        }
    }

    /// Turn the Occupied slot at `idx` into a tombstone.
    pub(crate) fn vacate(&mut self, idx: usize) -> Bucket<K, V> {
        match mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(old) => {
                self.count -= 1;
                self.tombstones += 1;
                log::trace!("tombstoned slot {} ({} tombstones)", idx, self.tombstones);
                old
            }
            _ => unreachable!("vacate on a slot that is not Occupied"),
        }
    }

    /// Rebuild at `base_capacity`, moving every Occupied bucket into a fresh
    /// store and dropping all tombstones. Buckets are placed by their stored
    /// hash, so no user code runs. The base is doubled until the entries fit
    /// with room for one more insert and an Empty slot to spare.
    pub(crate) fn rebuild(&mut self, base_capacity: usize) {
        let mut fresh = Self::new(base_capacity);
        while fresh.capacity() <= self.count + 1 {
            let doubled = match fresh.base_capacity.checked_mul(2) {
                Some(doubled) => doubled,
                None => capacity_overflow(),
            };
            fresh = Self::new(doubled);
        }
        log::debug!(
            "rebuild: base {} -> {}, capacity {} -> {}, {} entries, {} tombstones dropped",
            self.base_capacity,
            fresh.base_capacity,
            self.capacity(),
            fresh.capacity(),
            self.count,
            self.tombstones
        );
        let old = mem::replace(&mut self.slots, Vec::new().into_boxed_slice());
        for slot in old.into_vec() {
            if let Slot::Occupied(bucket) = slot {
                let idx = fresh.first_empty(bucket.hash);
                fresh.occupy(idx, bucket);
            }
        }
        *self = fresh;
    }

    /// Reset every slot to Empty at the current capacity.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.count = 0;
        self.tombstones = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.count,
        }
    }

    /// Consume the store, yielding every Occupied bucket's key and value.
    pub(crate) fn into_entries(self) -> IntoIter<K, V> {
        IntoIter {
            remaining: self.count,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// Iterator over the entries of a table, in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(b) = slot {
                self.remaining -= 1;
                return Some((&b.key, &b.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over the entries of a table with mutable values.
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(b) = slot {
                self.remaining -= 1;
                return Some((&b.key, &mut b.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over the entries of a table.
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(b) = slot {
                self.remaining -= 1;
                return Some((b.key, b.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
