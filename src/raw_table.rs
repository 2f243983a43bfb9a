//! RawTable: the core shared by `HashTable` and `HashSet`.
//!
//! Owns the slot store and the hasher, applies the load policy before
//! mutations, and guards every entry point against reentrancy. Keys are
//! hashed once per call; the slot store keeps each entry's hash so rebuilds
//! never call back into `K: Hash`.

use crate::config::Config;
use crate::error::Error;
use crate::reentrancy::ReentrancyCheck;
use crate::slot_store::{Bucket, IntoIter, Iter, IterMut, Locate, SlotStore};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

pub(crate) struct RawTable<K, V, S> {
    store: SlotStore<K, V>,
    hasher: S,
    grow_above: usize,
    shrink_below: usize,
    reentrancy: ReentrancyCheck,
}

impl<K, V, S> RawTable<K, V, S> {
    /// `config` must already be validated.
    pub(crate) fn with_config_and_hasher(config: Config, hasher: S) -> Self {
        debug_assert!(config.validate().is_ok());
        Self {
            store: SlotStore::new(config.base_capacity),
            hasher,
            grow_above: config.grow_above,
            shrink_below: config.shrink_below,
            reentrancy: ReentrancyCheck::new(),
        }
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn len(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub(crate) fn base_capacity(&self) -> usize {
        self.store.base_capacity()
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.store.tombstones()
    }

    pub(crate) fn load(&self) -> usize {
        self.store.load()
    }

    /// Rebuild at `base_capacity`. Negative bases, and bases too large for
    /// the slot array to be allocated, are rejected and leave the table
    /// untouched.
    pub(crate) fn try_resize(&mut self, base_capacity: isize) -> Result<(), Error> {
        let _g = self.reentrancy.enter();
        let base = usize::try_from(base_capacity)
            .ok()
            .filter(|&base| base <= SlotStore::<K, V>::max_capacity())
            .ok_or(Error::InvalidCapacity(base_capacity))?;
        self.store.rebuild(base);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.store.clear();
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.store.iter_mut()
    }

    pub(crate) fn into_entries(self) -> IntoIter<K, V> {
        self.store.into_entries()
    }
}

/// Grow when occupied load is above the threshold; otherwise purge
/// tombstones when they would eat the last Empty slots. Tiny capacities also
/// rebuild when one more entry would leave no Empty slot.
fn reserve_one<K, V>(store: &mut SlotStore<K, V>, grow_above: usize) {
    let cap = store.capacity();
    if store.load() > grow_above || store.len() + 1 >= cap {
        store.rebuild(store.base_capacity().saturating_mul(2));
    } else if store.used_load() > grow_above || store.len() + store.tombstones() + 1 >= cap {
        store.rebuild(store.base_capacity());
    }
}

fn shrink_if_sparse<K, V>(store: &mut SlotStore<K, V>, shrink_below: usize) {
    if store.load() < shrink_below {
        store.rebuild(store.base_capacity() / 2);
    }
}

impl<K, V, S> RawTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn index_of<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hasher.hash_one(q);
        self.store.find(hash, |k| k.borrow() == q)
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let idx = self.index_of(q)?;
        self.store.bucket(idx).map(|b| (&b.key, &b.value))
    }

    pub(crate) fn find_mut<Q>(&mut self, q: &Q) -> Option<(&K, &mut V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = {
            let _g = self.reentrancy.enter();
            self.index_of(q)?
        };
        self.store.bucket_mut(idx).map(|b| (&b.key, &mut b.value))
    }

    pub(crate) fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.index_of(q).is_some()
    }

    /// Insert or overwrite. On a match the stored key and value are both
    /// replaced and the previous pair is returned; `len` is unchanged.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let _g = self.reentrancy.enter();
        reserve_one(&mut self.store, self.grow_above);
        let hash = self.hasher.hash_one(&key);
        let bucket = Bucket { hash, key, value };
        match self.store.locate(hash, |k| *k == bucket.key) {
            Locate::Found(idx) => {
                let old = self.store.replace(idx, bucket);
                Some((old.key, old.value))
            }
            Locate::Vacant(idx) => {
                self.store.occupy(idx, bucket);
                None
            }
        }
    }

    /// Insert only if the key is absent. Returns false and drops the
    /// arguments when the key is already present.
    pub(crate) fn insert_absent(&mut self, key: K, value: V) -> bool {
        let _g = self.reentrancy.enter();
        reserve_one(&mut self.store, self.grow_above);
        let hash = self.hasher.hash_one(&key);
        match self.store.locate(hash, |k| *k == key) {
            Locate::Found(_) => false,
            Locate::Vacant(idx) => {
                self.store.occupy(idx, Bucket { hash, key, value });
                true
            }
        }
    }

    /// Tombstone the entry for `q` and hand it back. The shrink check runs
    /// first, whether or not the key is present.
    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        shrink_if_sparse(&mut self.store, self.shrink_below);
        let hash = self.hasher.hash_one(q);
        let idx = self.store.find(hash, |k| k.borrow() == q)?;
        let old = self.store.vacate(idx);
        Some((old.key, old.value))
    }
}
