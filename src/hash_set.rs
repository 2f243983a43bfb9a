//! HashSet: key membership over the same core as `HashTable`, with no value
//! payload. Duplicate inserts are no-ops rather than overwrites.

use crate::config::Config;
use crate::error::Error;
use crate::raw_table::RawTable;
use crate::slot_store;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub struct HashSet<K, S = DefaultHashBuilder> {
    raw: RawTable<K, (), S>,
}

impl<K> HashSet<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(base_capacity: usize) -> Self {
        Self::with_capacity_and_hasher(base_capacity, DefaultHashBuilder::default())
    }

    pub fn with_config(config: Config) -> Result<Self, Error> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K> Default for HashSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> HashSet<K, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(base_capacity: usize, hasher: S) -> Self {
        Self {
            raw: RawTable::with_config_and_hasher(
                Config::new().base_capacity(base_capacity),
                hasher,
            ),
        }
    }

    pub fn with_config_and_hasher(config: Config, hasher: S) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            raw: RawTable::with_config_and_hasher(config, hasher),
        })
    }

    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn base_capacity(&self) -> usize {
        self.raw.base_capacity()
    }

    pub fn tombstones(&self) -> usize {
        self.raw.tombstones()
    }

    pub fn load(&self) -> usize {
        self.raw.load()
    }

    /// A negative base is ignored.
    pub fn resize(&mut self, base_capacity: isize) {
        if let Err(e) = self.raw.try_resize(base_capacity) {
            log::warn!("ignoring resize: {}", e);
        }
    }

    pub fn try_resize(&mut self, base_capacity: isize) -> Result<(), Error> {
        self.raw.try_resize(base_capacity)
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.raw.iter(),
        }
    }
}

impl<K, S> HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Add `key`. Returns false (and drops `key`) if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert_absent(key, ())
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.contains(q)
    }

    /// The stored key equal to `q`.
    pub fn get<Q>(&self, q: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find(q).map(|(k, _)| k)
    }

    /// Remove `q`. Returns whether it was present.
    pub fn delete<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(q).is_some()
    }

    /// Remove `q`, returning the stored key.
    pub fn take<Q>(&mut self, q: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(q).map(|(k, ())| k)
    }
}

/// Iterator over the keys of a `HashSet`.
pub struct Iter<'a, K> {
    inner: slot_store::Iter<'a, K, ()>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

/// Owning iterator over the keys of a `HashSet`.
pub struct IntoIter<K> {
    inner: slot_store::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<'a, K, S> IntoIterator for &'a HashSet<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S> IntoIterator for HashSet<K, S> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.raw.into_entries(),
        }
    }
}

impl<K, S> fmt::Debug for HashSet<K, S>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S> Extend<K> for HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K, S> FromIterator<K> for HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}
