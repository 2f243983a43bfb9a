//! HashTable: key → value map over the shared open-addressing core.

use crate::config::Config;
use crate::error::Error;
use crate::raw_table::RawTable;
use crate::slot_store::{IntoIter, Iter, IterMut};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Who releases a value displaced by an overwrite, a delete, or teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The table drops displaced values.
    Table,
    /// Displaced values are handed back to the caller.
    Caller,
}

/// Result of `HashTable::delete_as`.
#[derive(Debug, PartialEq, Eq)]
pub enum Removal<V> {
    /// No entry for the key.
    Missing,
    /// Entry removed; the table dropped its value.
    Released,
    /// Entry removed; its value is returned.
    Returned(V),
}

impl<V> Removal<V> {
    pub fn is_found(&self) -> bool {
        !matches!(self, Removal::Missing)
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Removal::Returned(v) => Some(v),
            _ => None,
        }
    }
}

/// An open-addressing hash map with prime capacities, double-hash probing,
/// tombstone deletion, and load-driven grow/shrink.
///
/// Not internally synchronized: share it across threads behind a lock.
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    raw: RawTable<K, V, S>,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table at the default base capacity (50, i.e. 53 slots).
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Empty table sized for `base_capacity`; 0 selects the default.
    pub fn with_capacity(base_capacity: usize) -> Self {
        Self::with_capacity_and_hasher(base_capacity, DefaultHashBuilder::default())
    }

    pub fn with_config(config: Config) -> Result<Self, Error> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
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

    /// Number of live entries; tombstones are not counted.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Current slot count (always prime).
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// The un-rounded capacity the slot count was derived from.
    pub fn base_capacity(&self) -> usize {
        self.raw.base_capacity()
    }

    pub fn tombstones(&self) -> usize {
        self.raw.tombstones()
    }

    /// Live entries as an integer percentage of capacity.
    pub fn load(&self) -> usize {
        self.raw.load()
    }

    /// Rebuild the slot store at `base_capacity`, keeping every entry.
    /// A negative base is ignored.
    pub fn resize(&mut self, base_capacity: isize) {
        if let Err(e) = self.raw.try_resize(base_capacity) {
            log::warn!("ignoring resize: {}", e);
        }
    }

    pub fn try_resize(&mut self, base_capacity: isize) -> Result<(), Error> {
        self.raw.try_resize(base_capacity)
    }

    /// Drop every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Iterate over entries. Order is unspecified and changes on resize.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.raw.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.raw.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.raw.iter().map(|(_, v)| v)
    }

    /// Consume the table. With `Ownership::Caller` every entry is returned;
    /// with `Ownership::Table` they are all dropped here.
    pub fn teardown(self, ownership: Ownership) -> Vec<(K, V)> {
        match ownership {
            Ownership::Table => Vec::new(),
            Ownership::Caller => self.raw.into_entries().collect(),
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Insert `key → value`, overwriting any existing entry for `key`.
    /// The previous value, if any, is returned to the caller.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_as(key, value, Ownership::Caller)
    }

    /// Insert with an explicit ownership mode for the displaced value.
    pub fn insert_as(&mut self, key: K, value: V, ownership: Ownership) -> Option<V> {
        let (_old_key, old_value) = self.raw.insert(key, value)?;
        match ownership {
            Ownership::Table => None,
            Ownership::Caller => Some(old_value),
        }
    }

    /// Entry for `q`, as its stored key and value.
    pub fn search<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find(q).map(|(_, v)| v)
    }

    /// Like `get`, reporting an absent key as `Error::KeyNotFound`.
    pub fn try_get<Q>(&self, q: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(Error::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find_mut(q).map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.contains(q)
    }

    /// Delete the entry for `q`, dropping its value. Returns whether an
    /// entry was found.
    pub fn delete<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.delete_as(q, Ownership::Table).is_found()
    }

    /// Delete the entry for `q`, returning its value.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.delete_as(q, Ownership::Caller).into_value()
    }

    pub fn delete_as<Q>(&mut self, q: &Q, ownership: Ownership) -> Removal<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match (self.raw.remove(q), ownership) {
            (None, _) => Removal::Missing,
            (Some(_), Ownership::Table) => Removal::Released,
            (Some((_, v)), Ownership::Caller) => Removal::Returned(v),
        }
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_as(k, v, Ownership::Table);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.into_entries()
    }
}
