//! primehash: an open-addressing hash table and hash set with prime
//! capacities, double-hash probing, tombstone deletion, and load-driven
//! resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: lookups, inserts, and deletes stay correct under collisions, key
//!   reuse, and growth/shrinkage, with amortized O(1) cost and without ever
//!   losing or duplicating an entry.
//! - Layers:
//!   - `capacity` / `probe`: sizing (next prime ≥ base) and the double-hash
//!     probe sequence. A prime capacity makes every step coprime to it, so
//!     `capacity` attempts visit every slot exactly once.
//!   - `SlotStore<K, V>`: flat array of `Empty | Tombstone | Occupied`
//!     slots plus occupancy counters; rebuilds move entries into a fresh
//!     store and replace the old one wholesale.
//!   - `RawTable<K, V, S>`: hashing, load policy, and a debug-only
//!     reentrancy guard. Shared by both public types.
//!   - `HashTable<K, V, S>` / `HashSet<K, S>`: public API. The set is the
//!     same core with `V = ()`.
//!
//! Probing rules
//! - Every walk starts at attempt 0 and stops at the first Empty slot.
//! - Tombstones are skipped, never treated as terminators, so a key stays
//!   reachable after anything earlier in its chain is deleted.
//! - Inserts scan the whole chain for a matching key first and only then
//!   claim the first Empty slot. Tombstones are not reused; they disappear
//!   on the next rebuild.
//!
//! Resize policy
//! - Before an insert: if `count * 100 / capacity` is above the grow
//!   threshold (70 by default) the table rebuilds at twice its base
//!   capacity. Otherwise, if live entries plus tombstones are above it, the
//!   table rebuilds at the same base to purge tombstones. Either way an
//!   Empty slot is guaranteed before probing starts.
//! - Before a delete: if the load is below the shrink threshold (10 by
//!   default) the table rebuilds at half its base capacity.
//! - A base capacity of 0 means the default (50). Rebuilds never produce a
//!   store too small to hold the live entries plus one Empty slot.
//! - Rebuilds place entries by their stored hash; `K: Hash`/`K: Eq` are not
//!   called and no nested resize can occur.
//!
//! Ownership
//! - The table owns every key and value. Displaced values (overwrite,
//!   delete, teardown) are either dropped by the table or handed back to
//!   the caller, chosen per call with `Ownership`.
//!
//! Reentrancy
//! - Core entry points hold a debug-only guard while user code (`K: Hash`,
//!   `K: Eq`) runs during probing. Re-entering the same table from there
//!   panics in debug builds.
//!
//! Notes and non-goals
//! - Not internally synchronized: tables are `Send` but `!Sync`; share one
//!   behind a lock.
//! - Iteration order is unspecified and changes across resizes.
//! - No persistence.

mod capacity;
mod config;
mod error;
mod hash_set;
mod hash_table;
mod probe;
mod raw_table;
mod raw_table_proptest;
mod reentrancy;
mod slot_store;

// Public surface
pub use capacity::{capacity_for, is_prime, next_prime, DEFAULT_BASE_CAPACITY};
pub use config::Config;
pub use error::Error;
pub use hash_set::HashSet;
pub use hash_table::{HashTable, Ownership, Removal};
pub use probe::{probe, ProbeSeq};

pub mod iter {
    //! Iterator types returned by `HashTable` and `HashSet`.
    pub use crate::hash_set::{IntoIter as SetIntoIter, Iter as SetIter};
    pub use crate::slot_store::{IntoIter, Iter, IterMut};
}
