// HashTable unit test suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Round-trip: insert(k, v) then get(k) == v.
// - Overwrite: re-inserting a key keeps len and returns/drops the old value.
// - Deletion: delete succeeds once, decrements len by one, then misses.
// - Tombstones: deleting a key never hides keys that collided through it.
// - Resize: crossing the grow/shrink thresholds keeps every entry.
// - Ownership: each value is released exactly once, by the table or the
//   caller, never both.
use primehash::{Config, Error, HashTable, Ownership, Removal};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::hash::{BuildHasher, Hasher};
use std::rc::Rc;

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0 // every key shares one probe sequence
    }
}

// Counts drops so tests can check values are released exactly once.
struct DropCounter<'a>(&'a Cell<usize>);
impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

// Test: round-trip and overwrite.
// Verifies: get returns the latest value; len counts distinct keys only.
#[test]
fn insert_get_overwrite() {
    let mut t = HashTable::new();
    assert_eq!(t.insert("k1".to_string(), 1), None);
    assert_eq!(t.get("k1"), Some(&1));
    assert_eq!(t.insert("k1".to_string(), 2), Some(1));
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("k1"), Some(&2));
    assert_eq!(t.search("k1"), Some((&"k1".to_string(), &2)));
}

// Test: deletion correctness.
// Verifies: first delete succeeds and decrements len; the key then misses;
// deleting an absent key reports false and leaves len alone.
#[test]
fn delete_once_then_miss() {
    let mut t = HashTable::new();
    t.insert("a".to_string(), 1);
    t.insert("b".to_string(), 2);
    assert!(t.delete("a"));
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("a"), None);
    assert!(t.search("a").is_none());
    assert!(!t.delete("a"));
    assert_eq!(t.len(), 1);
    assert!(!t.delete("never"));
    assert_eq!(t.len(), 1);
}

// Test: the scenario from the sizing rules.
// Verifies: base 4 → 5 slots; four keys fit; the fifth grows the table and
// all five stay retrievable.
#[test]
fn create_4_grows_on_fifth_key() {
    let mut t = HashTable::with_capacity(4);
    assert_eq!(t.capacity(), 5);
    for i in 0..4 {
        t.insert(format!("key{}", i), i);
    }
    assert_eq!(t.capacity(), 5);
    t.insert("key4".to_string(), 4);
    assert!(t.capacity() > 5);
    assert_eq!(t.base_capacity(), 8);
    for i in 0..5 {
        assert_eq!(t.get(&format!("key{}", i)), Some(&i));
    }
}

// Test: tombstone reachability under a constant hasher.
// Verifies: with k1 and k2 on the same chain, deleting k1 leaves k2 findable;
// later inserts still see k2 and overwrite it rather than duplicating it.
#[test]
fn tombstone_keeps_collision_chain() {
    let mut t = HashTable::with_hasher(ConstBuildHasher);
    t.insert("k1", 1);
    t.insert("k2", 2);
    assert!(t.delete("k1"));
    assert_eq!(t.tombstones(), 1);
    assert_eq!(t.get("k2"), Some(&2));

    t.insert("k3", 3);
    assert_eq!(t.insert("k2", 20), Some(2));
    assert_eq!(t.len(), 2);
    let keys: Vec<_> = t.keys().copied().collect();
    assert_eq!(keys.iter().filter(|k| **k == "k2").count(), 1);
}

// Test: many collisions, then delete every other key.
// Verifies: survivors remain reachable through long runs of tombstones.
#[test]
fn long_collision_chain_with_holes() {
    let mut t = HashTable::with_capacity_and_hasher(200, ConstBuildHasher);
    for i in 0..100u32 {
        t.insert(i, i * 10);
    }
    for i in (0..100u32).step_by(2) {
        assert!(t.delete(&i));
    }
    for i in 0..100u32 {
        let expected = if i % 2 == 1 { Some(i * 10) } else { None };
        assert_eq!(t.get(&i).copied(), expected);
    }
    assert_eq!(t.len(), 50);
}

// Test: growth across many resizes.
// Verifies: all entries survive; len is never changed by a resize.
#[test]
fn growth_preserves_membership() {
    let mut t = HashTable::with_capacity(1);
    let mut last_capacity = t.capacity();
    let mut resizes = 0;
    for i in 0..5_000u32 {
        let before = t.len();
        t.insert(i, i.wrapping_mul(31));
        assert_eq!(t.len(), before + 1);
        if t.capacity() != last_capacity {
            resizes += 1;
            last_capacity = t.capacity();
        }
    }
    assert!(resizes > 5);
    assert!(t.load() <= 71);
    for i in 0..5_000u32 {
        assert_eq!(t.get(&i), Some(&i.wrapping_mul(31)));
    }
}

// Test: shrink on sparse deletes.
// Verifies: deletes below 10% load shrink the base; survivors keep values.
#[test]
fn shrink_preserves_membership() {
    let mut t = HashTable::new();
    for i in 0..1_000u32 {
        t.insert(i, i);
    }
    let grown = t.capacity();
    for i in 0..990u32 {
        assert_eq!(t.remove(&i), Some(i));
    }
    assert!(t.capacity() < grown);
    assert_eq!(t.len(), 10);
    for i in 990..1_000u32 {
        assert_eq!(t.get(&i), Some(&i));
    }
}

// Test: manual resize.
// Verifies: negative base is a no-op (and an error through try_resize);
// explicit bases keep entries and drop tombstones.
#[test]
fn manual_resize() {
    let mut t = HashTable::with_capacity(10);
    for i in 0..5 {
        t.insert(i, i);
    }
    t.delete(&0);
    let cap = t.capacity();
    t.resize(-5);
    assert_eq!(t.capacity(), cap);
    assert_eq!(t.tombstones(), 1);
    assert_eq!(t.try_resize(-5), Err(Error::InvalidCapacity(-5)));

    t.resize(100);
    assert_eq!(t.capacity(), 101);
    assert_eq!(t.tombstones(), 0);
    assert_eq!(t.len(), 4);

    // Shrinking below the live count is clamped so entries still fit.
    t.resize(1);
    assert!(t.capacity() > t.len());
    for i in 1..5 {
        assert_eq!(t.get(&i), Some(&i));
    }
}

// Test: a base capacity with no allocatable prime at or above it.
// Verifies: construction fails loudly instead of wrapping to a tiny table
// whose base and capacity disagree.
#[test]
#[should_panic(expected = "capacity overflow")]
fn with_capacity_usize_max_panics() {
    let _ = HashTable::<u32, u32>::with_capacity(usize::MAX);
}

// Test: resize to a base far past what can be allocated.
// Verifies: resize is a no-op, try_resize reports InvalidCapacity, and the
// table keeps working through later inserts that grow it.
#[test]
fn oversized_resize_is_rejected() {
    let mut t = HashTable::with_capacity(4);
    t.insert(1u32, 1u32);
    t.resize(isize::MAX);
    assert_eq!(t.capacity(), 5);
    assert_eq!(t.try_resize(isize::MAX), Err(Error::InvalidCapacity(isize::MAX)));
    for i in 2..20 {
        t.insert(i, i);
    }
    assert_eq!(t.len(), 19);
    assert_eq!(t.capacity(), primehash::next_prime(t.base_capacity()));
}

// Test: owning mode releases values exactly once across overwrite, delete,
// resize, and teardown.
#[test]
fn owning_mode_releases_each_value_once() {
    let drops = Cell::new(0);
    let mut t = HashTable::with_capacity(2);
    for i in 0..20 {
        t.insert_as(i, DropCounter(&drops), Ownership::Table);
    }
    // Several resizes happened; nothing was released.
    assert_eq!(drops.get(), 0);

    t.insert_as(0, DropCounter(&drops), Ownership::Table);
    assert_eq!(drops.get(), 1, "overwrite released the old value");

    assert!(matches!(t.delete_as(&1, Ownership::Table), Removal::Released));
    assert_eq!(drops.get(), 2);

    t.teardown(Ownership::Table);
    assert_eq!(drops.get(), 21);
}

// Test: non-owning mode hands every displaced value back.
#[test]
fn caller_mode_returns_values() {
    let drops = Cell::new(0);
    let mut t = HashTable::new();
    t.insert("a", DropCounter(&drops));
    let old = t.insert("a", DropCounter(&drops)).expect("displaced value");
    assert_eq!(drops.get(), 0);
    drop(old);
    assert_eq!(drops.get(), 1);

    let removed = t.remove("a").expect("removed value");
    assert_eq!(drops.get(), 1);
    drop(removed);
    assert_eq!(drops.get(), 2);

    t.insert("b", DropCounter(&drops));
    let back = t.teardown(Ownership::Caller);
    assert_eq!(back.len(), 1);
    assert_eq!(drops.get(), 2);
    drop(back);
    assert_eq!(drops.get(), 3);
}

// Test: dropping the table releases values it owns.
#[test]
fn drop_releases_values() {
    let v = Rc::new(7);
    {
        let mut t = HashTable::new();
        for i in 0..50 {
            t.insert(i, v.clone());
        }
        assert_eq!(Rc::strong_count(&v), 51);
    }
    assert_eq!(Rc::strong_count(&v), 1);
}

// Test: misuse of the accessor is a recoverable miss.
#[test]
fn get_on_absent_key_is_recoverable() {
    let t: HashTable<String, i32> = HashTable::new();
    assert_eq!(t.get("missing"), None);
    assert_eq!(t.try_get("missing"), Err(Error::KeyNotFound));
}

// Test: get_mut and iter_mut update in place.
#[test]
fn mutation_persists() {
    let mut t = HashTable::new();
    t.insert("a".to_string(), 1);
    t.insert("b".to_string(), 2);
    *t.get_mut("a").unwrap() += 10;
    for (_k, v) in t.iter_mut() {
        *v *= 2;
    }
    let all: BTreeMap<_, _> = t.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(all.get("a"), Some(&22));
    assert_eq!(all.get("b"), Some(&4));
}

// Test: clear keeps capacity and empties the table.
#[test]
fn clear_resets_slots() {
    let mut t = HashTable::with_capacity(30);
    for i in 0..10 {
        t.insert(i, i);
    }
    t.delete(&3);
    t.clear();
    assert!(t.is_empty());
    assert_eq!(t.tombstones(), 0);
    assert_eq!(t.capacity(), 31);
    assert!(!t.contains_key(&4));
}

// Test: custom thresholds.
// Verifies: a table configured to grow above 50% grows sooner than default.
#[test]
fn config_thresholds_apply() {
    let mut t = HashTable::with_config(Config::new().base_capacity(10).grow_above(50))
        .expect("valid config");
    assert_eq!(t.capacity(), 11);
    for i in 0..6 {
        t.insert(i, ());
    }
    // 5 entries = 45%; 6th sees 45% and fits.
    assert_eq!(t.capacity(), 11);
    t.insert(6, ());
    // 6 entries = 54% > 50% before the 7th insert.
    assert_eq!(t.base_capacity(), 20);
    assert_eq!(t.capacity(), 23);
}

// Test: the table can be moved to another thread.
#[test]
fn table_is_send() {
    let mut t = HashTable::new();
    t.insert("x".to_string(), 1);
    let handle = std::thread::spawn(move || t.get("x").copied());
    assert_eq!(handle.join().unwrap(), Some(1));
}

// Test (debug-only): re-entering the table from K: Eq panics.
#[cfg(debug_assertions)]
#[test]
fn reentrancy_from_eq_panics() {
    use std::hash::Hash;

    struct ReentryKey {
        id: &'static str,
        map: *const HashTable<ReentryKey, i32, ConstBuildHasher>,
    }
    impl PartialEq for ReentryKey {
        fn eq(&self, other: &Self) -> bool {
            if !other.map.is_null() {
                // Attempt to re-enter the same table during probing.
                unsafe {
                    let m = &*other.map;
                    let _ = m.len();
                    let _ = m.contains_key(self);
                }
            }
            self.id == other.id
        }
    }
    impl Eq for ReentryKey {}
    impl Hash for ReentryKey {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    let mut t: HashTable<ReentryKey, i32, ConstBuildHasher> =
        HashTable::with_hasher(ConstBuildHasher);
    t.insert(
        ReentryKey {
            id: "a",
            map: core::ptr::null(),
        },
        1,
    );
    let query = ReentryKey {
        id: "b",
        map: &t as *const _,
    };
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = t.contains_key(&query);
    }));
    assert!(res.is_err(), "expected reentrancy to panic in debug builds");
}
