#![cfg(test)]

// State-machine property tests for RawTable, kept inside the crate so they
// can see slot-level counters.

use crate::config::Config;
use crate::raw_table::RawTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Folds every key into a handful of hashes so probe chains collide often.
#[derive(Clone, Default)]
struct FewBuckets;
struct FewBucketsHasher(u64);
impl BuildHasher for FewBuckets {
    type Hasher = FewBucketsHasher;
    fn build_hasher(&self) -> Self::Hasher {
        FewBucketsHasher(0)
    }
}
impl Hasher for FewBucketsHasher {
    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.wrapping_add(*b as u64);
        }
    }
    fn finish(&self) -> u64 {
        self.0 % 4
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, i32),
    Remove(String),
    Find(String),
    Resize(usize),
}

prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            4 => ("[a-f]{1,3}", any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => "[a-f]{1,3}".prop_map(Op::Remove),
            2 => "[a-f]{1,3}".prop_map(Op::Find),
            1 => (0usize..40).prop_map(Op::Resize),
        ], 1..200)) -> Vec<Op> { ops }
}

fn check<S>(
    sut: &RawTable<String, i32, S>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    prop_assert_eq!(sut.len(), model.len());
    let keys: BTreeSet<&String> = sut.iter().map(|(k, _)| k).collect();
    prop_assert_eq!(keys.len(), sut.len(), "duplicate keys in slot store");
    prop_assert!(sut.len() + sut.tombstones() < sut.capacity(), "no Empty slot left");
    prop_assert_eq!(sut.capacity(), crate::capacity::next_prime(sut.base_capacity()));
    for (k, v) in model {
        prop_assert_eq!(sut.find(k.as_str()), Some((k, v)));
    }
    Ok(())
}

fn run<S: BuildHasher>(
    mut sut: RawTable<String, i32, S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let expected = model.insert(k.clone(), v).map(|old| (k.clone(), old));
                prop_assert_eq!(sut.insert(k, v), expected);
            }
            Op::Remove(k) => {
                let expected = model.remove(&k).map(|old| (k.clone(), old));
                prop_assert_eq!(sut.remove(k.as_str()), expected);
            }
            Op::Find(k) => {
                prop_assert_eq!(sut.find(k.as_str()).map(|(_, v)| *v), model.get(&k).copied());
            }
            Op::Resize(base) => {
                let len = sut.len();
                prop_assert!(sut.try_resize(base as isize).is_ok());
                prop_assert_eq!(sut.len(), len);
                prop_assert_eq!(sut.tombstones(), 0);
            }
        }
        check(&sut, &model)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_std_model(base in 0usize..20, ops in arb_ops()) {
        let sut: RawTable<String, i32, std::collections::hash_map::RandomState> =
            RawTable::with_config_and_hasher(Config::new().base_capacity(base), Default::default());
        run(sut, ops)?;
    }

    #[test]
    fn prop_matches_std_model_under_collisions(base in 0usize..20, ops in arb_ops()) {
        let sut: RawTable<String, i32, FewBuckets> =
            RawTable::with_config_and_hasher(Config::new().base_capacity(base), FewBuckets);
        run(sut, ops)?;
    }
}
