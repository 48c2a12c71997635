#![cfg(test)]

// Property tests for ChainedHashTable kept inside the crate so they can
// check slot placement through the test-only helpers.

use crate::chained_hash_table::ChainedHashTable;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::key::Keyed;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

#[derive(Clone, Debug, PartialEq)]
struct Rec {
    id: String,
    n: i32,
}

impl Keyed for Rec {
    fn key(&self) -> &str {
        &self.id
    }
}

// Pool-indexed operations; the pool mixes case variants of the same key so
// duplicate detection is exercised across casings.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-cA-C0-9]{0,4}", 1..=10).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.prop_map(Op::Get),
        ];
        (Just(pool), proptest::collection::vec(op, 1..120))
    })
}

fn run<S: BuildHasher>(
    mut sut: ChainedHashTable<Rec, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    // Model keyed by the lowercase form.
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut capacity = sut.capacity();

    for op in ops {
        match op {
            Op::Insert(i, n) => {
                let id = &pool[i];
                let before = sut.num_keys();
                let res = sut.insert(id.as_str(), Rec { id: id.clone(), n });
                match model.entry(id.to_lowercase()) {
                    std::collections::hash_map::Entry::Occupied(_) => {
                        prop_assert_eq!(res, Err(TableError::DuplicateKey));
                        prop_assert_eq!(sut.num_keys(), before);
                    }
                    std::collections::hash_map::Entry::Vacant(v) => {
                        prop_assert_eq!(res, Ok(()));
                        prop_assert_eq!(sut.num_keys(), before + 1);
                        v.insert(n);
                    }
                }
            }
            Op::Remove(i) => {
                let id = &pool[i];
                let removed = sut.remove(id.as_str());
                prop_assert_eq!(removed, Ok(model.remove(&id.to_lowercase()).is_some()));
            }
            Op::Get(i) => {
                let id = &pool[i];
                match model.get(&id.to_lowercase()) {
                    Some(&n) => prop_assert_eq!(sut.get(id.as_str()).map(|r| r.n), Ok(n)),
                    None => prop_assert_eq!(sut.get(id.as_str()), Err(TableError::KeyNotFound)),
                }
            }
        }

        // Capacity only grows, and only by 2c + 1.
        let now = sut.capacity();
        prop_assert!(now == capacity || now == 2 * capacity + 1);
        capacity = now;

        prop_assert_eq!(sut.num_keys(), model.len());
        sut.check_invariants();
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_model((pool, ops) in arb_scenario(), cap in 0usize..8, lf in 0.1f64..1.0) {
        let sut = ChainedHashTable::with_capacity_and_threshold(cap, lf);
        run(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain scanning.
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
        0
    }
}

proptest! {
    #[test]
    fn prop_matches_model_with_collisions((pool, ops) in arb_scenario(), cap in 1usize..4) {
        let config = TableConfig::new().with_initial_capacity(cap);
        let sut = ChainedHashTable::with_config_and_hasher(config, ConstBuildHasher);
        run(sut, &pool, ops)?;
    }
}

proptest! {
    /// Keys that differ only in case collide with each other.
    #[test]
    fn prop_case_variants_share_slot(key in "[a-zA-Z0-9]{1,12}", cap in 1usize..500) {
        let t: ChainedHashTable<Rec> = ChainedHashTable::with_capacity_and_threshold(cap, 0.75);
        let upper = key.to_uppercase();
        let lower = key.to_lowercase();
        prop_assert_eq!(t.hash(&upper), t.hash(&lower));
        prop_assert!(t.hash(&key) < cap);
    }
}
