// Property tests for ChainedHashMap kept inside the crate so they can
// check the bucket counts and handles against internal expectations.

use crate::hash_map::{ChainedHashMap, Handle, InsertOutcome};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking converges on earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    GetOrInsertWith(usize, i32),
    GetOrInsertDefault(usize),
    // `true` removes through the tracked handle instead of the key.
    Remove(usize, bool),
    FindAndAt(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
    CloneThenMutate(usize),
    CloneFromThenMutate(usize),
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::GetOrInsertWith(i, v)),
            1 => idx.clone().prop_map(OpI::GetOrInsertDefault),
            3 => (idx.clone(), any::<bool>()).prop_map(|(i, by_handle)| OpI::Remove(i, by_handle)),
            3 => idx.clone().prop_map(OpI::FindAndAt),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
            1 => idx.clone().prop_map(OpI::CloneThenMutate),
            1 => idx.clone().prop_map(OpI::CloneFromThenMutate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap plus an
// explicit newest-first order model. Invariants checked after every op:
// - insert never overwrites; get_or_insert_* only inserts when absent.
// - find/at/contains_key parity with the model; at fails iff absent.
// - live handles keep resolving to their entry across growth; stale
//   handles (removed or cleared) never resolve again.
// - iteration order equals the order model; len/is_empty parity.
// - bucket count never decreases and load stays under the threshold.
// - a clone is independent of its source.
// - clone_from stales every handle the target held, and the two maps stay
//   independent afterwards.
fn run_scenario<S>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher + Clone,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut order: Vec<Key> = Vec::new();
    let mut live: HashMap<Key, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();
    let ctor_calls = Cell::new(0);
    let mut last_buckets = sut.bucket_count();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                match sut.insert(k.clone(), v) {
                    InsertOutcome::Inserted(h) => {
                        prop_assert!(!already, "insert must not add a duplicate");
                        live.insert(k.clone(), h);
                        order.insert(0, k.clone());
                        model.insert(k, v);
                    }
                    InsertOutcome::Occupied(h) => {
                        prop_assert!(already, "occupied only when key exists");
                        prop_assert_eq!(Some(&h), live.get(&k));
                    }
                }
            }
            OpI::GetOrInsertWith(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let before = ctor_calls.get();
                let got = *sut.get_or_insert_with(k.clone(), || {
                    ctor_calls.set(ctor_calls.get() + 1);
                    v
                });
                if already {
                    prop_assert_eq!(ctor_calls.get(), before, "constructor must not run");
                    prop_assert_eq!(Some(&got), model.get(&k));
                } else {
                    prop_assert_eq!(ctor_calls.get(), before + 1);
                    prop_assert_eq!(got, v);
                    let h = sut.find(&k).expect("inserted key is findable");
                    live.insert(k.clone(), h);
                    order.insert(0, k.clone());
                    model.insert(k, v);
                }
            }
            OpI::GetOrInsertDefault(i) => {
                let k = key_from(pool, i);
                let got = *sut.get_or_insert_default(k.clone());
                match model.get(&k) {
                    Some(&mv) => prop_assert_eq!(got, mv),
                    None => {
                        prop_assert_eq!(got, 0);
                        let h = sut.find(&k).expect("inserted key is findable");
                        live.insert(k.clone(), h);
                        order.insert(0, k.clone());
                        model.insert(k, 0);
                    }
                }
            }
            OpI::Remove(i, false) => {
                let k = key_from(pool, i);
                let removed = sut.remove(k.0.as_str());
                prop_assert_eq!(removed, model.remove(&k));
                if let Some(h) = live.remove(&k) {
                    order.retain(|o| o != &k);
                    stale.push(h);
                }
                prop_assert!(sut.find(&k).is_none());
                prop_assert!(sut.at(&k).is_err());
            }
            OpI::Remove(i, true) => {
                let k = key_from(pool, i);
                if let Some(h) = live.remove(&k) {
                    let (kk, vv) = sut.remove_handle(h).expect("live handle removes");
                    prop_assert!(kk == k);
                    prop_assert_eq!(Some(vv), model.remove(&k));
                    order.retain(|o| o != &k);
                    stale.push(h);
                }
            }
            OpI::FindAndAt(i) => {
                let k = key_from(pool, i);
                let found = sut.find(&k);
                prop_assert_eq!(found.is_some(), model.contains_key(&k));
                if let Some(h) = found {
                    prop_assert_eq!(Some(&h), live.get(&k));
                }
                match (sut.at(&k), model.get(&k)) {
                    (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                    (Err(e), None) => prop_assert!(e.bucket() < e.bucket_count()),
                    (got, want) => prop_assert!(false, "at mismatch: {:?} vs {:?}", got, want),
                }
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(&h) = live.get(&k) {
                    match h.value_mut(&mut sut) {
                        Some(vr) => {
                            *vr = vr.wrapping_add(d);
                            if let Some(mv) = model.get_mut(&k) {
                                *mv = mv.wrapping_add(d);
                            }
                        }
                        None => prop_assert!(false, "live handle should resolve"),
                    }
                }
            }
            OpI::Iterate => {
                let keys: Vec<Key> = sut.keys().cloned().collect();
                prop_assert_eq!(&keys, &order);
                let mut reversed: Vec<Key> = sut.iter().rev().map(|(k, _)| k.clone()).collect();
                reversed.reverse();
                prop_assert_eq!(&reversed, &order);
                prop_assert_eq!(sut.handles().count(), live.len());
            }
            OpI::Clear => {
                let buckets = sut.bucket_count();
                sut.clear();
                prop_assert_eq!(sut.bucket_count(), buckets);
                stale.extend(live.drain().map(|(_, h)| h));
                model.clear();
                order.clear();
            }
            OpI::CloneThenMutate(i) => {
                let snapshot = sut.clone();
                prop_assert!(snapshot == sut);
                let k = key_from(pool, i);
                *sut.get_or_insert_default(k.clone()) ^= 1;
                // The copy kept the pre-mutation value.
                prop_assert_eq!(snapshot.get(&k).copied(), model.get(&k).copied());
                match model.get_mut(&k) {
                    Some(mv) => *mv ^= 1,
                    None => {
                        let h = sut.find(&k).expect("inserted key is findable");
                        live.insert(k.clone(), h);
                        order.insert(0, k.clone());
                        model.insert(k, 1);
                    }
                }
            }
            OpI::CloneFromThenMutate(i) => {
                let k = key_from(pool, i);
                // A source sharing the target's slot keys, differing in `k`.
                let mut source = sut.clone();
                if source.remove(&k).is_none() {
                    source.insert(k.clone(), 7);
                }
                sut.clone_from(&source);
                prop_assert!(sut == source);
                stale.extend(live.drain().map(|(_, h)| h));
                for h in sut.handles() {
                    let key = h.key(&sut).expect("handle from iteration resolves");
                    live.insert(key.clone(), h);
                }
                model = source.iter().map(|(k, v)| (k.clone(), *v)).collect();
                order = source.keys().cloned().collect();
                prop_assert_eq!(sut.keys().cloned().collect::<Vec<_>>(), order.clone());

                // Edits to the source after assignment stay out of the target.
                for v in source.values_mut() {
                    *v = v.wrapping_add(1);
                }
                source.insert(Key(format!("{}!", k.0)), 0);
                prop_assert_eq!(sut.len(), model.len());
                for (mk, mv) in &model {
                    prop_assert_eq!(sut.get(mk), Some(mv));
                }
            }
        }

        for &h in &stale {
            prop_assert!(h.value(&sut).is_none(), "stale handle resolved");
        }
        for (k, h) in &live {
            prop_assert_eq!(h.key(&sut), Some(k));
            prop_assert_eq!(h.value(&sut), model.get(k));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.bucket_count() >= last_buckets, "bucket count shrank");
        prop_assert!(sut.len() < sut.bucket_count() * sut.policy().max_load_factor());
        last_buckets = sut.bucket_count();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
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

// Same invariants under worst-case collisions: every key shares one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
