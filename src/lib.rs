//! chained-hashmap: a single-threaded hash map whose entry handles stay
//! valid across insertions and rehashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a unique-key map where growth never moves or invalidates
//!   existing entries; only removing an entry (or clearing the map)
//!   invalidates references to it.
//! - Layers:
//!   - RecordList<K, V>: the only owner of entries. A `SlotMap` gives each
//!     record a generational slot key; `prev`/`next` links keep insertion
//!     order, newest first.
//!   - BucketIndex: `Vec` of buckets holding non-owning slot keys. Lookups
//!     scan one bucket and compare real keys. The index is disposable and
//!     rebuilt from the records on growth.
//!   - ChainedHashMap<K, V, S>: public API tying the two together with a
//!     `BuildHasher` and a `RehashPolicy`; exposes `Handle`s.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (no locking, no atomics).
//! - Unique keys; `insert` of a present key is a no-op, not an update.
//! - O(1) average lookups: bucket scan bounded by the load factor.
//! - Lookup results are `Option`/`Result`, never sentinel positions.
//!
//! Rehash policy
//! - After an insertion adds a record, if `len >= buckets * max_load_factor`
//!   (default 2) the index is rebuilt with `len * growth_factor` (default 2)
//!   buckets. The map starts with one bucket and never shrinks.
//! - Each record stores its `u64` hash, so rebuilding never calls `K: Hash`.
//! - The replacement index is fully built before the old one is dropped.
//!
//! Handles
//! - `Handle` wraps a slot key. Insertions and rehashes never touch record
//!   slots, so handles keep resolving; after removal the slot's generation
//!   is bumped and the handle resolves to `None` forever.
//! - Handles carry no owner identity. A clone of a map shares slot keys
//!   with its source, so source handles resolve in the copy.
//!
//! Reentrancy policy
//! - Entry points that call user code (`Hash`, `Eq`, value constructors)
//!   hold a debug-only reentrancy guard while the record list and index
//!   may disagree. Values removed from the map are returned or dropped
//!   only after the structure is consistent again.
//!
//! Indexed access
//! - The map-style `m[k]` operation that inserts a default for a missing
//!   key is spelled `get_or_insert_default` / `get_or_insert_with`; `get`
//!   and `at` never mutate.

mod bucket_index;
pub mod error;
pub mod hash_map;
#[cfg(test)]
mod hash_map_proptest;
pub mod policy;
mod record_list;
mod reentrancy;

// Public surface
pub use error::{KeyNotFound, PolicyError};
pub use hash_map::{ChainedHashMap, Handle, InsertOutcome};
pub use policy::{RehashPolicy, GROWTH_FACTOR, MAX_LOAD_FACTOR};
