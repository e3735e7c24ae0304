//! ChainedHashMap: record list plus bucket index, with handles that
//! survive insertion and rehashing.

use crate::bucket_index::{BucketIndex, Position};
use crate::error::KeyNotFound;
use crate::policy::RehashPolicy;
use crate::record_list::{Cursor, CursorMut, Record, RecordList};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::DefaultKey;
use tracing::{debug, trace};

/// Stable reference to one entry of a [`ChainedHashMap`].
///
/// A handle keeps resolving to the same entry across any number of
/// insertions and rehashes. It stops resolving once that entry is removed
/// or the map is cleared, and never aliases an entry inserted later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }

    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a, K, V, S>(&self, map: &'a ChainedHashMap<K, V, S>) -> Option<&'a K> {
        map.handle_key(*self)
    }

    pub fn value<'a, K, V, S>(&self, map: &'a ChainedHashMap<K, V, S>) -> Option<&'a V> {
        map.handle_value(*self)
    }

    pub fn value_mut<'a, K, V, S>(
        &self,
        map: &'a mut ChainedHashMap<K, V, S>,
    ) -> Option<&'a mut V> {
        map.handle_value_mut(*self)
    }
}

/// Result of [`ChainedHashMap::insert`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    /// The key was new; the pair was added.
    Inserted(Handle),
    /// The key was already present; the stored value was left untouched
    /// and the offered one dropped.
    Occupied(Handle),
}

impl InsertOutcome {
    pub fn handle(&self) -> Handle {
        match *self {
            InsertOutcome::Inserted(h) | InsertOutcome::Occupied(h) => h,
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// The two cooperating structures. Only the records own data; the index
/// can be thrown away and rebuilt from their stored hashes.
struct Table<K, V> {
    records: RecordList<K, V>,
    index: BucketIndex,
}

impl<K, V> Table<K, V> {
    fn with_capacity(capacity: usize, bucket_count: usize) -> Self {
        Self {
            records: RecordList::with_capacity(capacity),
            index: BucketIndex::with_buckets(bucket_count),
        }
    }

    fn from_records(records: RecordList<K, V>, bucket_count: usize) -> Self {
        let index =
            BucketIndex::rebuilt(bucket_count, records.cursor().map(|(k, r)| (r.hash, k)));
        Self { records, index }
    }

    /// Scan the bucket for `hash`, comparing real keys.
    fn find<Q>(&self, hash: u64, q: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let records = &self.records;
        self.index.find(hash, |k| {
            records
                .get(k)
                .map(|r| r.hash == hash && r.key.borrow() == q)
                .unwrap_or(false)
        })
    }

    /// Link a record for a key known to be absent, then apply `policy`.
    fn insert_unique(&mut self, hash: u64, key: K, value: V, policy: &RehashPolicy) -> DefaultKey {
        let k = self.records.push_front(key, value, hash);
        self.index.push(hash, k);
        let len = self.records.len();
        if policy.needs_rehash(len, self.index.bucket_count()) {
            self.rebuild_index(policy.grown_bucket_count(len), "load factor reached");
        }
        k
    }

    /// Replace the index with a freshly built one of `bucket_count`
    /// buckets. Records are not touched.
    fn rebuild_index(&mut self, bucket_count: usize, reason: &'static str) {
        let from = self.index.bucket_count();
        let index = BucketIndex::rebuilt(
            bucket_count,
            self.records.cursor().map(|(k, r)| (r.hash, k)),
        );
        self.index = index;
        debug!(
            from,
            to = bucket_count,
            len = self.records.len(),
            reason,
            "rebuilt bucket index"
        );
    }

    fn remove_at(&mut self, pos: Position) -> Option<Record<K, V>> {
        let k = self.index.remove(pos);
        self.records.remove(k)
    }

    fn remove_key(&mut self, k: DefaultKey) -> Option<Record<K, V>> {
        let hash = self.records.get(k)?.hash;
        let pos = self.index.position_of(hash, k)?;
        self.remove_at(pos)
    }

    fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}

/// A hash map from unique keys to values, built from an owning record
/// list and a chained bucket index of non-owning slot keys.
///
/// Iteration runs newest-inserted first. Growth only rebuilds the bucket
/// index, so [`Handle`]s stay valid across insertions and rehashes. The
/// bucket count never shrinks.
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    policy: RehashPolicy,
    table: Table<K, V>,
    reentrancy: DebugReentrancy,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// An empty map with a single bucket.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// An empty map sized so that `capacity` entries fit without a rehash.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }

    pub fn with_policy(policy: RehashPolicy) -> Self {
        Self::with_hasher_and_policy(Default::default(), policy)
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.table.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured hash builder.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn policy(&self) -> RehashPolicy {
        self.policy
    }

    pub fn bucket_count(&self) -> usize {
        self.table.index.bucket_count()
    }

    /// Entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Rebuild the bucket index with at least `min_buckets` buckets.
    /// Requests at or below the current count are ignored.
    pub fn rehash(&mut self, min_buckets: usize) {
        if min_buckets > self.bucket_count() {
            self.table.rebuild_index(min_buckets, "explicit rehash");
        }
    }

    /// Make room for `additional` more entries without an automatic rehash.
    pub fn reserve(&mut self, additional: usize) {
        let wanted = self.policy.buckets_for(self.len().saturating_add(additional));
        self.table.records.reserve(additional);
        if wanted > self.bucket_count() {
            self.table.rebuild_index(wanted, "reserve");
        }
    }

    /// Remove every entry. The bucket count is kept and all outstanding
    /// handles stop resolving.
    pub fn clear(&mut self) {
        let len = self.len();
        self.table.clear();
        trace!(len, buckets = self.bucket_count(), "cleared map");
    }

    /// Remove the entry `handle` refers to, without hashing.
    pub fn remove_handle(&mut self, handle: Handle) -> Option<(K, V)> {
        self.table
            .remove_key(handle.raw_handle())
            .map(|r| (r.key, r.value))
    }

    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.table.records.get(handle.raw_handle()).is_some()
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<&K> {
        self.table.records.get(h.raw_handle()).map(|r| &r.key)
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.table.records.get(h.raw_handle()).map(|r| &r.value)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.table
            .records
            .get_mut(h.raw_handle())
            .map(|r| &mut r.value)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.records.cursor(),
        }
    }

    /// Entries with mutable values, newest first.
    ///
    /// Setup walks the whole slot storage once and allocates a side table
    /// sized to it, so creating the iterator costs O(capacity) before the
    /// first item. [`values_mut`](Self::values_mut) has the same cost.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.records.cursor_mut(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.table.records.cursor(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.table.records.cursor(),
        }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.table.records.cursor_mut(),
        }
    }

    /// Handles of all entries, newest first.
    pub fn handles(&self) -> Handles<'_, K, V> {
        Handles {
            inner: self.table.records.cursor(),
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_and_policy(hasher, RehashPolicy::default())
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let policy = RehashPolicy::default();
        Self {
            hasher,
            policy,
            table: Table::with_capacity(capacity, policy.buckets_for(capacity)),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn with_hasher_and_policy(hasher: S, policy: RehashPolicy) -> Self {
        Self {
            hasher,
            policy,
            table: Table::with_capacity(0, 1),
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Slot key for `q`, or the error describing the bucket that was probed.
    fn locate<Q>(&self, op: &'static str, q: &Q) -> Result<DefaultKey, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter(op);
        let hash = self.make_hash(q);
        let index = &self.table.index;
        match self.table.find(hash, q) {
            Some(pos) => Ok(index.key_at(pos)),
            None => Err(KeyNotFound::new(index.row(hash), index.bucket_count())),
        }
    }

    /// Handle of the entry for `q`; `None` plays the role of the end
    /// position.
    pub fn find<Q>(&self, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate("find", q).ok().map(Handle::new)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate("contains_key", q).is_ok()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.locate("get", q).ok()?;
        Some(&self.table.records[k].value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.locate("get_key_value", q).ok()?;
        let r = &self.table.records[k];
        Some((&r.key, &r.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.locate("get_mut", q).ok()?;
        Some(&mut self.table.records[k].value)
    }

    /// The value for `q`, or [`KeyNotFound`] if the key is absent. Never
    /// inserts.
    pub fn at<Q>(&self, q: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.locate("at", q)?;
        Ok(&self.table.records[k].value)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.locate("at_mut", q)?;
        Ok(&mut self.table.records[k].value)
    }

    /// Add `key -> value` unless `key` is already present.
    ///
    /// An existing entry is never overwritten: the call reports
    /// [`InsertOutcome::Occupied`] and drops `value`. New entries go to the
    /// front of the iteration order and may trigger a rehash.
    pub fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        let _g = self.reentrancy.enter("insert");
        let hash = self.make_hash(&key);
        if let Some(pos) = self.table.find(hash, &key) {
            return InsertOutcome::Occupied(Handle::new(self.table.index.key_at(pos)));
        }
        let k = self.table.insert_unique(hash, key, value, &self.policy);
        InsertOutcome::Inserted(Handle::new(k))
    }

    /// Mutable access to the value for `key`, **inserting** `default()`
    /// first if the key is absent.
    ///
    /// This is the map-style indexing operation: unlike [`get_mut`], it
    /// changes the map (and may rehash it) when the key is missing.
    /// `default` only runs in that case.
    ///
    /// [`get_mut`]: ChainedHashMap::get_mut
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let _g = self.reentrancy.enter("get_or_insert_with");
        let hash = self.make_hash(&key);
        let k = match self.table.find(hash, &key) {
            Some(pos) => self.table.index.key_at(pos),
            None => self.table.insert_unique(hash, key, default(), &self.policy),
        };
        &mut self.table.records[k].value
    }

    /// [`get_or_insert_with`](ChainedHashMap::get_or_insert_with) using
    /// `V::default()`. Inserts when the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Remove the entry for `q`. Only handles to that entry are
    /// invalidated; no rehash happens.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let record = {
            let _g = self.reentrancy.enter("remove");
            let hash = self.make_hash(q);
            let pos = self.table.find(hash, q)?;
            self.table.remove_at(pos)?
        };
        // The structure is consistent again before K and V drop.
        Some((record.key, record.value))
    }
}

impl<K, V, S> Clone for ChainedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// The copy gets its own index sized to the source's length. Handles
    /// of the source resolve to the corresponding entries of the copy.
    fn clone(&self) -> Self {
        let records = self.table.records.clone();
        let bucket_count = copy_bucket_count(&self.policy, records.len());
        Self {
            hasher: self.hasher.clone(),
            policy: self.policy,
            table: Table::from_records(records, bucket_count),
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Clears the target in place, then copies the source's entries into
    /// it. Every handle taken from the target before the assignment stops
    /// resolving; source handles do not carry over. The bucket count does
    /// not drop below the target's current one.
    fn clone_from(&mut self, source: &Self) {
        // Keys and values are cloned before the target is touched.
        let copied: Vec<(K, V, u64)> = source
            .table
            .records
            .cursor()
            .rev()
            .map(|(_, r)| (r.key.clone(), r.value.clone(), r.hash))
            .collect();
        let hasher = source.hasher.clone();
        let bucket_count = self
            .bucket_count()
            .max(copy_bucket_count(&source.policy, copied.len()));

        // Clearing our own slotmap bumps every slot version.
        self.table.records.clear();
        self.table.records.reserve(copied.len());
        for (key, value, hash) in copied {
            self.table.records.push_front(key, value, hash);
        }
        self.table.rebuild_index(bucket_count, "assigned from another map");
        self.hasher = hasher;
        self.policy = source.policy;
    }
}

fn copy_bucket_count(policy: &RehashPolicy, len: usize) -> usize {
    len.saturating_mul(policy.growth_factor()).saturating_add(1)
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts in order; for repeated keys the first occurrence wins.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

/// Iterator over `(&K, &V)`, newest first.
pub struct Iter<'a, K, V> {
    inner: Cursor<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, r)| (&r.key, &r.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, r)| (&r.key, &r.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)`, newest first.
pub struct IterMut<'a, K, V> {
    inner: CursorMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, k, v)| (k, v))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Cursor<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(_, r)| &r.key)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, r)| &r.key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Cursor<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, r)| &r.value)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, r)| &r.value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    inner: CursorMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, _, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, _, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

pub struct Handles<'a, K, V> {
    inner: Cursor<'a, K, V>,
}

impl<K, V> Iterator for Handles<'_, K, V> {
    type Item = Handle;
    fn next(&mut self) -> Option<Handle> {
        self.inner.next().map(|(k, _)| Handle::new(k))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Handles<'_, K, V> {
    fn next_back(&mut self) -> Option<Handle> {
        self.inner.next_back().map(|(k, _)| Handle::new(k))
    }
}

impl<K, V> ExactSizeIterator for Handles<'_, K, V> {}

/// Owning iterator, newest first.
pub struct IntoIter<K, V> {
    records: RecordList<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> {
        self.records.pop_front().map(|r| (r.key, r.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.records.len();
        (n, Some(n))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.records.pop_back().map(|r| (r.key, r.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            records: self.table.records,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
