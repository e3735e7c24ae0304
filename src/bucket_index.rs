//! BucketIndex: chained lookup accelerator over record slot keys.
//!
//! Each bucket holds non-owning `DefaultKey`s pointing into the record
//! list. The index never owns data and can be rebuilt from the records'
//! stored hashes at any time.

use slotmap::DefaultKey;

/// Location of a slot key inside the index: bucket row and offset in it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) row: usize,
    pub(crate) offset: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct BucketIndex {
    buckets: Vec<Vec<DefaultKey>>,
}

impl BucketIndex {
    /// An index with `bucket_count` empty buckets (at least one).
    pub(crate) fn with_buckets(bucket_count: usize) -> Self {
        let mut buckets = Vec::with_capacity(bucket_count.max(1));
        buckets.resize_with(bucket_count.max(1), Vec::new);
        Self { buckets }
    }

    /// Build a complete index of `bucket_count` buckets from `(hash, key)`
    /// pairs. The caller swaps it in only once it is fully built.
    pub(crate) fn rebuilt<I>(bucket_count: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (u64, DefaultKey)>,
    {
        let mut index = Self::with_buckets(bucket_count);
        for (hash, k) in entries {
            index.push(hash, k);
        }
        index
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn row(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Scan the bucket for `hash` and return the first slot key accepted
    /// by `is_match`.
    pub(crate) fn find<F>(&self, hash: u64, mut is_match: F) -> Option<Position>
    where
        F: FnMut(DefaultKey) -> bool,
    {
        let row = self.row(hash);
        self.buckets[row]
            .iter()
            .position(|&k| is_match(k))
            .map(|offset| Position { row, offset })
    }

    /// Locate a specific slot key by identity.
    pub(crate) fn position_of(&self, hash: u64, k: DefaultKey) -> Option<Position> {
        self.find(hash, |kk| kk == k)
    }

    pub(crate) fn key_at(&self, pos: Position) -> DefaultKey {
        self.buckets[pos.row][pos.offset]
    }

    pub(crate) fn push(&mut self, hash: u64, k: DefaultKey) {
        let row = self.row(hash);
        self.buckets[row].push(k);
    }

    /// Drop the reference at `pos`. Order within a bucket carries no
    /// meaning, so the last reference fills the gap.
    pub(crate) fn remove(&mut self, pos: Position) -> DefaultKey {
        self.buckets[pos.row].swap_remove(pos.offset)
    }

    /// Empty every bucket, keeping the bucket count.
    pub(crate) fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    #[cfg(test)]
    pub(crate) fn bucket_len(&self, row: usize) -> usize {
        self.buckets.get(row).map_or(0, Vec::len)
    }
}
