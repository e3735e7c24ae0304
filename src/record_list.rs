//! RecordList: owning storage for map records, linked newest-first.
//!
//! Records live in a `SlotMap`, so every record is addressed by a
//! generational `DefaultKey` that stays valid until that record is
//! removed. Insertion order is kept with intrusive `prev`/`next` links
//! between slot keys; nothing outside this module ever owns a record.

use core::ops::{Index, IndexMut};
use slotmap::{DefaultKey, SecondaryMap, SlotMap};

#[derive(Clone, Debug)]
pub(crate) struct Record<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Hash computed once on insertion; the index is rebuilt from it.
    pub(crate) hash: u64,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Clone, Debug)]
pub(crate) struct RecordList<K, V> {
    slots: SlotMap<DefaultKey, Record<K, V>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<K, V> RecordList<K, V> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Link a new record at the front and return its slot key.
    pub(crate) fn push_front(&mut self, key: K, value: V, hash: u64) -> DefaultKey {
        let old_head = self.head;
        let k = self.slots.insert(Record {
            key,
            value,
            hash,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.slots[h].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
        k
    }

    /// Unlink and return the record stored under `k`, if still live.
    pub(crate) fn remove(&mut self, k: DefaultKey) -> Option<Record<K, V>> {
        let record = self.slots.remove(k)?;
        match record.prev {
            Some(p) => self.slots[p].next = record.next,
            None => self.head = record.next,
        }
        match record.next {
            Some(n) => self.slots[n].prev = record.prev,
            None => self.tail = record.prev,
        }
        Some(record)
    }

    pub(crate) fn pop_front(&mut self) -> Option<Record<K, V>> {
        let head = self.head?;
        self.remove(head)
    }

    pub(crate) fn pop_back(&mut self) -> Option<Record<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub(crate) fn get(&self, k: DefaultKey) -> Option<&Record<K, V>> {
        self.slots.get(k)
    }

    pub(crate) fn get_mut(&mut self, k: DefaultKey) -> Option<&mut Record<K, V>> {
        self.slots.get_mut(k)
    }

    pub(crate) fn clear(&mut self) {
        // SlotMap::clear bumps every slot's version, so old keys go stale.
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    pub(crate) fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.slots.len(),
        }
    }

    /// Mutable walk in list order.
    ///
    /// The slotmap hands out disjoint `&mut` borrows in slot order; they are
    /// parked in a `SecondaryMap` and then taken back out following the links.
    pub(crate) fn cursor_mut(&mut self) -> CursorMut<'_, K, V> {
        let remaining = self.slots.len();
        let (front, back) = (self.head, self.tail);
        let mut parked = SecondaryMap::with_capacity(remaining);
        for (k, record) in self.slots.iter_mut() {
            let Record {
                key,
                value,
                prev,
                next,
                ..
            } = record;
            parked.insert(
                k,
                Parked {
                    key: &*key,
                    value,
                    prev: *prev,
                    next: *next,
                },
            );
        }
        CursorMut {
            parked,
            front,
            back,
            remaining,
        }
    }
}

// Indexing is for keys taken from the bucket index, which only holds live ones.
impl<K, V> Index<DefaultKey> for RecordList<K, V> {
    type Output = Record<K, V>;

    fn index(&self, k: DefaultKey) -> &Record<K, V> {
        &self.slots[k]
    }
}

impl<K, V> IndexMut<DefaultKey> for RecordList<K, V> {
    fn index_mut(&mut self, k: DefaultKey) -> &mut Record<K, V> {
        &mut self.slots[k]
    }
}

/// Shared walk over the list, front (newest) to back (oldest).
pub(crate) struct Cursor<'a, K, V> {
    slots: &'a SlotMap<DefaultKey, Record<K, V>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Cursor<'a, K, V> {
    type Item = (DefaultKey, &'a Record<K, V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.front?;
        let record = self.slots.get(k)?;
        self.front = record.next;
        self.remaining -= 1;
        Some((k, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Cursor<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.back?;
        let record = self.slots.get(k)?;
        self.back = record.prev;
        self.remaining -= 1;
        Some((k, record))
    }
}

impl<K, V> ExactSizeIterator for Cursor<'_, K, V> {}

struct Parked<'a, K, V> {
    key: &'a K,
    value: &'a mut V,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

pub(crate) struct CursorMut<'a, K, V> {
    parked: SecondaryMap<DefaultKey, Parked<'a, K, V>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for CursorMut<'a, K, V> {
    type Item = (DefaultKey, &'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.front?;
        let p = self.parked.remove(k)?;
        self.front = p.next;
        self.remaining -= 1;
        Some((k, p.key, p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for CursorMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.back?;
        let p = self.parked.remove(k)?;
        self.back = p.prev;
        self.remaining -= 1;
        Some((k, p.key, p.value))
    }
}

impl<K, V> ExactSizeIterator for CursorMut<'_, K, V> {}
