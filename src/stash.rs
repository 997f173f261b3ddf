//! Overflow stash for the flat table.
//!
//! - Fixed slot array allocated with the table
//! - Occupied keys form a packed prefix `[0, len)`
//! - Removal moves the last key into the hole
//! - Only holds keys whose home bucket is full

use crate::Key;

/// Fixed-capacity overflow area shared by all flat buckets
#[derive(Debug, Clone)]
pub struct OverflowStash {
    /// Slot storage; only `[0, len)` is meaningful
    slots: Box<[Key]>,

    /// Occupied prefix length
    len: usize,
}

impl OverflowStash {
    /// Create an empty stash with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Find slot holding `key`
    #[inline]
    pub fn find(&self, key: Key) -> Option<usize> {
        self.slots[..self.len].iter().position(|&k| k == key)
    }

    /// Append `key`; returns `false` when the stash is full
    pub fn push(&mut self, key: Key) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.len] = key;
        self.len += 1;
        true
    }

    /// Remove entry at slot, moving the last key into its place
    pub fn remove_at(&mut self, slot: usize) -> Option<Key> {
        if slot >= self.len {
            return None;
        }
        let removed = self.slots[slot];
        self.len -= 1;
        self.slots[slot] = self.slots[self.len];
        Some(removed)
    }

    /// Remove key if present
    #[inline]
    pub fn remove(&mut self, key: Key) -> bool {
        match self.find(key) {
            Some(slot) => self.remove_at(slot).is_some(),
            None => false,
        }
    }

    /// Remove and return the first key matching `pred`
    pub fn take_where<F>(&mut self, mut pred: F) -> Option<Key>
    where
        F: FnMut(Key) -> bool,
    {
        let slot = self.slots[..self.len].iter().position(|&k| pred(k))?;
        self.remove_at(slot)
    }

    /// Iterate over stored keys in slot order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.slots[..self.len].iter().copied()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
