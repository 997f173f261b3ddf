//! Fixed-size bucket for the flat table.
//!
//! - 4 slots per bucket, stored inline
//! - `None` marks an empty slot
//! - Occupied slots form a packed prefix starting at index 0
//! - Removal moves the last occupied key into the hole

use crate::Key;

/// Number of slots per bucket
pub const SLOTS_PER_BUCKET: usize = 4;

/// Result of inserting into a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Key written into the given slot
    Inserted(usize),

    /// Key already stored at the given slot
    Present(usize),

    /// All slots hold other keys
    Full,
}

/// Bucket with inline key storage
///
/// Memory layout (4 slots):
/// ```text
/// slots: [Option<u32>; 4] = 32 bytes
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatBucket {
    slots: [Option<Key>; SLOTS_PER_BUCKET],
}

impl FlatBucket {
    /// Create new empty bucket
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: [None; SLOTS_PER_BUCKET],
        }
    }

    /// Number of occupied slots (length of the packed prefix)
    #[inline]
    pub fn count(&self) -> usize {
        self.slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(SLOTS_PER_BUCKET)
    }

    /// Check if bucket is full
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots[SLOTS_PER_BUCKET - 1].is_some()
    }

    /// Check if bucket is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// Raw slot view, for layout checks
    #[inline]
    pub fn slots(&self) -> &[Option<Key>; SLOTS_PER_BUCKET] {
        &self.slots
    }

    /// True when no empty slot precedes an occupied one
    pub fn is_packed(&self) -> bool {
        let count = self.count();
        self.slots[count..].iter().all(Option::is_none)
    }

    /// Find slot holding `key`, stopping at the first empty slot
    #[inline]
    pub fn find_key(&self, key: Key) -> Option<usize> {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(k) if *k == key => return Some(i),
                Some(_) => {}
                None => return None,
            }
        }
        None
    }

    /// Index of the last occupied slot, scanning back from the end
    #[inline]
    pub fn last_occupied(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }

    /// Insert key into the first empty slot unless already present
    pub fn insert(&mut self, key: Key) -> InsertOutcome {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                Some(k) if *k == key => return InsertOutcome::Present(i),
                Some(_) => {}
                None => {
                    *slot = Some(key);
                    return InsertOutcome::Inserted(i);
                }
            }
        }
        InsertOutcome::Full
    }

    /// Remove entry at slot, returning its key
    ///
    /// The last occupied key is copied into `slot` and its old slot is
    /// emptied, so the packed prefix stays contiguous. When `slot` is the last
    /// occupied one this degenerates to a self-copy and a clear.
    pub fn remove_at(&mut self, slot: usize) -> Option<Key> {
        let removed = self.slots[slot]?;
        let last = self.last_occupied()?;
        self.slots[slot] = self.slots[last];
        self.slots[last] = None;
        Some(removed)
    }

    /// Remove key if present
    #[inline]
    pub fn remove(&mut self, key: Key) -> bool {
        match self.find_key(key) {
            Some(slot) => self.remove_at(slot).is_some(),
            None => false,
        }
    }

    /// Iterate over occupied keys in slot order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.slots.iter().map_while(|slot| *slot)
    }

    /// Clear all slots in bucket
    #[inline]
    pub fn clear(&mut self) {
        self.slots = [None; SLOTS_PER_BUCKET];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(keys: &[Key]) -> FlatBucket {
        let mut bucket = FlatBucket::new();
        for &k in keys {
            assert!(matches!(bucket.insert(k), InsertOutcome::Inserted(_)));
        }
        bucket
    }

    #[test]
    fn test_empty_bucket() {
        let bucket = FlatBucket::new();
        assert!(bucket.is_empty());
        assert!(!bucket.is_full());
        assert_eq!(bucket.count(), 0);
        assert_eq!(bucket.find_key(0), None);
        assert_eq!(bucket.last_occupied(), None);
        assert!(bucket.is_packed());
    }

    #[test]
    fn test_insert_fills_in_order() {
        let mut bucket = FlatBucket::new();
        assert_eq!(bucket.insert(10), InsertOutcome::Inserted(0));
        assert_eq!(bucket.insert(20), InsertOutcome::Inserted(1));
        assert_eq!(bucket.insert(30), InsertOutcome::Inserted(2));
        assert_eq!(bucket.slots(), &[Some(10), Some(20), Some(30), None]);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut bucket = filled(&[10, 20]);
        assert_eq!(bucket.insert(20), InsertOutcome::Present(1));
        assert_eq!(bucket.count(), 2);
    }

    #[test]
    fn test_full_bucket() {
        let mut bucket = filled(&[1, 2, 3, 4]);
        assert!(bucket.is_full());
        assert_eq!(bucket.insert(5), InsertOutcome::Full);
        // duplicates are still recognised when full
        assert_eq!(bucket.insert(4), InsertOutcome::Present(3));
    }

    #[test]
    fn test_zero_key_is_a_real_key() {
        let mut bucket = FlatBucket::new();
        assert_eq!(bucket.insert(0), InsertOutcome::Inserted(0));
        assert_eq!(bucket.find_key(0), Some(0));
    }

    #[test]
    fn test_remove_middle_moves_last() {
        let mut bucket = filled(&[1, 2, 3, 4]);
        assert!(bucket.remove(2));
        assert_eq!(bucket.slots(), &[Some(1), Some(4), Some(3), None]);
        assert!(bucket.is_packed());
    }

    #[test]
    fn test_remove_first_of_partial() {
        let mut bucket = filled(&[1, 2, 3]);
        assert!(bucket.remove(1));
        assert_eq!(bucket.slots(), &[Some(3), Some(2), None, None]);
    }

    #[test]
    fn test_remove_last_occupied_is_self_copy() {
        let mut bucket = filled(&[1, 2, 3]);
        assert!(bucket.remove(3));
        assert_eq!(bucket.slots(), &[Some(1), Some(2), None, None]);

        let mut single = filled(&[7]);
        assert!(single.remove(7));
        assert!(single.is_empty());
    }

    #[test]
    fn test_remove_absent() {
        let mut bucket = filled(&[1, 2]);
        assert!(!bucket.remove(9));
        assert_eq!(bucket.slots(), &[Some(1), Some(2), None, None]);
        assert_eq!(bucket.remove_at(3), None);
    }

    #[test]
    fn test_find_after_compaction() {
        let mut bucket = filled(&[1, 2, 3, 4]);
        bucket.remove(1);
        bucket.remove(3);
        assert_eq!(bucket.count(), 2);
        assert!(bucket.find_key(2).is_some());
        assert!(bucket.find_key(4).is_some());
        assert!(bucket.find_key(1).is_none());
        assert!(bucket.find_key(3).is_none());
    }

    #[test]
    fn test_packed_through_churn() {
        let mut bucket = FlatBucket::new();
        let ops: &[(bool, Key)] = &[
            (true, 5),
            (true, 6),
            (true, 7),
            (false, 5),
            (true, 8),
            (true, 9),
            (false, 8),
            (false, 6),
            (true, 10),
            (false, 9),
            (false, 7),
            (false, 10),
        ];
        for &(add, key) in ops {
            if add {
                bucket.insert(key);
            } else {
                assert!(bucket.remove(key), "key {} missing", key);
            }
            assert!(bucket.is_packed(), "gap after {:?}", bucket.slots());
        }
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_iter_and_clear() {
        let mut bucket = filled(&[3, 1, 2]);
        assert_eq!(bucket.iter().collect::<Vec<_>>(), vec![3, 1, 2]);

        bucket.clear();
        assert!(bucket.is_empty());
        assert_eq!(bucket.iter().count(), 0);
    }
}
