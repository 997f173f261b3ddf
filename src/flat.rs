//! Flat open-addressed set.
//!
//! - Boxed slice of `FlatBucket`s, allocated once
//! - FNV-1a word hash masked to a power-of-two bucket count
//! - Running occupancy counter used as the empty fast path
//! - Keys whose bucket is full spill into a fixed overflow stash
//! - Bucket and stash both full rejects the key with `SetError::BucketFull`
//!
//! Stash invariant: every stashed key's home bucket is full. Removing a key
//! from a full bucket pulls one stashed key of that bucket back in, so lookups
//! only consult the stash after missing in a full bucket.

use crate::{
    bucket::{FlatBucket, InsertOutcome, SLOTS_PER_BUCKET},
    config::{SetConfig, Strategy, DEFAULT_FLAT_BUCKETS, DEFAULT_FLAT_STASH_SLOTS},
    error::{Result, SetError},
    hash::flat_bucket_index,
    iter::Keys,
    set::{check_domain, BoundedIntSet, LoadStats},
    stash::OverflowStash,
    Key, DEFAULT_MAX_KEY,
};

/// Fixed-capacity integer set with inline buckets
#[derive(Debug, Clone)]
pub struct FlatBucketSet {
    /// Bucket storage (len is a power of two)
    buckets: Box<[FlatBucket]>,

    /// Overflow for keys whose home bucket is full
    stash: OverflowStash,

    /// Total stored keys (buckets + stash)
    len: usize,

    /// Largest accepted key
    max_key: Key,
}

impl FlatBucketSet {
    /// Create an empty set with 8192 buckets, a 1024-slot stash and the
    /// default key domain
    pub fn new() -> Self {
        Self::allocate(DEFAULT_FLAT_BUCKETS, DEFAULT_FLAT_STASH_SLOTS, DEFAULT_MAX_KEY)
    }

    /// Create an empty set from `config`; its strategy field is ignored
    pub fn with_config(config: &SetConfig) -> Result<Self> {
        let config = SetConfig {
            strategy: Strategy::Flat,
            ..config.clone()
        };
        config.validate()?;
        Ok(Self::allocate(
            config.resolved_bucket_count(),
            config.stash_slots,
            config.max_key,
        ))
    }

    fn allocate(bucket_count: usize, stash_slots: usize, max_key: Key) -> Self {
        let buckets = vec![FlatBucket::new(); bucket_count].into_boxed_slice();
        tracing::debug!(
            buckets = bucket_count,
            capacity = bucket_count * SLOTS_PER_BUCKET,
            stash_slots,
            max_key,
            "allocated flat bucket set"
        );
        Self {
            buckets,
            stash: OverflowStash::new(stash_slots),
            len: 0,
            max_key,
        }
    }

    /// Total bucket slot capacity (excluding the stash)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * SLOTS_PER_BUCKET
    }

    /// Overflow stash slot capacity
    #[inline]
    pub fn stash_capacity(&self) -> usize {
        self.stash.capacity()
    }

    /// Keys currently held in the overflow stash
    #[inline]
    pub fn stash_len(&self) -> usize {
        self.stash.len()
    }

    /// Bucket selected for `key`
    #[inline]
    pub fn bucket_index(&self, key: Key) -> usize {
        flat_bucket_index(key, self.buckets.len())
    }

    /// Get reference to bucket by index
    #[inline]
    pub fn bucket(&self, idx: usize) -> Option<&FlatBucket> {
        self.buckets.get(idx)
    }

    /// Iterate over buckets in index order
    #[inline]
    pub fn buckets(&self) -> impl Iterator<Item = &FlatBucket> {
        self.buckets.iter()
    }

    /// Move one stashed key of bucket `idx` back into it
    fn refill_from_stash(&mut self, idx: usize) {
        let bucket_count = self.buckets.len();
        if let Some(key) = self
            .stash
            .take_where(|k| flat_bucket_index(k, bucket_count) == idx)
        {
            self.buckets[idx].insert(key);
            tracing::trace!(key, bucket = idx, "promoted from stash");
        }
    }
}

impl BoundedIntSet for FlatBucketSet {
    fn add(&mut self, key: Key) -> Result<bool> {
        check_domain(key, self.max_key)?;

        let idx = self.bucket_index(key);
        match self.buckets[idx].insert(key) {
            InsertOutcome::Inserted(slot) => {
                self.len += 1;
                tracing::trace!(key, bucket = idx, slot, "inserted");
                Ok(true)
            }
            InsertOutcome::Present(_) => Ok(false),
            InsertOutcome::Full => {
                if self.stash.find(key).is_some() {
                    return Ok(false);
                }
                if self.stash.push(key) {
                    self.len += 1;
                    tracing::trace!(key, bucket = idx, "spilled to stash");
                    return Ok(true);
                }
                tracing::warn!(
                    key,
                    bucket = idx,
                    stash_slots = self.stash.capacity(),
                    "flat bucket and stash full, key rejected"
                );
                Err(SetError::BucketFull {
                    bucket: idx,
                    capacity: SLOTS_PER_BUCKET,
                })
            }
        }
    }

    fn contains(&self, key: Key) -> bool {
        if self.len == 0 || key > self.max_key {
            return false;
        }
        let bucket = &self.buckets[self.bucket_index(key)];
        if bucket.find_key(key).is_some() {
            return true;
        }
        bucket.is_full() && self.stash.find(key).is_some()
    }

    fn remove(&mut self, key: Key) -> bool {
        if self.len == 0 || key > self.max_key {
            return false;
        }

        let idx = self.bucket_index(key);
        let was_full = self.buckets[idx].is_full();
        let removed = if self.buckets[idx].remove(key) {
            if was_full && !self.stash.is_empty() {
                self.refill_from_stash(idx);
            }
            true
        } else {
            was_full && self.stash.remove(key)
        };

        if removed {
            self.len -= 1;
            tracing::trace!(key, bucket = idx, "removed");
        }
        removed
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn max_key(&self) -> Key {
        self.max_key
    }

    fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.stash.clear();
        self.len = 0;
    }

    fn stats(&self) -> LoadStats {
        LoadStats {
            overflow: self.stash.len(),
            ..LoadStats::from_loads(self.len, self.buckets.iter().map(FlatBucket::count))
        }
    }

    fn keys(&self) -> Keys<'_> {
        Keys::new(
            self.buckets
                .iter()
                .flat_map(|bucket| bucket.iter())
                .chain(self.stash.iter()),
        )
    }
}

impl Default for FlatBucketSet {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
