//! Set contract shared by both strategies, plus a strategy enum.

use crate::{
    chained::ChainedBucketSet,
    config::{SetConfig, Strategy},
    error::{Result, SetError},
    flat::FlatBucketSet,
    iter::Keys,
    Key,
};

/// Bounded-domain integer set
///
/// All operations are single-threaded and complete in bounded work. Mutation
/// takes `&mut self`; wrap the set in a lock for shared use.
pub trait BoundedIntSet {
    /// Inserts `key`.
    ///
    /// Returns `Ok(true)` if the key was newly inserted and `Ok(false)` if it
    /// was already present. Fails for keys above [`max_key`](Self::max_key),
    /// and for the flat strategy when the key's bucket and the overflow stash
    /// are both full.
    fn add(&mut self, key: Key) -> Result<bool>;

    /// Returns `true` if `key` is stored
    fn contains(&self, key: Key) -> bool;

    /// Removes `key`, returning whether it was present
    fn remove(&mut self, key: Key) -> bool;

    /// Number of stored keys
    fn len(&self) -> usize;

    /// Returns `true` if no key is stored
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets (fixed at construction)
    fn bucket_count(&self) -> usize;

    /// Largest key accepted by `add`
    fn max_key(&self) -> Key;

    /// Removes every key, keeping the allocated storage
    fn clear(&mut self);

    /// Bucket occupancy summary
    fn stats(&self) -> LoadStats;

    /// Iterates stored keys in bucket order
    fn keys(&self) -> Keys<'_>;
}

/// Reject keys above the domain
#[inline]
pub(crate) fn check_domain(key: Key, max_key: Key) -> Result<()> {
    if key > max_key {
        return Err(SetError::KeyOutOfDomain { key, max_key });
    }
    Ok(())
}

/// Bucket occupancy summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Stored keys
    pub len: usize,

    /// Total buckets
    pub bucket_count: usize,

    /// Buckets holding at least one key
    pub occupied_buckets: usize,

    /// Keys in the fullest bucket
    pub longest_bucket: usize,

    /// Keys held outside their bucket (flat overflow stash)
    pub overflow: usize,
}

impl LoadStats {
    pub(crate) fn from_loads<I>(len: usize, loads: I) -> Self
    where
        I: Iterator<Item = usize>,
    {
        let mut stats = Self {
            len,
            ..Self::default()
        };
        for load in loads {
            stats.bucket_count += 1;
            if load > 0 {
                stats.occupied_buckets += 1;
            }
            stats.longest_bucket = stats.longest_bucket.max(load);
        }
        stats
    }

    /// Mean keys per bucket
    #[inline]
    pub fn load_factor(&self) -> f64 {
        if self.bucket_count == 0 {
            0.0
        } else {
            self.len as f64 / self.bucket_count as f64
        }
    }
}

/// Either backing strategy, chosen by [`SetConfig::strategy`]
#[derive(Debug, Clone)]
pub enum BucketSet {
    Flat(FlatBucketSet),
    Chained(ChainedBucketSet),
}

impl BucketSet {
    /// Build the table selected by `config`
    pub fn from_config(config: &SetConfig) -> Result<Self> {
        match config.strategy {
            Strategy::Flat => FlatBucketSet::with_config(config).map(Self::Flat),
            Strategy::Chained => ChainedBucketSet::with_config(config).map(Self::Chained),
        }
    }

    /// Strategy backing this set
    #[inline]
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Flat(_) => Strategy::Flat,
            Self::Chained(_) => Strategy::Chained,
        }
    }
}

impl Default for BucketSet {
    fn default() -> Self {
        Self::Flat(FlatBucketSet::new())
    }
}

impl From<FlatBucketSet> for BucketSet {
    fn from(set: FlatBucketSet) -> Self {
        Self::Flat(set)
    }
}

impl From<ChainedBucketSet> for BucketSet {
    fn from(set: ChainedBucketSet) -> Self {
        Self::Chained(set)
    }
}

macro_rules! dispatch {
    ($self:ident, $set:ident => $body:expr) => {
        match $self {
            BucketSet::Flat($set) => $body,
            BucketSet::Chained($set) => $body,
        }
    };
}

impl BoundedIntSet for BucketSet {
    #[inline]
    fn add(&mut self, key: Key) -> Result<bool> {
        dispatch!(self, set => set.add(key))
    }

    #[inline]
    fn contains(&self, key: Key) -> bool {
        dispatch!(self, set => set.contains(key))
    }

    #[inline]
    fn remove(&mut self, key: Key) -> bool {
        dispatch!(self, set => set.remove(key))
    }

    #[inline]
    fn len(&self) -> usize {
        dispatch!(self, set => set.len())
    }

    #[inline]
    fn bucket_count(&self) -> usize {
        dispatch!(self, set => set.bucket_count())
    }

    #[inline]
    fn max_key(&self) -> Key {
        dispatch!(self, set => set.max_key())
    }

    fn clear(&mut self) {
        dispatch!(self, set => set.clear())
    }

    fn stats(&self) -> LoadStats {
        dispatch!(self, set => set.stats())
    }

    fn keys(&self) -> Keys<'_> {
        dispatch!(self, set => set.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_strategy() {
        let flat = BucketSet::from_config(&SetConfig::default()).unwrap();
        assert_eq!(flat.strategy(), Strategy::Flat);
        assert_eq!(flat.bucket_count(), 8192);

        let config = SetConfig::builder().strategy(Strategy::Chained).build();
        let chained = BucketSet::from_config(&config).unwrap();
        assert_eq!(chained.strategy(), Strategy::Chained);
        assert_eq!(chained.bucket_count(), 10_001);
    }

    #[test]
    fn test_from_config_invalid() {
        let config = SetConfig::builder().bucket_count(3).build();
        assert!(matches!(
            BucketSet::from_config(&config),
            Err(SetError::Config(_))
        ));
    }

    #[test]
    fn test_dispatch() {
        for strategy in [Strategy::Flat, Strategy::Chained] {
            let config = SetConfig::builder().strategy(strategy).build();
            let mut set = BucketSet::from_config(&config).unwrap();

            assert_eq!(set.add(3), Ok(true));
            assert!(set.contains(3));
            assert_eq!(set.keys().collect::<Vec<_>>(), vec![3]);
            assert_eq!(set.stats().occupied_buckets, 1);
            assert_eq!(set.stats().overflow, 0);
            assert!(set.remove(3));
            assert!(set.is_empty());
        }
    }

    #[test]
    fn test_check_domain() {
        assert!(check_domain(10, 10).is_ok());
        assert_eq!(
            check_domain(11, 10),
            Err(SetError::KeyOutOfDomain {
                key: 11,
                max_key: 10
            })
        );
    }

    #[test]
    fn test_load_stats() {
        let stats = LoadStats::from_loads(6, [0, 2, 4, 0].into_iter());
        assert_eq!(stats.bucket_count, 4);
        assert_eq!(stats.occupied_buckets, 2);
        assert_eq!(stats.longest_bucket, 4);
        assert!((stats.load_factor() - 1.5).abs() < f64::EPSILON);

        assert_eq!(LoadStats::default().load_factor(), 0.0);
    }
}
