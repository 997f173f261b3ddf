//! Configuration for bucketset
//!
//! Table sizing and strategy selection with defaults matching the
//! 10^4-operation, `0..=10^6` key contract.

use crate::{
    error::{Result, SetError},
    Key, DEFAULT_MAX_KEY,
};

/// Default bucket count of the flat table (8192 x 4 = 32768 slots)
pub const DEFAULT_FLAT_BUCKETS: usize = 8192;

/// Default overflow stash slots of the flat table
pub const DEFAULT_FLAT_STASH_SLOTS: usize = 1024;

/// Default bucket count of the chained table (call-volume bound + 1)
pub const DEFAULT_CHAINED_BUCKETS: usize = 10_001;

/// Default nodes reserved in the chained arena (the call-volume bound)
pub const DEFAULT_ARENA_NODES: usize = DEFAULT_CHAINED_BUCKETS - 1;

/// Backing table used by [`BucketSet`](crate::BucketSet)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Fixed-size inline buckets, open addressing within the bucket
    #[default]
    Flat,

    /// Unbounded per-bucket chains backed by an arena
    Chained,
}

/// Sizing and domain settings for a set
#[derive(Debug, Clone)]
pub struct SetConfig {
    /// Which table to build
    pub strategy: Strategy,

    /// Bucket count override; `None` picks the strategy default
    pub bucket_count: Option<usize>,

    /// Largest key accepted by `add`
    pub max_key: Key,

    /// Overflow stash slots of the flat table (ignored by chained)
    pub stash_slots: usize,

    /// Nodes reserved up front in the chained arena (ignored by flat)
    pub arena_capacity: usize,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Flat,
            bucket_count: None,
            max_key: DEFAULT_MAX_KEY,
            stash_slots: DEFAULT_FLAT_STASH_SLOTS,
            arena_capacity: DEFAULT_ARENA_NODES,
        }
    }
}

impl SetConfig {
    /// Create a new config builder
    pub fn builder() -> SetConfigBuilder {
        SetConfigBuilder::default()
    }

    /// Bucket count after applying the strategy default
    pub fn resolved_bucket_count(&self) -> usize {
        self.bucket_count.unwrap_or(match self.strategy {
            Strategy::Flat => DEFAULT_FLAT_BUCKETS,
            Strategy::Chained => DEFAULT_CHAINED_BUCKETS,
        })
    }

    /// Check the sizing constraints of the selected strategy
    pub fn validate(&self) -> Result<()> {
        let buckets = self.resolved_bucket_count();
        if buckets == 0 {
            return Err(SetError::Config("bucket count must be non-zero".into()));
        }
        // bucket indices are derived from 32-bit hashes and keys
        if buckets > u32::MAX as usize {
            return Err(SetError::Config(format!(
                "bucket count {buckets} exceeds the 32-bit index range"
            )));
        }
        if self.strategy == Strategy::Flat && !buckets.is_power_of_two() {
            return Err(SetError::Config(format!(
                "flat bucket count {buckets} must be a power of two"
            )));
        }
        Ok(())
    }
}

/// Builder for SetConfig
#[derive(Default)]
pub struct SetConfigBuilder {
    config: SetConfig,
}

impl SetConfigBuilder {
    /// Set the backing strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Override the bucket count
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.config.bucket_count = Some(count);
        self
    }

    /// Set the largest accepted key
    pub fn max_key(mut self, max_key: Key) -> Self {
        self.config.max_key = max_key;
        self
    }

    /// Set the flat overflow stash size
    pub fn stash_slots(mut self, slots: usize) -> Self {
        self.config.stash_slots = slots;
        self
    }

    /// Reserve arena nodes for the chained strategy
    pub fn arena_capacity(mut self, nodes: usize) -> Self {
        self.config.arena_capacity = nodes;
        self
    }

    /// Finish building the config
    pub fn build(self) -> SetConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SetConfig::default();
        assert_eq!(config.strategy, Strategy::Flat);
        assert_eq!(config.max_key, 1_000_000);
        assert_eq!(config.resolved_bucket_count(), 8192);
        assert_eq!(config.stash_slots, 1024);
        assert_eq!(config.arena_capacity, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_sizing() {
        let config = SetConfig::builder()
            .stash_slots(0)
            .arena_capacity(64)
            .build();
        assert_eq!(config.stash_slots, 0);
        assert_eq!(config.arena_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chained_default_buckets() {
        let config = SetConfig::builder().strategy(Strategy::Chained).build();
        assert_eq!(config.resolved_bucket_count(), 10_001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flat_rejects_non_power_of_two() {
        let config = SetConfig::builder().bucket_count(1000).build();
        assert!(matches!(config.validate(), Err(SetError::Config(_))));
    }

    #[test]
    fn test_chained_accepts_any_non_zero() {
        let config = SetConfig::builder()
            .strategy(Strategy::Chained)
            .bucket_count(1000)
            .build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_buckets_rejected() {
        for strategy in [Strategy::Flat, Strategy::Chained] {
            let config = SetConfig::builder()
                .strategy(strategy)
                .bucket_count(0)
                .build();
            assert!(matches!(config.validate(), Err(SetError::Config(_))));
        }
    }
}
