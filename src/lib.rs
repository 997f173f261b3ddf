//! # bucketset
//!
//! Fixed-capacity integer sets built from scratch, with two storage strategies
//! behind one contract:
//!
//! - [`FlatBucketSet`]: flat open-addressed table, 4 inline slots per bucket,
//!   FNV-1a bucket selection, fixed overflow stash, no allocation after
//!   construction
//! - [`ChainedBucketSet`]: modulo bucket selection, unbounded per-bucket chains
//!   carved from an arena owned by the set
//!
//! ```text
//!   add / contains / remove        (BoundedIntSet)
//!            │
//!   bucket selection               (hash)
//!            │
//!   ┌────────┴─────────┐
//!   ▼                  ▼
//! FlatBucket        Chain ──► EntryArena
//! [Option<u32>; 4]
//!   └─► OverflowStash
//! ```
//!
//! Keys are `u32` in `0..=max_key` (1_000_000 by default). Tables are never
//! resized; the default sizes cover about 10^4 operations.

pub mod arena;
pub mod bucket;
pub mod chained;
pub mod config;
pub mod error;
pub mod flat;
pub mod hash;
pub mod iter;
pub mod set;
pub mod stash;

pub use chained::ChainedBucketSet;
pub use config::{SetConfig, Strategy};
pub use error::{Result, SetError};
pub use flat::FlatBucketSet;
pub use set::{BoundedIntSet, BucketSet, LoadStats};

/// Key type stored by every set in this crate
pub type Key = u32;

/// Largest key accepted by default
pub const DEFAULT_MAX_KEY: Key = 1_000_000;
