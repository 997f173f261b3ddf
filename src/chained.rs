//! Chained set.
//!
//! - Boxed slice of chains, one per bucket, allocated once
//! - Bucket index is `key % bucket_count`
//! - Chain nodes live in an `EntryArena` owned by the set
//! - Chains are unbounded, so in-domain adds never fail

use crate::{
    arena::{EntryArena, NodeId},
    config::{SetConfig, Strategy, DEFAULT_ARENA_NODES, DEFAULT_CHAINED_BUCKETS},
    error::Result,
    hash::chained_bucket_index,
    iter::Keys,
    set::{check_domain, BoundedIntSet, LoadStats},
    Key, DEFAULT_MAX_KEY,
};

/// Singly linked chain node
#[derive(Debug, Clone, Copy)]
struct Node {
    key: Key,
    next: Option<NodeId>,
}

/// Per-bucket chain (head, tail and length)
#[derive(Debug, Clone, Copy, Default)]
struct Chain {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

/// Fixed-bucket integer set with arena-backed chains
#[derive(Debug, Clone)]
pub struct ChainedBucketSet {
    chains: Box<[Chain]>,
    arena: EntryArena<Node>,
    len: usize,
    max_key: Key,
}

/// Iterator over the keys of one chain, in insertion order
pub struct ChainIter<'a> {
    arena: &'a EntryArena<Node>,
    cursor: Option<NodeId>,
}

impl Iterator for ChainIter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.cursor?)?;
        self.cursor = node.next;
        Some(node.key)
    }
}

impl ChainedBucketSet {
    /// Create an empty set with 10_001 buckets, an arena reserved for
    /// 10_000 nodes and the default key domain
    pub fn new() -> Self {
        Self::allocate(DEFAULT_CHAINED_BUCKETS, DEFAULT_MAX_KEY, DEFAULT_ARENA_NODES)
    }

    /// Create an empty set from `config`; its strategy field is ignored
    pub fn with_config(config: &SetConfig) -> Result<Self> {
        let config = SetConfig {
            strategy: Strategy::Chained,
            ..config.clone()
        };
        config.validate()?;
        Ok(Self::allocate(
            config.resolved_bucket_count(),
            config.max_key,
            config.arena_capacity,
        ))
    }

    fn allocate(bucket_count: usize, max_key: Key, arena_capacity: usize) -> Self {
        let chains = vec![Chain::default(); bucket_count].into_boxed_slice();
        tracing::debug!(
            buckets = bucket_count,
            arena_capacity,
            max_key,
            "allocated chained bucket set"
        );
        Self {
            chains,
            arena: EntryArena::with_capacity(arena_capacity),
            len: 0,
            max_key,
        }
    }

    /// Bucket selected for `key`
    #[inline]
    pub fn bucket_index(&self, key: Key) -> usize {
        chained_bucket_index(key, self.chains.len())
    }

    /// Length of the chain in bucket `idx`
    #[inline]
    pub fn chain_len(&self, idx: usize) -> Option<usize> {
        self.chains.get(idx).map(|chain| chain.len)
    }

    /// Keys of bucket `idx`, in insertion order
    pub fn chain(&self, idx: usize) -> ChainIter<'_> {
        ChainIter {
            arena: &self.arena,
            cursor: self.chains.get(idx).and_then(|chain| chain.head),
        }
    }

    /// Arena slots carved so far (live + recycled)
    #[inline]
    pub fn arena_capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Nodes the arena holds without reallocating
    #[inline]
    pub fn arena_reserved(&self) -> usize {
        self.arena.reserved()
    }

    /// Arena slots waiting for reuse
    #[inline]
    pub fn free_nodes(&self) -> usize {
        self.arena.free_slots()
    }
}

impl BoundedIntSet for ChainedBucketSet {
    fn add(&mut self, key: Key) -> Result<bool> {
        check_domain(key, self.max_key)?;

        let idx = self.bucket_index(key);
        if self.chain(idx).any(|k| k == key) {
            return Ok(false);
        }

        let id = self.arena.alloc(Node { key, next: None });
        let chain = &mut self.chains[idx];
        match chain.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(tail) => tail.next = Some(id),
            None => chain.head = Some(id),
        }
        chain.tail = Some(id);
        chain.len += 1;
        self.len += 1;

        tracing::trace!(key, bucket = idx, chain_len = chain.len, "inserted");
        Ok(true)
    }

    fn contains(&self, key: Key) -> bool {
        if key > self.max_key {
            return false;
        }
        self.chain(self.bucket_index(key)).any(|k| k == key)
    }

    fn remove(&mut self, key: Key) -> bool {
        if key > self.max_key {
            return false;
        }

        let idx = self.bucket_index(key);
        let chain = &mut self.chains[idx];
        let mut prev: Option<NodeId> = None;
        let mut cursor = chain.head;

        while let Some(id) = cursor {
            let Some(&Node { key: node_key, next }) = self.arena.get(id) else {
                break;
            };

            if node_key == key {
                // unlink
                match prev.and_then(|p| self.arena.get_mut(p)) {
                    Some(prev_node) => prev_node.next = next,
                    None => chain.head = next,
                }
                if chain.tail == Some(id) {
                    chain.tail = prev;
                }
                chain.len -= 1;
                self.arena.release(id);
                self.len -= 1;

                tracing::trace!(key, bucket = idx, "removed");
                return true;
            }

            prev = Some(id);
            cursor = next;
        }
        false
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    #[inline]
    fn max_key(&self) -> Key {
        self.max_key
    }

    fn clear(&mut self) {
        self.chains.fill(Chain::default());
        self.arena.clear();
        self.len = 0;
    }

    fn stats(&self) -> LoadStats {
        LoadStats::from_loads(self.len, self.chains.iter().map(|chain| chain.len))
    }

    fn keys(&self) -> Keys<'_> {
        let arena = &self.arena;
        Keys::new(self.chains.iter().flat_map(move |chain| ChainIter {
            arena,
            cursor: chain.head,
        }))
    }
}

impl Default for ChainedBucketSet {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
