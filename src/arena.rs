//! Node arena for the chained table.
//!
//! Nodes are carved from one growable slot vector and addressed by index.
//! Released slots go onto a free list and are handed out again by later
//! allocations; memory only returns to the allocator when the arena drops.

/// Index of a node inside an [`EntryArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index-addressed pool with bulk release on drop
#[derive(Debug, Clone)]
pub struct EntryArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
    len: usize,
}

impl<T> EntryArena<T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena with room for `capacity` nodes before it grows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no node is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots ever carved (live + free)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots the arena holds before its storage reallocates
    #[inline]
    pub fn reserved(&self) -> usize {
        self.slots.capacity()
    }

    /// Released slots waiting for reuse
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Store `value`, reusing a released slot when one exists
    pub fn alloc(&mut self, value: T) -> NodeId {
        self.len += 1;
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Some(value);
            return id;
        }
        let id = NodeId(self.slots.len());
        self.slots.push(Some(value));
        id
    }

    /// Take the value out of `id` and recycle its slot
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Drop every node, keeping the slot vector's allocation
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<T> Default for EntryArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
