//! Generational slab that owns every node of a [`Tree`](crate::Tree).
//!
//! Slots freed by `remove` are pushed onto a free list and reused by later calls to `alloc`.
//! Reusing a slot bumps its generation, so a [`NodeId`] handed out before the removal no longer
//! resolves to anything, even though its index is live again.

use std::fmt;
use std::ops::{Index, IndexMut};

/// A handle to a node stored in a tree.
///
/// Handles are cheap to copy and stay valid until the node they point at is deleted. A stale
/// handle is rejected by every operation that accepts one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Free { generation: u32, next_free: Option<usize> },
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    /// Head of the free list threaded through the `Free` entries.
    free_list_head: Option<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free_list_head: None,
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        self.len += 1;

        let Some(index) = self.free_list_head else {
            let index = self.entries.len();
            self.entries.push(Entry::Occupied {
                generation: 0,
                value,
            });
            return NodeId {
                index,
                generation: 0,
            };
        };

        let entry = &mut self.entries[index];
        let (generation, next_free) = match *entry {
            Entry::Free {
                generation,
                next_free,
            } => (generation.wrapping_add(1), next_free),
            Entry::Occupied { .. } => unreachable!("free list points at an occupied slot"),
        };
        *entry = Entry::Occupied { generation, value };
        self.free_list_head = next_free;

        NodeId { index, generation }
    }

    /// Removes the value behind `id`, returning it. Returns `None` if `id` is stale.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }

        let freed = Entry::Free {
            generation: id.generation,
            next_free: self.free_list_head,
        };
        let Entry::Occupied { value, .. } = std::mem::replace(&mut self.entries[id.index], freed)
        else {
            unreachable!("`contains` checked the slot is occupied");
        };
        self.free_list_head = Some(id.index);
        self.len -= 1;

        Some(value)
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.entries.get(id.index)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.entries.get_mut(id.index)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }
}

/// Indexing is for handles the tree knows to be live (ones reached through its own links).
/// It panics on a stale handle, like `Vec` does on an out-of-bounds index.
impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale node handle {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale node handle {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena[b], "b");
    }

    #[test]
    fn test_remove_frees_slot() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);

        assert_eq!(arena.remove(a), Some(1));
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);

        // Removing twice is harmless.
        assert_eq!(arena.remove(a), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_reused_slot_rejects_old_handle() {
        let mut arena = Arena::new();
        let old = arena.alloc(1);
        arena.remove(old);

        let new = arena.alloc(2);
        assert_eq!(old.index, new.index);
        assert_ne!(old, new);

        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|x| arena.alloc(x)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);

        assert_eq!(arena.alloc(10).index, ids[3].index);
        assert_eq!(arena.alloc(11).index, ids[1].index);
        assert_eq!(arena.alloc(12).index, 4);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    #[should_panic(expected = "stale node handle")]
    fn test_index_stale_panics() {
        let mut arena = Arena::new();
        let id = arena.alloc(());
        arena.remove(id);
        let _ = &arena[id];
    }
}
