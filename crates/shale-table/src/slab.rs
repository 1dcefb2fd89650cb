//! Index-addressed chunk storage.
//!
//! Bucket chains are built from [`ChunkId`] handles into a [`Slab`] rather
//! than intrusive pointers. The slab is the single owner of every node, and
//! pushing a node plus relinking a chain head stays O(1).

use crate::TableError;

/// Handle to a chunk inside a [`Slab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkId(u32);

/// Append-only chunk storage. Nodes are never removed individually; the
/// whole slab is dropped at once.
pub(crate) struct Slab<T> {
    items: Vec<T>,
}

impl<T> Slab<T> {
    pub(crate) fn new() -> Self {
        Slab { items: Vec::new() }
    }

    pub(crate) fn try_push(&mut self, item: T) -> Result<ChunkId, TableError> {
        let id = u32::try_from(self.items.len()).map_err(|_| TableError::OutOfMemory)?;
        self.items
            .try_reserve(1)
            .map_err(|_| TableError::OutOfMemory)?;
        self.items.push(item);
        Ok(ChunkId(id))
    }

    pub(crate) fn get(&self, id: ChunkId) -> &T {
        &self.items[id.0 as usize]
    }

    pub(crate) fn get_mut(&mut self, id: ChunkId) -> &mut T {
        &mut self.items[id.0 as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
