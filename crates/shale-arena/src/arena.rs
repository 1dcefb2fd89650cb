//! The block arena.
//!
//! The arena keeps a list of all live blocks of all sizes and a second list
//! of released blocks. No chunk spaces are carved up; every allocation is
//! its own block. Not the most space-efficient scheme, but it allows for
//! maximum flexibility, and released blocks are recycled best-fit without
//! any coalescing.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ptr::NonNull;

/// Worst-case scalar alignment. Every pointer handed out by the arena is
/// aligned to this, so a block can hold any scalar the front end stores.
pub const ALIGN: usize = 16;

/// One system allocation owned by the arena.
struct Block {
    ptr: NonNull<u8>,
    size: usize,
}

impl Block {
    fn layout(size: usize) -> Option<Layout> {
        Layout::from_size_align(size, ALIGN).ok()
    }

    /// Return the block's memory to the system allocator.
    fn release(self) {
        // SAFETY: `ptr` was obtained from `alloc_zeroed` with this exact
        // layout and is released exactly once (`release` consumes the block).
        if let Some(layout) = Self::layout(self.size) {
            unsafe { dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

/// A bump-free block pool: allocations stay live until [`Arena::free`] moves
/// them to the free list, and free-list memory is only returned to the
/// system by [`Arena::trim`] or on drop.
pub struct Arena {
    allocated: Vec<Block>,
    free: Vec<Block>,
}

impl Arena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Arena {
            allocated: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocate a zero-initialized block of at least `bytes`, aligned to
    /// [`ALIGN`]. Returns `None` if the system allocator fails.
    ///
    /// The free list is checked first for the smallest released block that
    /// can hold the request. A reused block keeps its original size; the
    /// internal fragmentation is the price of reuse without coalescing.
    pub fn alloc(&mut self, bytes: usize) -> Option<NonNull<u8>> {
        let mut best: Option<usize> = None;
        for (i, block) in self.free.iter().enumerate() {
            if block.size >= bytes && best.is_none_or(|b| block.size < self.free[b].size) {
                best = Some(i);
            }
        }

        if let Some(i) = best {
            let block = self.free.swap_remove(i);
            // SAFETY: the block owns `size` bytes starting at `ptr`.
            unsafe { std::ptr::write_bytes(block.ptr.as_ptr(), 0, block.size) };
            let ptr = block.ptr;
            self.allocated.push(block);
            return Some(ptr);
        }

        self.allocated.try_reserve(1).ok()?;

        let size = bytes.max(1);
        let layout = Block::layout(size)?;
        // SAFETY: `layout` has non-zero size.
        let ptr = NonNull::new(unsafe { alloc_zeroed(layout) })?;
        self.allocated.push(Block { ptr, size });
        Some(ptr)
    }

    /// Allocate a block holding a copy of `bytes`. Any reuse slack past the
    /// copied region stays zeroed.
    pub fn alloc_copy(&mut self, bytes: &[u8]) -> Option<NonNull<u8>> {
        let ptr = self.alloc(bytes.len())?;
        // SAFETY: the block holds at least `bytes.len()` bytes and the
        // source slice cannot overlap a freshly allocated block.
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len()) };
        Some(ptr)
    }

    /// Move the block owning `ptr` to the free list. The memory is retained
    /// for reuse, not returned to the system.
    ///
    /// `ptr` must have been returned by [`Arena::alloc`] on this arena and
    /// not freed since; violating that is caught by a debug assertion only.
    pub fn free(&mut self, ptr: NonNull<u8>) {
        if let Some(i) = self.allocated.iter().position(|block| block.ptr == ptr) {
            let block = self.allocated.swap_remove(i);
            self.free.push(block);
        } else {
            debug_assert!(false, "pointer was not allocated from this arena");
        }
    }

    /// Return every free-list block to the system allocator. Idempotent.
    pub fn trim(&mut self) {
        for block in self.free.drain(..) {
            block.release();
        }
    }

    /// Number of live blocks.
    pub fn allocated_blocks(&self) -> usize {
        self.allocated.len()
    }

    /// Number of released blocks retained for reuse.
    pub fn free_blocks(&self) -> usize {
        self.free.len()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.trim();
        for block in self.allocated.drain(..) {
            block.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_aligned(ptr: NonNull<u8>) -> bool {
        (ptr.as_ptr() as usize) & (ALIGN - 1) == 0
    }

    #[test]
    fn alloc_is_aligned_and_zeroed() {
        let mut arena = Arena::new();
        for size in [0, 1, 7, 10, 64, 1000] {
            let ptr = arena.alloc(size).unwrap();
            assert!(is_aligned(ptr));
            // SAFETY: the block holds at least `size` bytes.
            let data = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), size) };
            assert!(data.iter().all(|&b| b == 0));
        }
        assert_eq!(arena.allocated_blocks(), 6);
        assert_eq!(arena.free_blocks(), 0);
    }

    #[test]
    fn free_then_alloc_reuses_best_fit() {
        let mut arena = Arena::new();
        let big = arena.alloc(64).unwrap();
        let small = arena.alloc(16).unwrap();
        arena.free(big);
        arena.free(small);
        assert_eq!(arena.free_blocks(), 2);

        // The 16-byte block is the smallest that fits a 10-byte request.
        let reused = arena.alloc(10).unwrap();
        assert_eq!(reused, small);
        assert_eq!(arena.free_blocks(), 1);

        // The remaining 64-byte block serves anything up to its size.
        let reused = arena.alloc(64).unwrap();
        assert_eq!(reused, big);
        assert_eq!(arena.free_blocks(), 0);
    }

    #[test]
    fn reused_block_is_rezeroed() {
        let mut arena = Arena::new();
        let ptr = arena.alloc(32).unwrap();
        // SAFETY: the block holds 32 bytes.
        unsafe { std::ptr::write_bytes(ptr.as_ptr(), 0xAB, 32) };
        arena.free(ptr);

        let reused = arena.alloc(32).unwrap();
        assert_eq!(reused, ptr);
        // SAFETY: same block, 32 bytes.
        let data = unsafe { std::slice::from_raw_parts(reused.as_ptr(), 32) };
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn trim_empties_the_free_list() {
        let mut arena = Arena::new();
        let a = arena.alloc(8).unwrap();
        let b = arena.alloc(8).unwrap();
        arena.free(a);
        arena.free(b);
        arena.trim();
        assert_eq!(arena.free_blocks(), 0);
        arena.trim();
        assert_eq!(arena.free_blocks(), 0);
    }

    #[test]
    fn alloc_copy_stores_the_bytes() {
        let mut arena = Arena::new();
        let ptr = arena.alloc_copy(b"hello").unwrap();
        // SAFETY: the block holds 5 copied bytes.
        let data = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), 5) };
        assert_eq!(data, b"hello");
    }
}
