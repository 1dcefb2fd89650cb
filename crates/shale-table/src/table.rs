//! The chunked hash table.

use crate::TableError;
use crate::slab::{ChunkId, Slab};

/// Key/value slots per chunk, one occupancy bit each.
pub const CHUNK_LEN: usize = 16;

type Bitmap = u16;

const _: () = assert!(CHUNK_LEN == Bitmap::BITS as usize, "invalid bitmap storage size");

/// Compile-time parameters of a table instantiation: one implementation per
/// (key, value, hash, equality) combination.
pub trait TableSpec {
    type Key: Copy;
    type Value;

    /// Bucket count; must be a power of two.
    const BUCKETS: usize = 256;

    fn hash(key: &Self::Key) -> u32;
    fn eq(a: &Self::Key, b: &Self::Key) -> bool;
}

/// A chain node holding several entries.
///
/// The bitmap is the source of truth for occupancy: a set bit means the slot
/// holds a live key that is unique within the table. Clearing a bit marks
/// the slot reusable without touching its storage.
struct Chunk<K, V> {
    next: Option<ChunkId>,
    bitmap: Bitmap,
    slots: [Option<(K, V)>; CHUNK_LEN],
}

impl<K, V> Chunk<K, V> {
    fn new(next: Option<ChunkId>) -> Self {
        Chunk {
            next,
            bitmap: 0,
            slots: [const { None }; CHUNK_LEN],
        }
    }

    fn is_full(&self) -> bool {
        self.bitmap == Bitmap::MAX
    }

    /// Slot index holding a key equal to `key`, walking set bits only.
    fn scan<S: TableSpec<Key = K>>(&self, key: &K) -> Option<usize> {
        let mut bits = self.bitmap;
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            if let Some((stored, _)) = &self.slots[i] {
                if S::eq(stored, key) {
                    return Some(i);
                }
            }
            bits &= bits - 1;
        }
        None
    }

    /// Store into the lowest free slot. The caller checks `is_full` first.
    fn store(&mut self, key: K, value: V) {
        debug_assert!(!self.is_full());
        let i = (!self.bitmap).trailing_zeros() as usize;
        self.slots[i] = Some((key, value));
        self.bitmap |= 1 << i;
    }
}

/// A keyed map storing entries in bucket chains of bitmap-tracked chunks.
///
/// Chunks are only ever appended; `remove` clears an occupancy bit and the
/// slot becomes available to a later `insert` scanning that chain. All chunk
/// storage is released together on drop.
pub struct ChunkTable<S: TableSpec> {
    chunks: Slab<Chunk<S::Key, S::Value>>,
    buckets: Box<[Option<ChunkId>]>,
    len: usize,
}

impl<S: TableSpec> ChunkTable<S> {
    const BUCKETS_POW2: () = assert!(
        S::BUCKETS.is_power_of_two(),
        "bucket count must be a power of two"
    );

    /// Create an empty table.
    pub fn new() -> Self {
        let () = Self::BUCKETS_POW2;
        ChunkTable {
            chunks: Slab::new(),
            buckets: vec![None; S::BUCKETS].into_boxed_slice(),
            len: 0,
        }
    }

    fn bucket(key: &S::Key) -> usize {
        (S::hash(key) as usize) & (S::BUCKETS - 1)
    }

    /// Insert with set semantics: an equal key already in the bucket chain
    /// is overwritten in place and no new storage is used.
    pub fn insert(&mut self, key: S::Key, value: S::Value) -> Result<(), TableError> {
        let b = Self::bucket(&key);

        // Duplicate?
        let mut cursor = self.buckets[b];
        while let Some(id) = cursor {
            let chunk = self.chunks.get_mut(id);
            if let Some(i) = chunk.scan::<S>(&key) {
                chunk.slots[i] = Some((key, value));
                return Ok(());
            }
            cursor = chunk.next;
        }

        // Space anywhere in the existing chain?
        let mut cursor = self.buckets[b];
        while let Some(id) = cursor {
            let chunk = self.chunks.get_mut(id);
            if !chunk.is_full() {
                chunk.store(key, value);
                self.len += 1;
                return Ok(());
            }
            cursor = chunk.next;
        }

        // New chunk at the head of the chain.
        let mut chunk = Chunk::new(self.buckets[b]);
        chunk.store(key, value);
        let id = self.chunks.try_push(chunk)?;
        self.buckets[b] = Some(id);
        self.len += 1;
        Ok(())
    }

    /// Look up `key`; `None` means not found.
    pub fn search(&self, key: &S::Key) -> Option<&S::Value> {
        let mut cursor = self.buckets[Self::bucket(key)];
        while let Some(id) = cursor {
            let chunk = self.chunks.get(id);
            if let Some(i) = chunk.scan::<S>(key) {
                return chunk.slots[i].as_ref().map(|(_, v)| v);
            }
            cursor = chunk.next;
        }
        None
    }

    /// Clear the occupancy bit of `key`'s slot, if present. The slot storage
    /// is kept and reused by a later insert; nothing is freed here.
    pub fn remove(&mut self, key: &S::Key) {
        let mut cursor = self.buckets[Self::bucket(key)];
        while let Some(id) = cursor {
            let chunk = self.chunks.get_mut(id);
            if let Some(i) = chunk.scan::<S>(key) {
                chunk.bitmap &= !(1 << i);
                self.len -= 1;
                return;
            }
            cursor = chunk.next;
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<S: TableSpec> Default for ChunkTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
