//! Dictionaries keyed by interned strings.

use crate::hash::hash6432shift;
use crate::interner::{IStr, StringsError};
use shale_table::{ChunkTable, TableSpec};
use std::marker::PhantomData;

/// Dictionary spec: interned pointers are unique per content, so a fast
/// integer mix of the pointer value replaces content hashing, and equality
/// is pointer equality.
struct DictSpec<'i, V>(PhantomData<(&'i str, fn() -> V)>);

impl<'i, V> TableSpec for DictSpec<'i, V> {
    type Key = IStr<'i>;
    type Value = V;

    fn hash(key: &IStr<'i>) -> u32 {
        hash6432shift(key.addr() as u64)
    }

    fn eq(a: &IStr<'i>, b: &IStr<'i>) -> bool {
        a == b
    }
}

/// Maps interned strings to caller-supplied values.
///
/// A second instantiation of the chunk-table engine; all correctness leans
/// on the interner's pointer-identity guarantee.
pub struct Dict<'i, V> {
    table: ChunkTable<DictSpec<'i, V>>,
}

impl<'i, V> Dict<'i, V> {
    pub fn new() -> Self {
        Dict {
            table: ChunkTable::new(),
        }
    }

    /// Insert or overwrite the value stored under `key`.
    pub fn insert(&mut self, key: IStr<'i>, value: V) -> Result<(), StringsError> {
        self.table.insert(key, value).map_err(Into::into)
    }

    /// Look up `key`; `None` means not found.
    pub fn search(&self, key: IStr<'i>) -> Option<&V> {
        self.table.search(&key)
    }

    /// Remove the entry stored under `key`, if any. Its slot is recycled by
    /// a later insert.
    pub fn remove(&mut self, key: IStr<'i>) {
        self.table.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<V> Default for Dict<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}
