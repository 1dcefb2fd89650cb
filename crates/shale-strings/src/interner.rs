//! The string interner.

use crate::hash::{hash6432shift, sdbm};
use shale_arena::Arena;
use shale_table::{ChunkTable, TableError, TableSpec};
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

/// Errors produced by string storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StringsError {
    /// The arena or the lookup table could not grow.
    #[error("out of memory storing a string")]
    OutOfMemory,
}

impl From<TableError> for StringsError {
    fn from(_: TableError) -> Self {
        StringsError::OutOfMemory
    }
}

/// An interned string, borrowed from its [`Interner`].
///
/// Equal content always yields the identical pointer for the lifetime of a
/// single interner, so equality and hashing here are pointer operations,
/// never content comparisons.
#[derive(Clone, Copy)]
pub struct IStr<'i> {
    text: &'i str,
}

impl<'i> IStr<'i> {
    pub fn as_str(self) -> &'i str {
        self.text
    }

    /// The unique address identifying this string's content.
    pub(crate) fn addr(self) -> usize {
        self.text.as_ptr() as usize
    }

    pub fn len(self) -> usize {
        self.text.len()
    }

    pub fn is_empty(self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for IStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text.as_ptr(), other.text.as_ptr())
    }
}

impl Eq for IStr<'_> {}

impl std::hash::Hash for IStr<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(hash6432shift(self.addr() as u64));
    }
}

impl fmt::Debug for IStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IStr({:?})", self.text)
    }
}

impl fmt::Display for IStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Lookup table spec: content hash, content equality.
///
/// Keys are arena-backed strings owned by the enclosing [`Inner`]; the
/// `'static` lifetime is a private fiction that never escapes this module.
struct ContentSpec;

impl TableSpec for ContentSpec {
    type Key = &'static str;
    type Value = &'static str;

    fn hash(key: &&'static str) -> u32 {
        sdbm(key.as_bytes())
    }

    fn eq(a: &&'static str, b: &&'static str) -> bool {
        a == b
    }
}

struct Inner {
    arena: Arena,
    table: ChunkTable<ContentSpec>,
}

/// Canonical string storage: one arena for the bytes, one content-addressed
/// table mapping each stored string to itself.
///
/// Single-threaded by construction (interior mutability via `RefCell`);
/// callers that need cross-thread interning must wrap the interner in a
/// lock.
pub struct Interner {
    inner: RefCell<Inner>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            inner: RefCell::new(Inner {
                arena: Arena::new(),
                table: ChunkTable::new(),
            }),
        }
    }

    /// Intern `text`: return the existing canonical string for this content,
    /// or copy it into the arena and remember it.
    pub fn intern<'i>(&'i self, text: &str) -> Result<IStr<'i>, StringsError> {
        let mut inner = self.inner.borrow_mut();

        // Lifetime laundering for the lookup only: the query key merely has
        // to outlive the `search` call, and table keys are never retained
        // past it.
        let query: &'static str = unsafe { std::mem::transmute::<&str, &'static str>(text) };
        if let Some(&stored) = inner.table.search(&query) {
            return Ok(IStr { text: stored });
        }

        let ptr = inner
            .arena
            .alloc_copy(text.as_bytes())
            .ok_or(StringsError::OutOfMemory)?;
        // SAFETY: the block holds a verbatim copy of a valid `&str`, arena
        // blocks never move, and the bytes stay live until the arena is
        // dropped together with every `IStr` borrowing `self`. The only
        // `free` of this block is on the error path below, before the
        // string escapes.
        let stored: &'static str = unsafe {
            std::str::from_utf8_unchecked(std::slice::from_raw_parts(ptr.as_ptr(), text.len()))
        };

        if inner.table.insert(stored, stored).is_err() {
            inner.arena.free(ptr);
            return Err(StringsError::OutOfMemory);
        }

        Ok(IStr { text: stored })
    }

    /// Number of distinct strings stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
