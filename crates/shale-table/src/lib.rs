//! Chunked hash tables for the shale front end.
//!
//! [`ChunkTable`] is a keyed map parameterized by a [`TableSpec`] (key and
//! value types, hash and equality functions, bucket count). Entries live in
//! fixed-capacity chunks tracked by an occupancy bitmap, so a bucket chain
//! walks a few cache lines instead of one node per entry.

mod slab;
mod table;

pub use table::{CHUNK_LEN, ChunkTable, TableSpec};

use thiserror::Error;

/// Errors produced by table mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The chunk storage could not grow.
    #[error("out of memory growing the chunk storage")]
    OutOfMemory,
}
