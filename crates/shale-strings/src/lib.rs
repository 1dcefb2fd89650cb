//! Canonical string storage for the shale front end.
//!
//! The [`Interner`] stores each distinct string once, so equal content
//! always yields the identical pointer and every later comparison is a
//! pointer comparison. [`Dict`] maps those interned identities to opaque
//! values using pointer hashing.

mod dict;
mod hash;
mod interner;

pub use dict::Dict;
pub use interner::{IStr, Interner, StringsError};
