//! Arena allocation for the shale front end.
//!
//! A compiler front end allocates many small objects with similar lifetimes.
//! The [`Arena`] hands them out cheaply and keeps released blocks on a free
//! list for reuse instead of returning them to the system allocator.

mod arena;

pub use arena::{ALIGN, Arena};
