//! Input buffers for the shale front end.
//!
//! The scanner consumes source text through the narrow [`Cursor`] interface:
//! one byte at a time, with save/restore of the position for backtracking.

mod buffer;

pub use buffer::{Cursor, InputBuffer};
