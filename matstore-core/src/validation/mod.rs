//! Pure validation helpers
//!
//! Mathematical checks shared by the representations and the file backends.
//! No I/O dependencies.

pub mod bounds;
pub mod shape;

pub use bounds::{align_to_boundary, validate_array_bounds, validate_typed_slice};
pub use shape::{
    checked_len, ensure_multiplicable, ensure_nonzero, ensure_same_shape, ensure_stream_len,
};
