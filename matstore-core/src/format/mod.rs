//! Binary format definitions for the matrix file layout
//!
//! Pure data structure definitions for the on-disk format. No I/O operations
//! or concrete implementations - only format specifications.

pub mod constants;
pub mod header;

pub use header::{DataType, MatrixHeader, StorageFormat};
