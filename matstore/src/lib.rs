//! Matstore - Matrix Storage with File Round-Trips
//!
//! This library provides three in-memory matrix representations (dense,
//! diagonal and block) behind one algebraic surface, plus plain-text and
//! binary file interchange.
//!
//! ## Architecture
//!
//! Matstore follows a clean specification/implementation separation:
//!
//! - **matstore-core**: Representations, traits, algebra, format definitions
//!   and validation (no I/O)
//! - **matstore**: Concrete file backends with text parsing and memory-mapped
//!   binary reads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matstore::{MatrixFile, MatrixStorage};
//!
//! fn example() -> Result<(), matstore::FileError> {
//!     // Load a matrix persisted in the binary format
//!     let file = MatrixFile::open("matrix.matx")?;
//!     let matrix = file.read_dense::<f64>()?;
//!
//!     let (rows, cols) = matrix.dimensions();
//!     println!("{rows} x {cols} matrix with {} non-zeros", matrix.nnz());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Uniform algebra**: add, subtract, scalar and element-wise multiply,
//!   matrix product and transpose on every representation
//! - **Structural zeros**: block matrices keep absent cells absent through
//!   the whole operation set
//! - **Memory-mapped I/O**: binary imports read the values region without
//!   an intermediate copy of the file
//! - **Type safety**: element types are checked against the file header
//!   before a single value is decoded

// Re-export core abstractions and format definitions
pub use matstore_core::{
    // Representations
    BlockMatrix, DenseMatrix, DiagonalMatrix, DiagonalStorage,
    // Core traits
    content_eq, MatrixElement, MatrixOps, MatrixStorage,
    // Format definitions
    DataType, MatrixHeader, StorageFormat,
    // Error handling
    MatrixError,
};

// Implementation modules
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap_backend;
pub mod text_backend;

// Public exports
pub use error::FileError;
pub use text_backend::{read_block, read_dense, read_diagonal, write_text};

// Memory mapping features
#[cfg(feature = "mmap")]
pub use mmap_backend::MatrixFile;
