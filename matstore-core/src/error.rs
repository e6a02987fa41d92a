//! Error types for matrix operations

/// Errors that can occur during matrix construction, algebra and interchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix constructed with zero rows or columns
    ZeroDimension,
    /// Backing storage could not be reserved
    AllocationFailed,
    /// Random fill called with an empty or unordered value range
    InvalidRange,
    /// Operand shapes incompatible for the requested operation
    DimensionMismatch,
    /// Diagonal invariant violated, or matrix never initialized
    NotDiagonal,
    /// Diagonal operands mix compacted and expanded storage
    StorageMismatch,
    /// Cell index outside the matrix shape
    IndexOutOfBounds,
    /// Invalid file header format
    InvalidHeader,
    /// Unsupported format version or storage format
    UnsupportedFormat,
    /// Stored element type does not match the requested one
    DataTypeMismatch,
    /// Element stream shorter than the declared shape requires
    TruncatedStream,
    /// Element stream longer than the declared shape requires
    TrailingData,
    /// Byte region not aligned to the element size
    ArrayAlignment,
    /// Array size calculation would overflow
    ArraySizeOverflow,
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MatrixError::ZeroDimension => "Matrix dimensions must be at least 1x1",
            MatrixError::AllocationFailed => "Failed to allocate backing storage",
            MatrixError::InvalidRange => "Fill range requires min < max",
            MatrixError::DimensionMismatch => "Operand shapes are incompatible",
            MatrixError::NotDiagonal => "Matrix is not diagonal",
            MatrixError::StorageMismatch => "Operands mix compacted and expanded storage",
            MatrixError::IndexOutOfBounds => "Cell index out of bounds",
            MatrixError::InvalidHeader => "Invalid matrix file header",
            MatrixError::UnsupportedFormat => "Unsupported format version",
            MatrixError::DataTypeMismatch => "Stored element type mismatch",
            MatrixError::TruncatedStream => "Element stream shorter than declared shape",
            MatrixError::TrailingData => "Element stream longer than declared shape",
            MatrixError::ArrayAlignment => "Byte region not aligned to element size",
            MatrixError::ArraySizeOverflow => "Array size calculation overflow",
        };
        write!(f, "{msg}")
    }
}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
