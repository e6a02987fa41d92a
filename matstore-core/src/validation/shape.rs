//! Shape compatibility validation
//!
//! Every algebraic operation funnels its shape requirements through these
//! functions so mismatches surface as errors instead of silent no-ops.

use crate::error::MatrixError;

/// Validate that both dimensions are at least 1
pub const fn ensure_nonzero(rows: usize, cols: usize) -> Result<(), MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::ZeroDimension);
    }
    Ok(())
}

/// Buffer length for a shape, with overflow protection
pub const fn checked_len(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    match rows.checked_mul(cols) {
        Some(len) => Ok(len),
        None => Err(MatrixError::ArraySizeOverflow),
    }
}

/// Validate that two shapes are equal (addition/subtraction compatibility)
pub const fn ensure_same_shape(
    lhs: (usize, usize),
    rhs: (usize, usize),
) -> Result<(), MatrixError> {
    if lhs.0 != rhs.0 || lhs.1 != rhs.1 {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate that `lhs * rhs` is defined (lhs cols equal rhs rows)
pub const fn ensure_multiplicable(
    lhs: (usize, usize),
    rhs: (usize, usize),
) -> Result<(), MatrixError> {
    if lhs.1 != rhs.0 {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate an element stream length against the count a shape declares
pub const fn ensure_stream_len(expected: usize, actual: usize) -> Result<(), MatrixError> {
    if actual < expected {
        return Err(MatrixError::TruncatedStream);
    }
    if actual > expected {
        return Err(MatrixError::TrailingData);
    }
    Ok(())
}
