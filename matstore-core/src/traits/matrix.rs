//! Core matrix abstraction traits
//!
//! `MatrixStorage` is the minimal representation-agnostic access interface;
//! `MatrixOps` is the uniform algebraic surface every representation
//! implements on top of it.

use rand::Rng;

use super::element::MatrixElement;
use crate::error::Result;
use crate::format::StorageFormat;

/// Representation-agnostic access to a matrix's logical contents
pub trait MatrixStorage {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Number of non-zero (or, for block storage, present) cells
    fn nnz(&self) -> usize;

    /// Get an element at the specified position
    ///
    /// Returns `None` if the element is zero (structural or stored) or if
    /// the position is out of bounds.
    fn get(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Logical value at an in-bounds position; zero where `get` is `None`
    fn value_at(&self, row: usize, col: usize) -> Self::Element {
        self.get(row, col).unwrap_or_else(Self::Element::zero)
    }

    /// The storage format tag used for file interchange
    fn storage_format(&self) -> StorageFormat;
}

/// The algebraic operation set shared by all representations
///
/// Binary operations mutate the receiver in place and treat the right-hand
/// operand as read-only. Multiplication is the exception: it allocates one
/// fresh result matrix per call. Shape mismatches are always surfaced as
/// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch),
/// never skipped silently.
pub trait MatrixOps: MatrixStorage + Sized {
    /// The representation produced by [`MatrixOps::matmul`]
    type Product: MatrixStorage<Element = Self::Element>;

    /// Fill the matrix with values drawn uniformly from `[min, max)`
    ///
    /// Fails with `InvalidRange` when `min >= max` (or the bounds are
    /// unordered); the receiver is left in its prior state.
    fn fill_random<R: Rng + ?Sized>(
        &mut self,
        min: Self::Element,
        max: Self::Element,
        rng: &mut R,
    ) -> Result<()>;

    /// Element-wise in-place addition; operands must share a shape
    fn add_assign(&mut self, other: &Self) -> Result<()>;

    /// Element-wise in-place subtraction; operands must share a shape
    fn sub_assign(&mut self, other: &Self) -> Result<()>;

    /// Element-wise (Hadamard) in-place product; operands must share a shape
    fn elem_mul_assign(&mut self, other: &Self) -> Result<()>;

    /// Multiply every stored value by a scalar, in place
    fn scale(&mut self, factor: Self::Element);

    /// Matrix product into a fresh result of shape (self.rows, other.cols)
    ///
    /// Requires `self.cols == other.rows`. The right operand may use any
    /// representation; structural zeros contribute nothing.
    fn matmul<M>(&self, other: &M) -> Result<Self::Product>
    where
        M: MatrixStorage<Element = Self::Element>;

    /// Transpose in place
    ///
    /// Builds a fresh (cols, rows) buffer and atomically replaces the owned
    /// storage; no partial state is visible between the two shapes.
    fn transpose(&mut self);
}

/// Compare the logical contents of two matrices of any representation
///
/// Equal when shapes match and every cell holds the same logical value; a
/// present zero and a structurally absent cell compare equal.
pub fn content_eq<A, B>(a: &A, b: &B) -> bool
where
    A: MatrixStorage,
    B: MatrixStorage<Element = A::Element>,
{
    if a.dimensions() != b.dimensions() {
        return false;
    }
    let (rows, cols) = a.dimensions();
    for i in 0..rows {
        for j in 0..cols {
            if a.value_at(i, j) != b.value_at(i, j) {
                return false;
            }
        }
    }
    true
}
