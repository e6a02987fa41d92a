//! Diagonal matrix representation
//!
//! Only the main diagonal may hold non-zero values. Storage starts as a full
//! row-major buffer (the expanded form) and can be compacted down to a
//! min(rows, cols) diagonal buffer once the invariant is verified. Compaction
//! is one-way.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::format::StorageFormat;
use crate::traits::{MatrixElement, MatrixOps, MatrixStorage};
use crate::validation::{checked_len, ensure_multiplicable, ensure_nonzero, ensure_same_shape};

/// Backing storage of a diagonal matrix
///
/// `Expanded` holds the full rows*cols buffer with every off-diagonal cell
/// exactly zero; `Compacted` holds only the diagonal, indexed by k for
/// logical position (k, k).
#[derive(Debug, Clone, PartialEq)]
pub enum DiagonalStorage<T> {
    /// Full row-major buffer
    Expanded(Vec<T>),
    /// Diagonal-only buffer of length min(rows, cols)
    Compacted(Vec<T>),
}

/// Matrix whose non-zero entries all lie on the main diagonal
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalMatrix<T> {
    rows: usize,
    cols: usize,
    storage: DiagonalStorage<T>,
    initialized: bool,
}

impl<T: MatrixElement> DiagonalMatrix<T> {
    /// Create a zero-filled matrix of the given shape, in expanded form
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        ensure_nonzero(rows, cols)?;
        let len = checked_len(rows, cols)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailed)?;
        data.resize(len, T::zero());

        Ok(Self {
            rows,
            cols,
            storage: DiagonalStorage::Expanded(data),
            initialized: false,
        })
    }

    /// Create a compacted matrix from its diagonal values
    ///
    /// The buffer length must equal `min(rows, cols)`.
    pub fn from_diagonal(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        ensure_nonzero(rows, cols)?;
        if values.len() != rows.min(cols) {
            return Err(MatrixError::DimensionMismatch);
        }
        Ok(Self {
            rows,
            cols,
            storage: DiagonalStorage::Compacted(values),
            initialized: true,
        })
    }

    /// Create an expanded matrix from a full row-major buffer
    ///
    /// Fails with `NotDiagonal` when any off-diagonal cell is non-zero; used
    /// by the import backends to validate untrusted streams.
    pub fn from_expanded(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        ensure_nonzero(rows, cols)?;
        if data.len() != checked_len(rows, cols)? {
            return Err(MatrixError::DimensionMismatch);
        }
        for i in 0..rows {
            for j in 0..cols {
                if i != j && !data[i * cols + j].is_zero() {
                    return Err(MatrixError::NotDiagonal);
                }
            }
        }
        Ok(Self {
            rows,
            cols,
            storage: DiagonalStorage::Expanded(data),
            initialized: true,
        })
    }

    /// Create the n-by-n multiplicative identity, compacted
    pub fn identity(n: usize) -> Result<Self> {
        ensure_nonzero(n, n)?;
        let mut values = Vec::new();
        values
            .try_reserve_exact(n)
            .map_err(|_| MatrixError::AllocationFailed)?;
        values.resize(n, T::one());
        Self::from_diagonal(n, n, values)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix has been filled since construction
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether storage has been compacted to the diagonal-only buffer
    pub fn is_compacted(&self) -> bool {
        matches!(self.storage, DiagonalStorage::Compacted(_))
    }

    /// Length of the stored diagonal
    pub fn diagonal_len(&self) -> usize {
        self.rows.min(self.cols)
    }

    /// Stored diagonal value at logical position (k, k)
    pub fn diag(&self, k: usize) -> Option<T> {
        if k >= self.diagonal_len() {
            return None;
        }
        Some(match &self.storage {
            DiagonalStorage::Expanded(data) => data[k * self.cols + k],
            DiagonalStorage::Compacted(data) => data[k],
        })
    }

    /// Diagonal value at k, zero past the stored diagonal
    fn diag_or_zero(&self, k: usize) -> T {
        self.diag(k).unwrap_or_else(T::zero)
    }

    /// Verify the diagonal invariant
    ///
    /// False when the matrix was never initialized. In expanded form every
    /// off-diagonal cell is scanned for exact zero; the compacted form holds
    /// by construction.
    pub fn is_diagonal(&self) -> bool {
        if !self.initialized {
            return false;
        }
        match &self.storage {
            DiagonalStorage::Compacted(_) => true,
            DiagonalStorage::Expanded(data) => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        if i != j && !data[i * self.cols + j].is_zero() {
                            return false;
                        }
                    }
                }
                true
            }
        }
    }

    /// Replace the expanded buffer with the diagonal-only form
    ///
    /// Requires [`is_diagonal`](Self::is_diagonal) to hold; on failure the
    /// storage is left untouched. Compacting twice is a no-op.
    pub fn compact(&mut self) -> Result<()> {
        if !self.is_diagonal() {
            return Err(MatrixError::NotDiagonal);
        }
        let values = match &self.storage {
            DiagonalStorage::Compacted(_) => return Ok(()),
            DiagonalStorage::Expanded(data) => {
                let len = self.diagonal_len();
                let mut values = Vec::new();
                values
                    .try_reserve_exact(len)
                    .map_err(|_| MatrixError::AllocationFailed)?;
                for k in 0..len {
                    values.push(data[k * self.cols + k]);
                }
                values
            }
        };
        self.storage = DiagonalStorage::Compacted(values);
        Ok(())
    }

    /// Combine the diagonals of two same-shape, same-form matrices
    fn zip_diagonal(&mut self, other: &Self, combine: impl Fn(T, T) -> T) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        match (&mut self.storage, &other.storage) {
            (DiagonalStorage::Expanded(lhs), DiagonalStorage::Expanded(rhs)) => {
                let min = self.rows.min(self.cols);
                for k in 0..min {
                    let idx = k * self.cols + k;
                    lhs[idx] = combine(lhs[idx], rhs[idx]);
                }
                Ok(())
            }
            (DiagonalStorage::Compacted(lhs), DiagonalStorage::Compacted(rhs)) => {
                for (a, b) in lhs.iter_mut().zip(rhs.iter()) {
                    *a = combine(*a, *b);
                }
                Ok(())
            }
            _ => Err(MatrixError::StorageMismatch),
        }
    }

    /// Product of two diagonal matrices, staying diagonal
    ///
    /// O(min(m, n, p)) shortcut for the case the general multiply handles in
    /// O(m*p*n); the result is compacted.
    pub fn diag_mul(&self, other: &Self) -> Result<Self> {
        ensure_multiplicable(self.dimensions(), other.dimensions())?;
        let (m, _) = self.dimensions();
        let (_, p) = other.dimensions();

        let len = m.min(p);
        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailed)?;
        for k in 0..len {
            values.push(self.diag_or_zero(k) * other.diag_or_zero(k));
        }
        Self::from_diagonal(m, p, values)
    }

    /// Kronecker product of two square diagonal matrices
    ///
    /// The result is the (n1*n2)-square diagonal matrix with entries
    /// `self[i, i] * other[j, j]` at diagonal index `i * n2 + j`. Non-square
    /// operands are rejected: their Kronecker product is not diagonal.
    pub fn kronecker(&self, other: &Self) -> Result<Self> {
        if self.rows != self.cols || other.rows != other.cols {
            return Err(MatrixError::DimensionMismatch);
        }
        let n1 = self.rows;
        let n2 = other.rows;
        let len = checked_len(n1, n2)?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailed)?;
        for i in 0..n1 {
            for j in 0..n2 {
                values.push(self.diag_or_zero(i) * other.diag_or_zero(j));
            }
        }
        Self::from_diagonal(len, len, values)
    }
}

impl<T: MatrixElement> MatrixStorage for DiagonalMatrix<T> {
    type Element = T;

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn nnz(&self) -> usize {
        (0..self.diagonal_len())
            .filter(|&k| !self.diag_or_zero(k).is_zero())
            .count()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols || row != col {
            return None;
        }
        match self.diag(row) {
            Some(value) if !value.is_zero() => Some(value),
            _ => None,
        }
    }

    fn storage_format(&self) -> StorageFormat {
        match self.storage {
            DiagonalStorage::Expanded(_) => StorageFormat::Diagonal,
            DiagonalStorage::Compacted(_) => StorageFormat::DiagonalCompact,
        }
    }
}

impl<T: MatrixElement> MatrixOps for DiagonalMatrix<T> {
    /// The general multiply produces a dense result; only
    /// [`DiagonalMatrix::diag_mul`] is guaranteed to stay diagonal.
    type Product = DenseMatrix<T>;

    fn fill_random<R: Rng + ?Sized>(&mut self, min: T, max: T, rng: &mut R) -> Result<()> {
        if !(min < max) {
            return Err(MatrixError::InvalidRange);
        }
        match &mut self.storage {
            DiagonalStorage::Expanded(data) => {
                // Re-establishes the invariant: off-diagonal cells are forced
                // back to exactly zero.
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        data[i * self.cols + j] = if i == j {
                            rng.gen_range(min..max)
                        } else {
                            T::zero()
                        };
                    }
                }
            }
            DiagonalStorage::Compacted(values) => {
                for value in values.iter_mut() {
                    *value = rng.gen_range(min..max);
                }
            }
        }
        self.initialized = true;
        Ok(())
    }

    fn add_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_diagonal(other, |a, b| a + b)
    }

    fn sub_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_diagonal(other, |a, b| a - b)
    }

    fn elem_mul_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_diagonal(other, |a, b| a * b)
    }

    fn scale(&mut self, factor: T) {
        match &mut self.storage {
            DiagonalStorage::Expanded(data) => {
                for cell in data.iter_mut() {
                    *cell = *cell * factor;
                }
            }
            DiagonalStorage::Compacted(values) => {
                for value in values.iter_mut() {
                    *value = *value * factor;
                }
            }
        }
    }

    fn matmul<M>(&self, other: &M) -> Result<DenseMatrix<T>>
    where
        M: MatrixStorage<Element = T>,
    {
        ensure_multiplicable(self.dimensions(), other.dimensions())?;
        let (_, other_cols) = other.dimensions();

        let mut values = Vec::new();
        values
            .try_reserve_exact(checked_len(self.rows, other_cols)?)
            .map_err(|_| MatrixError::AllocationFailed)?;
        for i in 0..self.rows {
            for j in 0..other_cols {
                let mut acc = T::zero();
                for k in 0..self.cols {
                    if let (Some(lhs), Some(rhs)) = (self.get(i, k), other.get(k, j)) {
                        acc = acc + lhs * rhs;
                    }
                }
                values.push(acc);
            }
        }
        DenseMatrix::from_vec(self.rows, other_cols, values)
    }

    fn transpose(&mut self) {
        if let DiagonalStorage::Expanded(data) = &mut self.storage {
            let min = self.rows.min(self.cols);
            let mut flipped = vec![T::zero(); data.len()];
            for k in 0..min {
                // New shape is (cols, rows), so the new row stride is rows.
                flipped[k * self.rows + k] = data[k * self.cols + k];
            }
            *data = flipped;
        }
        core::mem::swap(&mut self.rows, &mut self.cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::content_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uninitialized_is_not_diagonal() {
        let d = DiagonalMatrix::<f64>::new(3, 3).unwrap();
        assert!(!d.is_diagonal());
    }

    #[test]
    fn test_fill_random_establishes_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut d = DiagonalMatrix::<f64>::new(3, 4).unwrap();
        d.fill_random(1.0, 2.0, &mut rng).unwrap();
        assert!(d.is_diagonal());
        for i in 0..3 {
            for j in 0..4 {
                if i != j {
                    assert_eq!(d.value_at(i, j), 0.0);
                } else {
                    assert!((1.0..2.0).contains(&d.value_at(i, j)));
                }
            }
        }
    }

    #[test]
    fn test_compact_preserves_diagonal() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut d = DiagonalMatrix::<i32>::new(4, 2).unwrap();
        d.fill_random(1, 10, &mut rng).unwrap();
        let before: Vec<i32> = (0..2).map(|k| d.diag(k).unwrap()).collect();

        d.compact().unwrap();
        assert!(d.is_compacted());
        assert_eq!(d.dimensions(), (4, 2));
        let after: Vec<i32> = (0..2).map(|k| d.diag(k).unwrap()).collect();
        assert_eq!(before, after);

        // Compacting twice is a no-op
        d.compact().unwrap();
        assert!(d.is_compacted());
    }

    #[test]
    fn test_compact_rejects_uninitialized() {
        let mut d = DiagonalMatrix::<f32>::new(2, 2).unwrap();
        assert_eq!(d.compact().unwrap_err(), MatrixError::NotDiagonal);
        assert!(!d.is_compacted());
    }

    #[test]
    fn test_from_expanded_rejects_off_diagonal_values() {
        let data = vec![1, 0, 7, 2];
        assert_eq!(
            DiagonalMatrix::from_expanded(2, 2, data).unwrap_err(),
            MatrixError::NotDiagonal
        );
    }

    #[test]
    fn test_scale_compacted() {
        let mut d = DiagonalMatrix::from_diagonal(2, 2, vec![2, 3]).unwrap();
        d.scale(3);
        assert_eq!(d.diag(0), Some(6));
        assert_eq!(d.diag(1), Some(9));
        assert!(d.is_diagonal());
    }

    #[test]
    fn test_add_sub_compacted() {
        let mut a = DiagonalMatrix::from_diagonal(3, 3, vec![1, 2, 3]).unwrap();
        let b = DiagonalMatrix::from_diagonal(3, 3, vec![10, 20, 30]).unwrap();
        a.add_assign(&b).unwrap();
        assert_eq!(a.diag(1), Some(22));
        assert!(a.is_diagonal());

        a.sub_assign(&b).unwrap();
        assert_eq!(a.diag(0), Some(1));
        assert_eq!(a.diag(2), Some(3));
    }

    #[test]
    fn test_add_rejects_mixed_forms() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut expanded = DiagonalMatrix::<i32>::new(3, 3).unwrap();
        expanded.fill_random(1, 5, &mut rng).unwrap();
        let compacted = DiagonalMatrix::from_diagonal(3, 3, vec![1, 1, 1]).unwrap();
        assert_eq!(
            expanded.add_assign(&compacted).unwrap_err(),
            MatrixError::StorageMismatch
        );
    }

    #[test]
    fn test_add_rejects_shape_mismatch() {
        let mut a = DiagonalMatrix::from_diagonal(2, 2, vec![1, 2]).unwrap();
        let b = DiagonalMatrix::from_diagonal(3, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(
            a.add_assign(&b).unwrap_err(),
            MatrixError::DimensionMismatch
        );
    }

    #[test]
    fn test_diag_mul() {
        let a = DiagonalMatrix::from_diagonal(2, 2, vec![2, 3]).unwrap();
        let b = DiagonalMatrix::from_diagonal(2, 2, vec![4, 5]).unwrap();
        let c = a.diag_mul(&b).unwrap();
        assert_eq!(c.diag(0), Some(8));
        assert_eq!(c.diag(1), Some(15));
        assert!(c.is_compacted());
    }

    #[test]
    fn test_diag_mul_rectangular() {
        // (3x2) * (2x4) -> (3x4); only diagonal index 0..2 can be non-zero,
        // and index 2 falls past the operands' stored diagonals.
        let a = DiagonalMatrix::from_diagonal(3, 2, vec![2, 3]).unwrap();
        let b = DiagonalMatrix::from_diagonal(2, 4, vec![5, 7]).unwrap();
        let c = a.diag_mul(&b).unwrap();
        assert_eq!(c.dimensions(), (3, 4));
        assert_eq!(c.diag(0), Some(10));
        assert_eq!(c.diag(1), Some(21));
        assert_eq!(c.diag(2), Some(0));
    }

    #[test]
    fn test_diag_mul_matches_general_matmul() {
        let a = DiagonalMatrix::from_diagonal(3, 3, vec![2, 3, 4]).unwrap();
        let b = DiagonalMatrix::from_diagonal(3, 3, vec![5, 6, 7]).unwrap();
        let fast = a.diag_mul(&b).unwrap();
        let general = a.matmul(&b).unwrap();
        assert!(content_eq(&fast, &general));
    }

    #[test]
    fn test_kronecker() {
        let a = DiagonalMatrix::from_diagonal(2, 2, vec![1, 2]).unwrap();
        let b = DiagonalMatrix::from_diagonal(2, 2, vec![3, 4]).unwrap();
        let k = a.kronecker(&b).unwrap();
        assert_eq!(k.dimensions(), (4, 4));
        let diag: Vec<i32> = (0..4).map(|i| k.diag(i).unwrap()).collect();
        assert_eq!(diag, vec![3, 4, 6, 8]);
    }

    #[test]
    fn test_kronecker_rejects_rectangular() {
        let a = DiagonalMatrix::from_diagonal(2, 3, vec![1, 2]).unwrap();
        let b = DiagonalMatrix::from_diagonal(2, 2, vec![3, 4]).unwrap();
        assert_eq!(a.kronecker(&b).unwrap_err(), MatrixError::DimensionMismatch);
    }

    #[test]
    fn test_transpose_expanded_rectangular() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut d = DiagonalMatrix::<i64>::new(2, 5).unwrap();
        d.fill_random(1, 100, &mut rng).unwrap();
        let original = d.clone();

        d.transpose();
        assert_eq!(d.dimensions(), (5, 2));
        assert!(d.is_diagonal());
        assert_eq!(d.diag(0), original.diag(0));
        assert_eq!(d.diag(1), original.diag(1));

        d.transpose();
        assert_eq!(d, original);
    }

    #[test]
    fn test_identity_multiplication() {
        let identity = DiagonalMatrix::<i32>::identity(3).unwrap();
        let d = DiagonalMatrix::from_diagonal(3, 3, vec![4, 5, 6]).unwrap();
        let product = d.diag_mul(&identity).unwrap();
        assert!(content_eq(&product, &d));
    }
}
