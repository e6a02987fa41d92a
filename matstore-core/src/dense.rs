//! Dense matrix representation
//!
//! Row-major contiguous storage; every cell is physically stored. This is the
//! baseline the sparse representations are validated against.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::error::{MatrixError, Result};
use crate::format::StorageFormat;
use crate::traits::{MatrixElement, MatrixOps, MatrixStorage};
use crate::validation::{checked_len, ensure_multiplicable, ensure_nonzero, ensure_same_shape};

/// Dense matrix with a contiguous row-major element buffer
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
    initialized: bool,
}

impl<T: MatrixElement> DenseMatrix<T> {
    /// Create a zero-filled matrix of the given shape
    ///
    /// Fails when either dimension is zero or the backing buffer cannot be
    /// reserved; no partially-constructed value escapes on failure.
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
            data,
            initialized: false,
        })
    }

    /// Create a matrix from a row-major buffer
    ///
    /// The buffer length must equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        ensure_nonzero(rows, cols)?;
        if data.len() != checked_len(rows, cols)? {
            return Err(MatrixError::DimensionMismatch);
        }
        Ok(Self {
            rows,
            cols,
            data,
            initialized: true,
        })
    }

    /// Create an n-by-n identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        let mut matrix = Self::new(n, n)?;
        for k in 0..n {
            matrix.data[k * n + k] = T::one();
        }
        matrix.initialized = true;
        Ok(matrix)
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

    /// Stored value at a position, bounds-checked
    ///
    /// Unlike [`MatrixStorage::get`], a stored zero is returned as
    /// `Some(zero)`.
    pub fn at(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Store a value at a position
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds);
        }
        self.data[row * self.cols + col] = value;
        self.initialized = true;
        Ok(())
    }

    /// One row of the matrix as a slice
    pub fn row_slice(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// The full row-major buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: MatrixElement> MatrixStorage for DenseMatrix<T> {
    type Element = T;

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn nnz(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        match self.at(row, col) {
            Some(value) if !value.is_zero() => Some(value),
            _ => None,
        }
    }

    fn storage_format(&self) -> StorageFormat {
        StorageFormat::Dense
    }
}

impl<T: MatrixElement> MatrixOps for DenseMatrix<T> {
    type Product = Self;

    fn fill_random<R: Rng + ?Sized>(&mut self, min: T, max: T, rng: &mut R) -> Result<()> {
        if !(min < max) {
            return Err(MatrixError::InvalidRange);
        }
        for cell in self.data.iter_mut() {
            *cell = rng.gen_range(min..max);
        }
        self.initialized = true;
        Ok(())
    }

    fn add_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (lhs, rhs) in self.data.iter_mut().zip(other.data.iter()) {
            *lhs = *lhs + *rhs;
        }
        Ok(())
    }

    fn sub_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (lhs, rhs) in self.data.iter_mut().zip(other.data.iter()) {
            *lhs = *lhs - *rhs;
        }
        Ok(())
    }

    fn elem_mul_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (lhs, rhs) in self.data.iter_mut().zip(other.data.iter()) {
            *lhs = *lhs * *rhs;
        }
        Ok(())
    }

    fn scale(&mut self, factor: T) {
        for cell in self.data.iter_mut() {
            *cell = *cell * factor;
        }
    }

    fn matmul<M>(&self, other: &M) -> Result<Self>
    where
        M: MatrixStorage<Element = T>,
    {
        ensure_multiplicable(self.dimensions(), other.dimensions())?;
        let (_, other_cols) = other.dimensions();

        let mut result = Self::new(self.rows, other_cols)?;
        for i in 0..self.rows {
            for j in 0..other_cols {
                let mut acc = T::zero();
                for k in 0..self.cols {
                    if let Some(rhs) = other.get(k, j) {
                        acc = acc + self.data[i * self.cols + k] * rhs;
                    }
                }
                result.data[i * other_cols + j] = acc;
            }
        }
        result.initialized = true;
        Ok(result)
    }

    fn transpose(&mut self) {
        let mut flipped = vec![T::zero(); self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                flipped[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        self.data = flipped;
        core::mem::swap(&mut self.rows, &mut self.cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagonal::DiagonalMatrix;
    use crate::traits::content_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_a() -> DenseMatrix<i32> {
        DenseMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap()
    }

    fn sample_b() -> DenseMatrix<i32> {
        DenseMatrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert_eq!(
            DenseMatrix::<f64>::new(0, 3).unwrap_err(),
            MatrixError::ZeroDimension
        );
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert_eq!(
            DenseMatrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err(),
            MatrixError::DimensionMismatch
        );
    }

    #[test]
    fn test_multiply() {
        let product = sample_a().matmul(&sample_b()).unwrap();
        assert_eq!(product.as_slice(), &[19, 22, 43, 50]);
        assert_eq!(product.dimensions(), (2, 2));
    }

    #[test]
    fn test_multiply_rejects_incompatible() {
        let a = sample_a();
        let tall = DenseMatrix::from_vec(3, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(a.matmul(&tall).unwrap_err(), MatrixError::DimensionMismatch);
    }

    #[test]
    fn test_add_and_sub() {
        let mut a = sample_a();
        a.add_assign(&sample_b()).unwrap();
        assert_eq!(a.as_slice(), &[6, 8, 10, 12]);

        a.sub_assign(&sample_b()).unwrap();
        assert!(content_eq(&a, &sample_a()));
    }

    #[test]
    fn test_add_rejects_shape_mismatch() {
        // A shape mismatch must surface as an error, never a silent no-op.
        let mut a = sample_a();
        let wide = DenseMatrix::from_vec(2, 3, vec![0; 6]).unwrap();
        assert_eq!(
            a.add_assign(&wide).unwrap_err(),
            MatrixError::DimensionMismatch
        );
        assert_eq!(a, sample_a());
    }

    #[test]
    fn test_elem_mul() {
        let mut a = sample_a();
        a.elem_mul_assign(&sample_b()).unwrap();
        assert_eq!(a.as_slice(), &[5, 12, 21, 32]);
    }

    #[test]
    fn test_scale() {
        let mut a = sample_a();
        a.scale(3);
        assert_eq!(a.as_slice(), &[3, 6, 9, 12]);
    }

    #[test]
    fn test_transpose_square() {
        let mut a = sample_a();
        a.transpose();
        assert_eq!(a.as_slice(), &[1, 3, 2, 4]);
    }

    #[test]
    fn test_transpose_rectangular_round_trip() {
        let original = DenseMatrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut m = original.clone();
        m.transpose();
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.as_slice(), &[1, 4, 2, 5, 3, 6]);
        m.transpose();
        assert_eq!(m, original);
    }

    #[test]
    fn test_multiply_by_diagonal_identity() {
        let a = DenseMatrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let identity = DiagonalMatrix::<i32>::identity(3).unwrap();
        let product = a.matmul(&identity).unwrap();
        assert!(content_eq(&product, &a));
    }

    #[test]
    fn test_dense_identity() {
        let identity = DenseMatrix::<i32>::identity(3).unwrap();
        assert_eq!(identity.nnz(), 3);
        let a = DenseMatrix::from_vec(3, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        let product = a.matmul(&identity).unwrap();
        assert_eq!(product, a);
    }

    #[test]
    fn test_row_slice() {
        let a = sample_a();
        assert_eq!(a.row_slice(1), Some(&[3, 4][..]));
        assert_eq!(a.row_slice(2), None);
    }

    #[test]
    fn test_fill_random_range_and_determinism() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut a = DenseMatrix::<f64>::new(4, 4).unwrap();
        assert!(!a.is_initialized());
        a.fill_random(-1.0, 1.0, &mut rng).unwrap();
        assert!(a.is_initialized());
        assert!(a.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));

        // Same seed, same sequence
        let mut rng2 = StdRng::seed_from_u64(7);
        let mut b = DenseMatrix::<f64>::new(4, 4).unwrap();
        b.fill_random(-1.0, 1.0, &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_random_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut a = DenseMatrix::<f64>::new(2, 2).unwrap();
        assert_eq!(
            a.fill_random(1.0, 1.0, &mut rng).unwrap_err(),
            MatrixError::InvalidRange
        );
        assert!(!a.is_initialized());
    }

    #[test]
    fn test_nnz_counts_nonzero() {
        let a = DenseMatrix::from_vec(2, 2, vec![0, 5, 0, -1]).unwrap();
        assert_eq!(a.nnz(), 2);
        assert_eq!(a.get(0, 0), None);
        assert_eq!(a.get(0, 1), Some(5));
    }
}
