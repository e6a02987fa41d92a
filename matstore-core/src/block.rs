//! Block matrix representation
//!
//! A rows*cols grid of optional cells. An absent cell is a structural zero:
//! it behaves as zero in every operation but occupies no user-visible value.
//! Operations materialize cells lazily and drop zero-valued products so the
//! sparsity does not degrade under algebra.

use alloc::vec::Vec;

use rand::Rng;

use crate::error::{MatrixError, Result};
use crate::format::StorageFormat;
use crate::traits::{MatrixElement, MatrixOps, MatrixStorage};
use crate::validation::{checked_len, ensure_multiplicable, ensure_nonzero, ensure_same_shape};

/// Matrix of optionally-absent cells, absence denoting an implicit zero
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T: MatrixElement> BlockMatrix<T> {
    /// Create a matrix of the given shape with every cell absent
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        ensure_nonzero(rows, cols)?;
        let len = checked_len(rows, cols)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailed)?;
        cells.resize(len, None);

        Ok(Self { rows, cols, cells })
    }

    /// Create a matrix from (row, col, value) entries; all other cells absent
    pub fn from_entries(rows: usize, cols: usize, entries: &[(usize, usize, T)]) -> Result<Self> {
        let mut matrix = Self::new(rows, cols)?;
        for &(row, col, value) in entries {
            matrix.set(row, col, value)?;
        }
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

    /// Whether the cell at a position holds a value
    ///
    /// False for out-of-bounds positions.
    pub fn is_present(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col].is_some()
    }

    /// Stored cell at a position, bounds-checked
    ///
    /// Unlike [`MatrixStorage::get`], a present zero-valued cell is returned
    /// as `Some(zero)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Materialize a cell with a value
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds);
        }
        self.cells[row * self.cols + col] = Some(value);
        Ok(())
    }

    /// Make a cell absent again
    pub fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds);
        }
        self.cells[row * self.cols + col] = None;
        Ok(())
    }

    /// Iterate over present cells as (row, col, value)
    pub fn iter_present(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|value| (idx / self.cols, idx % self.cols, value))
        })
    }
}

impl<T: MatrixElement> MatrixStorage for BlockMatrix<T> {
    type Element = T;

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of present cells (storage occupancy, not value count)
    fn nnz(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        match self.cell(row, col) {
            Some(value) if !value.is_zero() => Some(value),
            _ => None,
        }
    }

    fn storage_format(&self) -> StorageFormat {
        StorageFormat::Block
    }
}

impl<T: MatrixElement> MatrixOps for BlockMatrix<T> {
    type Product = Self;

    fn fill_random<R: Rng + ?Sized>(&mut self, min: T, max: T, rng: &mut R) -> Result<()> {
        if !(min < max) {
            return Err(MatrixError::InvalidRange);
        }
        for cell in self.cells.iter_mut() {
            *cell = Some(rng.gen_range(min..max));
        }
        Ok(())
    }

    fn add_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (cell, rhs) in self.cells.iter_mut().zip(other.cells.iter()) {
            if let Some(value) = rhs {
                match cell {
                    Some(existing) => *existing = *existing + *value,
                    None => *cell = Some(*value),
                }
            }
        }
        Ok(())
    }

    fn sub_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (cell, rhs) in self.cells.iter_mut().zip(other.cells.iter()) {
            if let Some(value) = rhs {
                match cell {
                    Some(existing) => *existing = *existing - *value,
                    // Materializing from an absent cell keeps the sign:
                    // 0 - value, not value.
                    None => *cell = Some(T::zero() - *value),
                }
            }
        }
        Ok(())
    }

    fn elem_mul_assign(&mut self, other: &Self) -> Result<()> {
        ensure_same_shape(self.dimensions(), other.dimensions())?;
        for (cell, rhs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell = match (*cell, *rhs) {
                (Some(lhs), Some(value)) => Some(lhs * value),
                // A factor of implicit zero makes the product a structural
                // zero as well.
                _ => None,
            };
        }
        Ok(())
    }

    fn scale(&mut self, factor: T) {
        for cell in self.cells.iter_mut() {
            if let Some(value) = cell {
                *value = *value * factor;
            }
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
                    if let (Some(lhs), Some(rhs)) =
                        (self.cells[i * self.cols + k], other.get(k, j))
                    {
                        acc = acc + lhs * rhs;
                    }
                }
                // A zero sum stays structural: the output cell is left
                // absent instead of holding an explicit zero.
                if !acc.is_zero() {
                    result.cells[i * other_cols + j] = Some(acc);
                }
            }
        }
        Ok(result)
    }

    fn transpose(&mut self) {
        let mut flipped: Vec<Option<T>> = Vec::new();
        flipped.resize(self.cells.len(), None);
        for i in 0..self.rows {
            for j in 0..self.cols {
                flipped[j * self.rows + i] = self.cells[i * self.cols + j];
            }
        }
        self.cells = flipped;
        core::mem::swap(&mut self.rows, &mut self.cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseMatrix;
    use crate::traits::content_eq;
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_starts_all_absent() {
        let b = BlockMatrix::<f64>::new(3, 3).unwrap();
        assert_eq!(b.nnz(), 0);
        assert!(!b.is_present(0, 0));
        assert_eq!(b.value_at(2, 2), 0.0);
    }

    #[test]
    fn test_scale_touches_only_present_cells() {
        let b = BlockMatrix::from_entries(2, 2, &[(0, 0, 5)]).unwrap();
        let mut scaled = b.clone();
        scaled.scale(10);
        assert_eq!(scaled.cell(0, 0), Some(50));
        assert!(!scaled.is_present(0, 1));
        assert!(!scaled.is_present(1, 0));
        assert!(!scaled.is_present(1, 1));
    }

    #[test]
    fn test_add_presence_matrix() {
        let mut a = BlockMatrix::from_entries(2, 2, &[(0, 0, 1), (0, 1, 2)]).unwrap();
        let b = BlockMatrix::from_entries(2, 2, &[(0, 0, 10), (1, 0, 20)]).unwrap();
        a.add_assign(&b).unwrap();

        assert_eq!(a.cell(0, 0), Some(11)); // both present
        assert_eq!(a.cell(0, 1), Some(2)); // rhs absent, unchanged
        assert_eq!(a.cell(1, 0), Some(20)); // materialized from rhs
        assert!(!a.is_present(1, 1)); // both absent
    }

    #[test]
    fn test_sub_materializes_negation() {
        let mut a = BlockMatrix::<i32>::new(2, 2).unwrap();
        let b = BlockMatrix::from_entries(2, 2, &[(0, 1, 7)]).unwrap();
        a.sub_assign(&b).unwrap();
        assert_eq!(a.cell(0, 1), Some(-7));
        assert!(!a.is_present(0, 0));
    }

    #[test]
    fn test_add_then_sub_restores_content() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut a = BlockMatrix::<i64>::new(3, 3).unwrap();
        a.fill_random(-5, 5, &mut rng).unwrap();
        let original = a.clone();
        let mut b = BlockMatrix::<i64>::new(3, 3).unwrap();
        b.fill_random(-5, 5, &mut rng).unwrap();

        a.add_assign(&b).unwrap();
        a.sub_assign(&b).unwrap();
        assert!(content_eq(&a, &original));
    }

    #[test]
    fn test_elem_mul_requires_both_present() {
        let mut a = BlockMatrix::from_entries(2, 2, &[(0, 0, 3), (1, 1, 4)]).unwrap();
        let b = BlockMatrix::from_entries(2, 2, &[(0, 0, 5), (0, 1, 9)]).unwrap();
        a.elem_mul_assign(&b).unwrap();
        assert_eq!(a.cell(0, 0), Some(15));
        assert!(!a.is_present(0, 1)); // lhs absent
        assert!(!a.is_present(1, 1)); // rhs absent
    }

    #[test]
    fn test_multiply_never_stores_explicit_zero() {
        // Row 0 of a and column 0 of b cancel: 2*3 + (-2)*3 = 0
        let a = BlockMatrix::from_entries(2, 2, &[(0, 0, 2), (0, 1, -2), (1, 0, 1)]).unwrap();
        let b = BlockMatrix::from_entries(2, 2, &[(0, 0, 3), (1, 0, 3), (1, 1, 4)]).unwrap();
        let product = a.matmul(&b).unwrap();

        assert!(!product.is_present(0, 0));
        assert_eq!(product.cell(0, 1), Some(-8));
        assert_eq!(product.cell(1, 0), Some(3));
        assert!(!product.is_present(1, 1));
    }

    #[test]
    fn test_multiply_matches_dense() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut a = BlockMatrix::<i32>::new(2, 3).unwrap();
        a.fill_random(-4, 4, &mut rng).unwrap();
        let mut b = BlockMatrix::<i32>::new(3, 2).unwrap();
        b.fill_random(-4, 4, &mut rng).unwrap();

        let dense_a = DenseMatrix::from_vec(
            2,
            3,
            (0..2)
                .flat_map(|i| (0..3).map(move |j| (i, j)))
                .map(|(i, j)| a.value_at(i, j))
                .collect(),
        )
        .unwrap();

        let product = a.matmul(&b).unwrap();
        let expected = dense_a.matmul(&b).unwrap();
        assert!(content_eq(&product, &expected));
    }

    #[test]
    fn test_multiply_rejects_incompatible() {
        let a = BlockMatrix::<i32>::new(2, 3).unwrap();
        let b = BlockMatrix::<i32>::new(2, 3).unwrap();
        assert_eq!(a.matmul(&b).unwrap_err(), MatrixError::DimensionMismatch);
    }

    #[test]
    fn test_transpose_rectangular_round_trip() {
        let original =
            BlockMatrix::from_entries(2, 3, &[(0, 2, 5), (1, 0, -1)]).unwrap();
        let mut m = original.clone();
        m.transpose();
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.cell(2, 0), Some(5));
        assert_eq!(m.cell(0, 1), Some(-1));
        assert!(!m.is_present(0, 0));

        m.transpose();
        assert_eq!(m, original);
    }

    #[test]
    fn test_iter_present() {
        let b = BlockMatrix::from_entries(2, 2, &[(1, 0, 9), (0, 1, 4)]).unwrap();
        let mut entries: Vec<(usize, usize, i32)> = b.iter_present().collect();
        entries.sort();
        assert_eq!(entries, vec![(0, 1, 4), (1, 0, 9)]);
    }

    #[test]
    fn test_set_and_clear_bounds() {
        let mut b = BlockMatrix::<f32>::new(2, 2).unwrap();
        assert_eq!(
            b.set(2, 0, 1.0).unwrap_err(),
            MatrixError::IndexOutOfBounds
        );
        b.set(1, 1, 1.5).unwrap();
        assert!(b.is_present(1, 1));
        b.clear(1, 1).unwrap();
        assert!(!b.is_present(1, 1));
    }
}
