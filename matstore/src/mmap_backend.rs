//! Binary matrix files with memory-mapped reads
//!
//! A `.matx` file is the 64-byte [`MatrixHeader`] followed by an aligned
//! values region: the row-major element stream for dense, expanded-diagonal
//! and block matrices (absent block cells as explicit zeros), or the
//! diagonal-only stream for a compacted diagonal matrix. Imports map the file
//! and cast the values region in place after alignment and bounds checks.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bytemuck::Pod;
use memmap2::Mmap;

use matstore_core::constants::ALIGNMENT_BOUNDARY;
use matstore_core::{
    align_to_boundary, checked_len, ensure_stream_len, validate_typed_slice, BlockMatrix,
    DenseMatrix, DiagonalMatrix, MatrixElement, MatrixError, MatrixHeader, MatrixStorage,
    StorageFormat,
};

use crate::error::FileError;

/// File handle for .matx files
#[derive(Debug)]
pub struct MatrixFile {
    pub header: MatrixHeader,
    pub path: PathBuf,
}

impl MatrixFile {
    /// Open an existing .matx file and validate its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let path_buf = path.as_ref().to_path_buf();

        let mut file = File::open(&path_buf)?;
        let mut header_bytes = [0u8; MatrixHeader::SIZE];
        file.read_exact(&mut header_bytes)?;
        let header = MatrixHeader::from_bytes(&header_bytes)?;

        Ok(Self {
            header,
            path: path_buf,
        })
    }

    /// Serialize a matrix of any representation to a .matx file
    pub fn write_matrix<M, P>(path: P, matrix: &M) -> Result<(), FileError>
    where
        M: MatrixStorage,
        M::Element: Pod,
        P: AsRef<Path>,
    {
        let (rows, cols) = matrix.dimensions();
        let format = matrix.storage_format();

        let values: Vec<M::Element> = match format {
            StorageFormat::DiagonalCompact => {
                (0..rows.min(cols)).map(|k| matrix.value_at(k, k)).collect()
            }
            _ => {
                let mut stream = Vec::with_capacity(checked_len(rows, cols)?);
                for i in 0..rows {
                    for j in 0..cols {
                        stream.push(matrix.value_at(i, j));
                    }
                }
                stream
            }
        };

        let values_offset = align_to_boundary(MatrixHeader::SIZE, ALIGNMENT_BOUNDARY);
        let values_size = (values.len() as u64)
            .checked_mul(M::Element::size_bytes() as u64)
            .ok_or(MatrixError::ArraySizeOverflow)?;

        let mut header = MatrixHeader::new();
        header.format_type = format.to_u8();
        header.data_type = M::Element::data_type().to_u8();
        header.rows = rows as u64;
        header.cols = cols as u64;
        header.nnz = matrix.nnz() as u64;
        header.values_offset = values_offset as u64;
        header.values_size = values_size;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let header_bytes = header.to_bytes();
        writer.write_all(&header_bytes)?;
        if values_offset > header_bytes.len() {
            writer.write_all(&vec![0u8; values_offset - header_bytes.len()])?;
        }
        writer.write_all(bytemuck::cast_slice(&values))?;
        writer.flush()?;
        Ok(())
    }

    fn shape(&self) -> (usize, usize) {
        (self.header.rows as usize, self.header.cols as usize)
    }

    /// Map the file and copy the values region out as typed elements
    fn read_values<T>(&self) -> Result<Vec<T>, FileError>
    where
        T: MatrixElement + Pod,
    {
        if self.header.element_type()? != T::data_type() {
            return Err(FileError::Format(MatrixError::DataTypeMismatch));
        }

        let file = File::open(&self.path)?;
        // SAFETY: the mapping is read-only and dropped before this call
        // returns; the cast below revalidates length and alignment.
        let mmap = unsafe { Mmap::map(&file)? };

        let offset = self.header.values_offset as usize;
        let end = offset
            .checked_add(self.header.values_size as usize)
            .ok_or(MatrixError::ArraySizeOverflow)?;
        if end > mmap.len() {
            return Err(FileError::Format(MatrixError::TruncatedStream));
        }

        let bytes = &mmap[offset..end];
        validate_typed_slice::<T>(bytes)?;
        let elements: &[T] =
            bytemuck::try_cast_slice(bytes).map_err(|_| MatrixError::ArrayAlignment)?;
        Ok(elements.to_vec())
    }

    /// Import a dense matrix
    pub fn read_dense<T>(&self) -> Result<DenseMatrix<T>, FileError>
    where
        T: MatrixElement + Pod,
    {
        if self.header.storage_format()? != StorageFormat::Dense {
            return Err(FileError::Format(MatrixError::UnsupportedFormat));
        }
        let (rows, cols) = self.shape();
        let values = self.read_values::<T>()?;
        ensure_stream_len(checked_len(rows, cols)?, values.len())?;
        Ok(DenseMatrix::from_vec(rows, cols, values)?)
    }

    /// Import a diagonal matrix, in whichever form the file declares
    pub fn read_diagonal<T>(&self) -> Result<DiagonalMatrix<T>, FileError>
    where
        T: MatrixElement + Pod,
    {
        let (rows, cols) = self.shape();
        match self.header.storage_format()? {
            StorageFormat::Diagonal => {
                let values = self.read_values::<T>()?;
                ensure_stream_len(checked_len(rows, cols)?, values.len())?;
                Ok(DiagonalMatrix::from_expanded(rows, cols, values)?)
            }
            StorageFormat::DiagonalCompact => {
                let values = self.read_values::<T>()?;
                ensure_stream_len(rows.min(cols), values.len())?;
                Ok(DiagonalMatrix::from_diagonal(rows, cols, values)?)
            }
            _ => Err(FileError::Format(MatrixError::UnsupportedFormat)),
        }
    }

    /// Import a block matrix; zero stream elements reconstruct as absent
    pub fn read_block<T>(&self) -> Result<BlockMatrix<T>, FileError>
    where
        T: MatrixElement + Pod,
    {
        if self.header.storage_format()? != StorageFormat::Block {
            return Err(FileError::Format(MatrixError::UnsupportedFormat));
        }
        let (rows, cols) = self.shape();
        let values = self.read_values::<T>()?;
        ensure_stream_len(checked_len(rows, cols)?, values.len())?;

        let mut matrix = BlockMatrix::new(rows, cols)?;
        for (idx, &value) in values.iter().enumerate() {
            if !value.is_zero() {
                matrix.set(idx / cols, idx % cols, value)?;
            }
        }
        Ok(matrix)
    }
}
