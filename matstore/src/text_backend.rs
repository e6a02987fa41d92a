//! Plain-text matrix interchange
//!
//! A matrix file is a shape header line (`rows cols`) followed by the
//! row-major element stream, one row per line. A compacted diagonal matrix
//! writes only its diagonal stream; the reader tells the two layouts apart by
//! the element count. Absent block cells travel as explicit zeros, so an
//! imported block matrix treats zero as "absent" - lossy with respect to
//! explicitly stored zeros, by design of the format.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use matstore_core::{
    checked_len, ensure_stream_len, BlockMatrix, DenseMatrix, DiagonalMatrix, MatrixElement,
    MatrixError, MatrixStorage, StorageFormat,
};

use crate::error::FileError;

/// Serialize a matrix's logical contents to a text file
///
/// Works for any representation; values are written through the common f64
/// interchange conversion.
pub fn write_text<M, P>(path: P, matrix: &M) -> Result<(), FileError>
where
    M: MatrixStorage,
    P: AsRef<Path>,
{
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let (rows, cols) = matrix.dimensions();
    writeln!(writer, "{rows} {cols}")?;

    if matrix.storage_format() == StorageFormat::DiagonalCompact {
        for k in 0..rows.min(cols) {
            if k > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", matrix.value_at(k, k).to_f64())?;
        }
        writeln!(writer)?;
    } else {
        for i in 0..rows {
            for j in 0..cols {
                if j > 0 {
                    write!(writer, " ")?;
                }
                write!(writer, "{}", matrix.value_at(i, j).to_f64())?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// A parsed shape header plus the raw element stream
struct TextStream {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

fn parse_usize_token(token: Option<&str>, line: usize) -> Result<usize, FileError> {
    token
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or(FileError::Parse { line })
}

fn read_stream(path: &Path) -> Result<TextStream, FileError> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().enumerate();

    let (header_line, header) = loop {
        match lines.next() {
            Some((idx, line)) if !line.trim().is_empty() => break (idx + 1, line),
            Some(_) => continue,
            None => return Err(FileError::Format(MatrixError::TruncatedStream)),
        }
    };

    let mut tokens = header.split_whitespace();
    let rows = parse_usize_token(tokens.next(), header_line)?;
    let cols = parse_usize_token(tokens.next(), header_line)?;
    if tokens.next().is_some() {
        return Err(FileError::Parse { line: header_line });
    }

    let mut values = Vec::new();
    for (idx, line) in lines {
        for token in line.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| FileError::Parse { line: idx + 1 })?;
            values.push(value);
        }
    }

    Ok(TextStream { rows, cols, values })
}

/// Import a dense matrix from a text file
pub fn read_dense<T, P>(path: P) -> Result<DenseMatrix<T>, FileError>
where
    T: MatrixElement,
    P: AsRef<Path>,
{
    let stream = read_stream(path.as_ref())?;
    ensure_stream_len(checked_len(stream.rows, stream.cols)?, stream.values.len())?;
    let data = stream.values.iter().map(|&v| T::from_f64(v)).collect();
    Ok(DenseMatrix::from_vec(stream.rows, stream.cols, data)?)
}

/// Import a diagonal matrix from a text file
///
/// A full `rows * cols` stream yields the expanded form (off-diagonal values
/// must be exactly zero); a `min(rows, cols)` stream yields the compacted
/// form. Any other element count is rejected.
pub fn read_diagonal<T, P>(path: P) -> Result<DiagonalMatrix<T>, FileError>
where
    T: MatrixElement,
    P: AsRef<Path>,
{
    let stream = read_stream(path.as_ref())?;
    let full = checked_len(stream.rows, stream.cols)?;
    let convert = |values: &[f64]| values.iter().map(|&v| T::from_f64(v)).collect::<Vec<T>>();

    if stream.values.len() == full {
        Ok(DiagonalMatrix::from_expanded(
            stream.rows,
            stream.cols,
            convert(&stream.values),
        )?)
    } else if stream.values.len() == stream.rows.min(stream.cols) {
        Ok(DiagonalMatrix::from_diagonal(
            stream.rows,
            stream.cols,
            convert(&stream.values),
        )?)
    } else if stream.values.len() < full {
        Err(FileError::Format(MatrixError::TruncatedStream))
    } else {
        Err(FileError::Format(MatrixError::TrailingData))
    }
}

/// Import a block matrix from a text file
///
/// Zero-valued stream elements reconstruct as absent cells.
pub fn read_block<T, P>(path: P) -> Result<BlockMatrix<T>, FileError>
where
    T: MatrixElement,
    P: AsRef<Path>,
{
    let stream = read_stream(path.as_ref())?;
    ensure_stream_len(checked_len(stream.rows, stream.cols)?, stream.values.len())?;

    let mut matrix = BlockMatrix::new(stream.rows, stream.cols)?;
    for (idx, &value) in stream.values.iter().enumerate() {
        if value != 0.0 {
            matrix.set(idx / stream.cols, idx % stream.cols, T::from_f64(value))?;
        }
    }
    Ok(matrix)
}
