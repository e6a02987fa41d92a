//! Write a sparse block matrix to the binary format

use matstore::{BlockMatrix, FileError, MatrixFile, MatrixStorage};
use std::time::Instant;

fn main() -> Result<(), FileError> {
    println!("Building a sparse block matrix...");

    let rows = 1_000;
    let cols = 1_000;

    // A diagonal band plus a few scattered cells; everything else absent
    let mut entries = Vec::new();
    for k in 0..rows.min(cols) {
        entries.push((k, k, k as f64 + 1.0));
    }
    for &(i, j) in &[(3, 900), (500, 2), (999, 0)] {
        entries.push((i, j, -1.0));
    }

    let matrix = BlockMatrix::from_entries(rows, cols, &entries)?;
    println!(
        "Matrix dimensions: {rows} x {cols}, {} present cells",
        matrix.nnz()
    );

    let start = Instant::now();
    MatrixFile::write_matrix("example_matrix.matx", &matrix)?;
    let write_time = start.elapsed();
    println!("Matrix written to example_matrix.matx in {write_time:?}");
    println!("\nRun 'cargo run --example read_matrix' to read it back!");
    Ok(())
}
