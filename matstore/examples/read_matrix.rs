//! Read back a binary matrix file and inspect it

use matstore::{FileError, MatrixFile, MatrixStorage};

fn main() -> Result<(), FileError> {
    let file = MatrixFile::open("example_matrix.matx")?;

    println!("Header:");
    println!("  shape:   {} x {}", file.header.rows, file.header.cols);
    println!("  format:  {}", file.header.storage_format()?);
    println!("  type:    {}", file.header.element_type()?);
    println!("  nnz:     {}", file.header.nnz);

    let matrix = file.read_block::<f64>()?;
    println!(
        "\nLoaded {} present cells out of {}",
        matrix.nnz(),
        file.header.rows * file.header.cols
    );

    for (row, col) in [(0, 0), (3, 900), (500, 2), (10, 11)] {
        match matrix.cell(row, col) {
            Some(value) => println!("matrix[{row}, {col}] = {value}"),
            None => println!("matrix[{row}, {col}] is absent"),
        }
    }

    Ok(())
}
