//! Demo driver: fills one matrix pair per representation, runs the full
//! operation set and round-trips the results through the file backends.

use matstore::{
    content_eq, write_text, BlockMatrix, DenseMatrix, DiagonalMatrix, FileError, MatrixFile,
    MatrixOps, MatrixStorage,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), FileError> {
    let mut rng = StdRng::seed_from_u64(42);

    println!("=== DenseMatrix ===");
    let mut a = DenseMatrix::<i32>::new(4, 4)?;
    let mut b = DenseMatrix::<i32>::new(4, 4)?;
    a.fill_random(-10, 10, &mut rng)?;
    b.fill_random(-10, 10, &mut rng)?;

    write_text("dense_a.txt", &a)?;
    write_text("dense_b.txt", &b)?;
    let a: DenseMatrix<i32> = matstore::read_dense("dense_a.txt")?;
    let b: DenseMatrix<i32> = matstore::read_dense("dense_b.txt")?;
    println!("exported and re-imported dense_a.txt / dense_b.txt");

    let product = a.matmul(&b)?;
    write_text("dense_product.txt", &product)?;

    let mut hadamard = a.clone();
    hadamard.elem_mul_assign(&b)?;
    write_text("dense_hadamard.txt", &hadamard)?;

    let mut flipped = a.clone();
    flipped.transpose();
    write_text("dense_transposed.txt", &flipped)?;

    let mut sum = a.clone();
    sum.add_assign(&b)?;
    let mut diff = a.clone();
    diff.sub_assign(&b)?;
    write_text("dense_sum.txt", &sum)?;
    write_text("dense_diff.txt", &diff)?;
    println!("dense results written ({} non-zeros in the product)", product.nnz());

    println!("\n=== DiagonalMatrix ===");
    let mut d1 = DiagonalMatrix::<i32>::new(5, 5)?;
    let mut d2 = DiagonalMatrix::<i32>::new(5, 5)?;
    d1.fill_random(-10, 10, &mut rng)?;
    d2.fill_random(-10, 10, &mut rng)?;

    d1.compact()?;
    d2.compact()?;
    println!("compacted both operands to diagonal-only storage");

    let mut sum = d1.clone();
    sum.add_assign(&d2)?;
    let product = d1.diag_mul(&d2)?;
    let kron = d1.kronecker(&d2)?;
    write_text("diagonal_sum.txt", &sum)?;
    write_text("diagonal_product.txt", &product)?;
    write_text("diagonal_kronecker.txt", &kron)?;
    println!(
        "diagonal results written; kronecker product is {}x{}",
        kron.rows(),
        kron.cols()
    );

    println!("\n=== BlockMatrix ===");
    let mut b1 = BlockMatrix::<i32>::new(6, 6)?;
    b1.fill_random(-10, 10, &mut rng)?;
    let b2 = BlockMatrix::from_entries(6, 6, &[(0, 0, 3), (2, 4, -7), (5, 5, 1)])?;

    let product = b1.matmul(&b2)?;
    println!(
        "block product keeps {} of {} cells present",
        product.nnz(),
        6 * 6
    );

    let mut sum = b1.clone();
    sum.add_assign(&b2)?;
    let mut flipped = sum.clone();
    flipped.transpose();
    flipped.transpose();
    assert!(content_eq(&flipped, &sum));

    MatrixFile::write_matrix("block_product.matx", &product)?;
    let reloaded = MatrixFile::open("block_product.matx")?.read_block::<i32>()?;
    assert!(content_eq(&reloaded, &product));
    println!("block product round-tripped through block_product.matx");

    Ok(())
}
