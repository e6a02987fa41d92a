//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be stored as
//! matrix elements across all three representations.

use core::ops::{Add, Mul, Sub};

use rand::distributions::uniform::SampleUniform;

use crate::format::DataType;

/// Trait for types that can be stored as matrix elements
///
/// Elements must support the standard arithmetic the operation set relies on
/// (addition, subtraction, multiplication), exact comparison with zero, and
/// uniform sampling for randomized fills. `from_f64`/`to_f64` provide a common
/// interchange type for generic construction, e.g. when parsing a text stream
/// whose element type is only known at the call site.
pub trait MatrixElement:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + SampleUniform
{
    /// Get the DataType tag for this element type
    fn data_type() -> DataType;

    /// The additive identity
    fn zero() -> Self;

    /// The multiplicative identity
    fn one() -> Self;

    /// Exact equality with the additive identity
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic interchange
    fn to_f64(self) -> f64;
}

impl MatrixElement for f32 {
    fn data_type() -> DataType {
        DataType::F32
    }

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for f64 {
    fn data_type() -> DataType {
        DataType::F64
    }

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl MatrixElement for i32 {
    fn data_type() -> DataType {
        DataType::I32
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i64 {
    fn data_type() -> DataType {
        DataType::I64
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_f64(value: f64) -> Self {
        value as i64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u32 {
    fn data_type() -> DataType {
        DataType::U32
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_f64(value: f64) -> Self {
        value as u32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u64 {
    fn data_type() -> DataType {
        DataType::U64
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_f64(value: f64) -> Self {
        value as u64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

// Note: subtraction on the unsigned element types carries the primitive's own
// underflow semantics; the trait does not promise saturation.
