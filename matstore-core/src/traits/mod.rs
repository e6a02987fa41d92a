//! Shared matrix traits
//!
//! The element constraint and the storage/operation surface every
//! representation implements.

pub mod element;
pub mod matrix;

pub use element::MatrixElement;
pub use matrix::{content_eq, MatrixOps, MatrixStorage};
