//! Byte region validation for the binary values region
//!
//! Pure checks used by the file backends before a byte region is
//! reinterpreted as a typed element array.

use crate::error::MatrixError;

/// Align an offset up to a boundary (boundary must be a power of 2)
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Validate a byte length as a whole number of `T` elements
///
/// Checks size alignment and guards the element count against downstream
/// overflow.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, MatrixError> {
    let element_size = core::mem::size_of::<T>();

    if byte_len % element_size != 0 {
        return Err(MatrixError::ArrayAlignment);
    }

    let count = byte_len / element_size;
    if count > usize::MAX / 8 {
        return Err(MatrixError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Validate that a byte slice can be reinterpreted as a `T` array
///
/// Combines pointer alignment and length validation; returns the element
/// count. The caller still performs the cast itself.
pub fn validate_typed_slice<T>(data: &[u8]) -> Result<usize, MatrixError> {
    if (data.as_ptr() as usize) % core::mem::align_of::<T>() != 0 {
        return Err(MatrixError::ArrayAlignment);
    }
    validate_array_bounds::<T>(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to_boundary() {
        assert_eq!(align_to_boundary(0, 8), 0);
        assert_eq!(align_to_boundary(1, 8), 8);
        assert_eq!(align_to_boundary(8, 8), 8);
        assert_eq!(align_to_boundary(13, 4), 16);
    }

    #[test]
    fn test_validate_array_bounds() {
        assert_eq!(validate_array_bounds::<u32>(16), Ok(4));
        assert_eq!(validate_array_bounds::<u64>(24), Ok(3));
        assert_eq!(validate_array_bounds::<u32>(0), Ok(0));
        assert_eq!(
            validate_array_bounds::<u32>(15),
            Err(MatrixError::ArrayAlignment)
        );
    }

    #[test]
    fn test_validate_typed_slice() {
        let aligned: [u64; 4] = [0; 4];
        let bytes =
            unsafe { core::slice::from_raw_parts(aligned.as_ptr() as *const u8, 32) };
        assert_eq!(validate_typed_slice::<u64>(bytes), Ok(4));

        // Offsetting by one byte breaks u64 alignment
        assert_eq!(
            validate_typed_slice::<u64>(&bytes[1..9]),
            Err(MatrixError::ArrayAlignment)
        );
    }
}
