//! Format constants and magic bytes

/// Default alignment boundary for the values region
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Upper bound on a single matrix dimension accepted from a file header
///
/// Rejecting absurd declared shapes early keeps a corrupt header from
/// driving a huge allocation.
pub const MAX_DIMENSION: u64 = 1 << 32;
