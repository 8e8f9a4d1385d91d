//! Error type shared by all fallible operations.
//!
//! Contract violations (e.g. feeding a point outside of the prime-order
//! subgroup to an operation on a subgroup-only type) are not reported
//! through this type; they panic.

/// Failure of a field or curve operation on invalid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("coordinates do not satisfy the curve equation")]
    NotOnCurve,
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,
    #[error("point is at infinity and has no affine coordinates")]
    PointAtInfinity,
    #[error("value is not a point (NaP)")]
    NotAPoint,
    #[error("encoding is not canonical")]
    NonCanonical,
    #[error("invalid input length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("value is not a quadratic residue")]
    NotASquare,
    #[error("division by zero")]
    DivisionByZero,
}
