//! Bandersnatch is a Rust library for arithmetic on the Bandersnatch
//! elliptic curve.
//!
//! Bandersnatch is a twisted Edwards curve `a*x^2 + y^2 = 1 + d*x^2*y^2`
//! with `a = -5`, defined over the scalar field of BLS12-381. Its order
//! is `4*n` for a 253-bit prime `n`, and it has an efficiently
//! computable endomorphism of degree 2, which acts on the prime-order
//! subgroup as multiplication by a square root of -2 modulo `n`. This
//! allows GLV-style scalar multiplication.
//!
//! Field elements are implemented through the generic Montgomery type
//! defined in `backend`; the base field is `field::GFbandersnatch`. The
//! curve itself is in the `bandersnatch` module, which provides six
//! point types: three coordinate systems (extended projective, affine,
//! and "double-projective" EFGH coordinates), each in a variant able to
//! hold any curve point and a variant restricted to the prime-order
//! subgroup. The latter store points modulo the 2-torsion point `A`, so
//! that the unified addition formulas are complete on them.
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the
//! standard library, which only matters for the `std::error::Error`
//! implementation of the error type and for the `tracing` dispatcher.
//!
//! # Conventions
//!
//! Unlike constant-time cryptographic libraries, this crate uses plain
//! `bool` values for predicates, and `PartialEq` is implemented on
//! field elements and points; most functions are variable-time.
//! Functions that modify the object on which they are called tend to
//! have a name in `set_*()` (e.g. for a curve point `P`, `P.set_double(&Q)`
//! writes the double of `Q` into `P`, while `Q.double()` returns the
//! double as a new instance).
//!
//! Invalid inputs (points not on the curve, non-canonical encodings,
//! division by zero...) are reported through `Error`. Calling an
//! operation outside of its contract (such as adding a point of the
//! full curve that is not in the subgroup into a subgroup-only type) is
//! a programming error and panics.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

// Compile-time assertion; evaluated in constant expressions.
macro_rules! static_assert {
    ($condition:expr) => {
        let _ = &[()][1 - ($condition) as usize];
    }
}

pub mod backend;
pub mod bandersnatch;
pub mod error;
pub mod field;

pub use error::Error;
