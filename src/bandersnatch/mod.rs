//! Bandersnatch implementation.
//!
//! This module implements the Bandersnatch curve, a twisted Edwards
//! curve of equation `a*x^2 + y^2 = 1 + d*x^2*y^2` over the scalar field
//! of BLS12-381, with `a = -5` and
//! `d = 138827208126141220649022263972958607803/171449701953573178309673572579671231137`.
//! The curve order is `4*n`, for a prime `n` slightly above 2^252.
//! The 2-torsion points are the neutral `N = (0, 1)`, the point
//! `A = (0, -1)`, and two points at infinity `E1` and `E2`, which have
//! no affine coordinates.
//!
//! Six point types are provided, in three coordinate systems:
//!
//!  - `XtwFull` and `XtwSubgroup`: extended twisted Edwards coordinates
//!    `(X:Y:T:Z)`.
//!
//!  - `AxtwFull` and `AxtwSubgroup`: affine coordinates `(x, y, t = x*y)`;
//!    additions are slower (an inversion per result), but the values
//!    are compact and convenient for precomputed tables.
//!
//!  - `EfghFull` and `EfghSubgroup`: the intermediate four-factor form
//!    produced by the addition formulas; it saves multiplications when
//!    a result is immediately used as an operand again.
//!
//! The `*Full` types can hold any curve point (except `AxtwFull`, which
//! cannot hold the points at infinity). The `*Subgroup` types hold only
//! points of the prime-order subgroup, which they store modulo `A` (a
//! subgroup point `P` may be stored as `P` or `P + A`, since exactly one
//! of them is in the subgroup). On such representatives, the unified
//! addition formulas are complete, and they are used exclusively. The
//! full types also fall back to the dual addition formulas when needed.
//!
//! All six types implement the `CurvePoint` trait. Its operations are
//! generic over the operand types: for instance, an `EfghFull` can be
//! set to the sum of an `XtwSubgroup` and an `AxtwFull`. A subgroup
//! receiver requires its operands to be in the subgroup, and panics
//! otherwise. Doubling accepts any operand, since `2*P` is always in
//! the subgroup; the endomorphism accepts operands of the `N` and `A`
//! cosets, since `psi(A) = N`. The subgroup types also implement
//! `SubgroupPoint`, which adds multiplication by a `Scalar` (integers
//! modulo `n`) with the GLV method, and a canonical 32-byte encoding.
//!
//! Every type also has a "NaP" (not a point) state, which is what
//! `Default` produces, and which all operations propagate. NaP is never
//! equal to a point, and fails every validity test.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use crate::field::{GFbandersnatch, MontInt256};

type GF = GFbandersnatch;

/// Integers modulo the prime order `n` of the subgroup.
pub type Scalar = MontInt256<
    0x74FD06B52876E7E1, 0xFF8F870074190471,
    0x0CCE760202687600, 0x1CFB69D4CA675F52>;

/// Cofactor of the curve: its order is `COFACTOR*n`.
pub const COFACTOR: u64 = 4;

/// Order of the curve, `4*n` (little-endian 64-bit limbs). The subgroup
/// order `n` is `Scalar::MODULUS`.
pub const CURVE_ORDER: [u64; 4] = [
    0xD3F41AD4A1DB9F84, 0xFE3E1C01D06411C5,
    0x3339D80809A1D803, 0x73EDA753299D7D48,
];

/// Curve parameter `a = -5`.
pub const CURVE_A: GF = GF::w64be(
    0x73EDA753299D7D48, 0x3339D80809A1D805,
    0x53BDA402FFFE5BFE, 0xFFFFFFFEFFFFFFFC);

/// Curve parameter `d`.
pub const CURVE_D: GF = GF::w64be(
    0x6389C12633C267CB, 0xC66E3BF86BE3B6D8,
    0xCB66677177E54F92, 0xB369F2F5188D58E7);

/// The square root of `d/a` used for the points at infinity:
/// `E1 = (SQRT_D_OVER_A : 0 : 1 : 0)` and `E2 = (-SQRT_D_OVER_A : 0 : 1 : 0)`.
pub const SQRT_D_OVER_A: GF = GF::w64be(
    0x52C9F28B828426A5, 0x61F00D3A63511A88,
    0x2EA712770D9AF4D6, 0xEE0F014D172510B6);

// Endomorphism constants:
//   psi(x, y) = (c*(1 - y^2)/(x*y), b*(y^2 + b)/(y^2 - b))
pub(crate) const ENDO_B: GF = GF::w64be(
    0x52C9F28B828426A5, 0x61F00D3A63511A88,
    0x2EA712770D9AF4D6, 0xEE0F014D172510B4);
pub(crate) const ENDO_C: GF = GF::w64be(
    0x6CC624CF865457C3, 0xA97C6EFD6C17D107,
    0x8456ABCFFF36F4E9, 0x515C806CDF650B3D);

/// Eigenvalue of the endomorphism on the subgroup: `psi(P) = LAMBDA*P`,
/// with `LAMBDA^2 = -2 mod n`.
pub const LAMBDA: Scalar = Scalar::w64be(
    0x13B4F3DC4A39A493, 0xEDF849562B38C72B,
    0xCFC49DB970A5056E, 0xD13D21408783DF05);

// Conventional generator of the subgroup (affine coordinates).
pub(crate) const GENERATOR_X: GF = GF::w64be(
    0x29C132CC2C0B34C5, 0x743711777BBE42F3,
    0x2B79C022AD998465, 0xE1E71866A252AE18);
pub(crate) const GENERATOR_Y: GF = GF::w64be(
    0x2A6C669EDA123E0F, 0x157D8B50BADCD586,
    0x358CAD81EEE46460, 0x5E3167B6CC974166);
pub(crate) const GENERATOR_T: GF = GF::w64be(
    0x5E61C8A110562844, 0x571F0FDC470AC5EA,
    0x53E51C121B538D00, 0xE2594F7A0D4781AB);

/// Whether the caller vouches for the validity of a point being
/// converted or constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrustLevel {
    /// Checks are skipped; invalid input yields unspecified results.
    Trusted,
    /// The input is verified, and rejected with an error if invalid.
    Untrusted,
}

/// Cosets of the prime-order subgroup, named after the 2-torsion point
/// they contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coset {
    /// The subgroup itself, containing `N = (0, 1)`.
    N,
    /// The coset of `A = (0, -1)`.
    A,
    /// The coset of the point at infinity `E1 = (sigma : 0 : 1 : 0)`.
    E1,
    /// The coset of the point at infinity `E2 = (-sigma : 0 : 1 : 0)`.
    E2,
}

// Arithmetic operators, equality and Default for a point type. The
// operators produce a value of the same type as their left operand.
macro_rules! point_ops {
    ($T:ident) => {
        impl core::ops::Add<$T> for $T {
            type Output = $T;

            #[inline(always)]
            fn add(self, other: $T) -> $T {
                let mut r = self;
                $crate::bandersnatch::CurvePoint::set_add(&mut r, &self, &other);
                r
            }
        }

        impl core::ops::Add<&$T> for $T {
            type Output = $T;

            #[inline(always)]
            fn add(self, other: &$T) -> $T {
                let mut r = self;
                $crate::bandersnatch::CurvePoint::set_add(&mut r, &self, other);
                r
            }
        }

        impl core::ops::Add<$T> for &$T {
            type Output = $T;

            #[inline(always)]
            fn add(self, other: $T) -> $T {
                let mut r = *self;
                $crate::bandersnatch::CurvePoint::set_add(&mut r, self, &other);
                r
            }
        }

        impl core::ops::Add<&$T> for &$T {
            type Output = $T;

            #[inline(always)]
            fn add(self, other: &$T) -> $T {
                let mut r = *self;
                $crate::bandersnatch::CurvePoint::set_add(&mut r, self, other);
                r
            }
        }

        impl core::ops::AddAssign<$T> for $T {
            #[inline(always)]
            fn add_assign(&mut self, other: $T) {
                let a = *self;
                $crate::bandersnatch::CurvePoint::set_add(self, &a, &other);
            }
        }

        impl core::ops::AddAssign<&$T> for $T {
            #[inline(always)]
            fn add_assign(&mut self, other: &$T) {
                let a = *self;
                $crate::bandersnatch::CurvePoint::set_add(self, &a, other);
            }
        }

        impl core::ops::Sub<$T> for $T {
            type Output = $T;

            #[inline(always)]
            fn sub(self, other: $T) -> $T {
                let mut r = self;
                $crate::bandersnatch::CurvePoint::set_sub(&mut r, &self, &other);
                r
            }
        }

        impl core::ops::Sub<&$T> for $T {
            type Output = $T;

            #[inline(always)]
            fn sub(self, other: &$T) -> $T {
                let mut r = self;
                $crate::bandersnatch::CurvePoint::set_sub(&mut r, &self, other);
                r
            }
        }

        impl core::ops::Sub<$T> for &$T {
            type Output = $T;

            #[inline(always)]
            fn sub(self, other: $T) -> $T {
                let mut r = *self;
                $crate::bandersnatch::CurvePoint::set_sub(&mut r, self, &other);
                r
            }
        }

        impl core::ops::Sub<&$T> for &$T {
            type Output = $T;

            #[inline(always)]
            fn sub(self, other: &$T) -> $T {
                let mut r = *self;
                $crate::bandersnatch::CurvePoint::set_sub(&mut r, self, other);
                r
            }
        }

        impl core::ops::SubAssign<$T> for $T {
            #[inline(always)]
            fn sub_assign(&mut self, other: $T) {
                let a = *self;
                $crate::bandersnatch::CurvePoint::set_sub(self, &a, &other);
            }
        }

        impl core::ops::SubAssign<&$T> for $T {
            #[inline(always)]
            fn sub_assign(&mut self, other: &$T) {
                let a = *self;
                $crate::bandersnatch::CurvePoint::set_sub(self, &a, other);
            }
        }

        impl core::ops::Neg for $T {
            type Output = $T;

            #[inline(always)]
            fn neg(self) -> $T {
                let mut r = self;
                $crate::bandersnatch::CurvePoint::set_neg(&mut r, &self);
                r
            }
        }

        impl core::ops::Neg for &$T {
            type Output = $T;

            #[inline(always)]
            fn neg(self) -> $T {
                let mut r = *self;
                $crate::bandersnatch::CurvePoint::set_neg(&mut r, self);
                r
            }
        }

        impl core::ops::Mul<u64> for $T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: u64) -> $T {
                $crate::bandersnatch::CurvePoint::mul_small(&self, other)
            }
        }

        impl core::ops::Mul<u64> for &$T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: u64) -> $T {
                $crate::bandersnatch::CurvePoint::mul_small(self, other)
            }
        }

        impl PartialEq for $T {
            #[inline]
            fn eq(&self, other: &$T) -> bool {
                $crate::bandersnatch::CurvePoint::is_equal(self, other)
            }
        }

        impl Eq for $T { }

        // The default value is NaP.
        impl Default for $T {
            #[inline(always)]
            fn default() -> $T {
                <$T as $crate::bandersnatch::CurvePoint>::NAP
            }
        }
    };
}

// Multiplication by a Scalar, for the subgroup types.
macro_rules! subgroup_ops {
    ($T:ident) => {
        impl core::ops::Mul<$crate::bandersnatch::Scalar> for $T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: $crate::bandersnatch::Scalar) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(&self, &other)
            }
        }

        impl core::ops::Mul<&$crate::bandersnatch::Scalar> for $T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: &$crate::bandersnatch::Scalar) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(&self, other)
            }
        }

        impl core::ops::Mul<$crate::bandersnatch::Scalar> for &$T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: $crate::bandersnatch::Scalar) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(self, &other)
            }
        }

        impl core::ops::Mul<&$crate::bandersnatch::Scalar> for &$T {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: &$crate::bandersnatch::Scalar) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(self, other)
            }
        }

        impl core::ops::MulAssign<$crate::bandersnatch::Scalar> for $T {
            #[inline(always)]
            fn mul_assign(&mut self, other: $crate::bandersnatch::Scalar) {
                *self = $crate::bandersnatch::SubgroupPoint::mul_scalar(self, &other);
            }
        }

        impl core::ops::MulAssign<&$crate::bandersnatch::Scalar> for $T {
            #[inline(always)]
            fn mul_assign(&mut self, other: &$crate::bandersnatch::Scalar) {
                *self = $crate::bandersnatch::SubgroupPoint::mul_scalar(self, other);
            }
        }

        impl core::ops::Mul<$T> for $crate::bandersnatch::Scalar {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: $T) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(&other, &self)
            }
        }

        impl core::ops::Mul<&$T> for $crate::bandersnatch::Scalar {
            type Output = $T;

            #[inline(always)]
            fn mul(self, other: &$T) -> $T {
                $crate::bandersnatch::SubgroupPoint::mul_scalar(other, &self)
            }
        }
    };
}

// Infallible conversions. With "exact", the conversion goes through the
// point itself; with "decaf" (between two subgroup types), the stored
// representative modulo A is kept.
macro_rules! point_from {
    (exact: $src:ident => $dst:ident) => {
        impl From<$src> for $dst {
            #[inline]
            fn from(p: $src) -> $dst {
                use $crate::bandersnatch::coords::Sealed;
                <$dst as Sealed>::from_xtw(&p.exact_xtw())
            }
        }
    };
    (decaf: $src:ident => $dst:ident) => {
        impl From<$src> for $dst {
            #[inline]
            fn from(p: $src) -> $dst {
                use $crate::bandersnatch::coords::Sealed;
                <$dst as Sealed>::from_xtw(&p.decaf_xtw())
            }
        }
    };
}

// Child modules come after the macros, which they use.
mod coords;
pub mod glv;
mod mul;
mod point;
mod xtw;
mod axtw;
mod efgh;

pub use point::{CurvePoint, SubgroupPoint};
pub use xtw::{XtwFull, XtwSubgroup};
pub use axtw::{AxtwFull, AxtwSubgroup};
pub use efgh::{EfghFull, EfghSubgroup};
pub use glv::{GlvDecomposition, SignedDigit, SlidingWindowDigits};
pub use glv::{GLV_B1, GLV_B2};
