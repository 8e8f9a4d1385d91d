// Capability traits shared by the six point types.

use tracing::debug;

use super::coords::{self, Sealed, Xtw};
use super::mul;
use super::{Scalar, TrustLevel, CURVE_A, CURVE_D, GF};
use crate::Error;

/// Operations common to all point representations.
///
/// Binary operations are generic over the operand types; the result is
/// always converted into the type of the receiver. Receivers of a
/// subgroup type (`SUBGROUP_ONLY`) panic when given, as operand of an
/// addition, subtraction or negation, a point that is not in the
/// prime-order subgroup. NaP operands are accepted everywhere and yield
/// NaP results.
///
/// This trait is sealed: it cannot be implemented outside of this crate.
pub trait CurvePoint: Sealed + core::fmt::Debug {

    /// True if values of this type are always in the prime-order subgroup.
    const SUBGROUP_ONLY: bool;

    /// True if the points at infinity (E1 and E2) can be represented.
    const CAN_REPRESENT_INFINITY: bool;

    /// The neutral element `N = (0, 1)`.
    const NEUTRAL: Self;

    /// Not-a-point.
    const NAP: Self;

    /// Returns true if this value is NaP.
    fn is_nap(&self) -> bool {
        self.decaf_xtw().is_nap()
    }

    /// Returns true if this value is the neutral element. NaP is not
    /// neutral.
    fn is_neutral(&self) -> bool {
        let p = self.decaf_xtw();
        if p.is_nap() || !p.X.is_zero() {
            return false;
        }
        // X = 0 selects N or A; subgroup types identify them.
        Self::SUBGROUP_ONLY || p.Y.equals(p.Z)
    }

    /// Returns true if this value is E1 or E2.
    fn is_at_infinity(&self) -> bool {
        if Self::SUBGROUP_ONLY || !Self::CAN_REPRESENT_INFINITY {
            return false;
        }
        let p = self.exact_xtw();
        !p.is_nap() && p.Z.is_zero()
    }

    /// Returns true if this value is a point of the prime-order subgroup.
    fn is_in_subgroup(&self) -> bool {
        if Self::SUBGROUP_ONLY {
            !self.is_nap()
        } else {
            self.exact_xtw().in_subgroup()
        }
    }

    /// Recomputes the curve equation (and, for subgroup types, the
    /// subgroup membership) from the stored coordinates. NaP fails.
    fn validate(&self) -> bool {
        let p = self.decaf_xtw();
        if p.is_nap() || !p.on_curve() {
            return false;
        }
        !Self::SUBGROUP_ONLY || p.decaf_to_exact().in_subgroup()
    }

    /// Compares two points, possibly of different types. Two NaPs are
    /// equal; a NaP is never equal to a point.
    fn is_equal<Q: CurvePoint>(&self, other: &Q) -> bool {
        if Self::SUBGROUP_ONLY && Q::SUBGROUP_ONLY {
            self.decaf_xtw().equals_decaf(&other.decaf_xtw())
        } else {
            self.exact_xtw().equals_exact(&other.exact_xtw())
        }
    }

    /// Extended coordinates `(X, Y, T, Z)` of this point.
    fn xtw_coords(&self) -> (GF, GF, GF, GF) {
        let p = self.exact_xtw();
        (p.X, p.Y, p.T, p.Z)
    }

    /// Extended coordinates of this point, or of this point plus A. For
    /// types which are not subgroup-only, this is the point itself.
    fn xtw_decaf_coords(&self) -> (GF, GF, GF, GF) {
        let p = self.decaf_xtw();
        (p.X, p.Y, p.T, p.Z)
    }

    /// Affine x coordinate.
    fn x_affine(&self) -> Result<GF, Error> {
        affine(&self.exact_xtw()).map(|(x, _, _)| x)
    }

    /// Affine y coordinate.
    fn y_affine(&self) -> Result<GF, Error> {
        affine(&self.exact_xtw()).map(|(_, y, _)| y)
    }

    /// Affine t coordinate (`t = x*y`).
    fn t_affine(&self) -> Result<GF, Error> {
        affine(&self.exact_xtw()).map(|(_, _, t)| t)
    }

    /// Affine x coordinate of a representative modulo A (see
    /// `xtw_decaf_coords()`).
    fn x_decaf_affine(&self) -> Result<GF, Error> {
        affine(&self.decaf_xtw()).map(|(x, _, _)| x)
    }

    fn y_decaf_affine(&self) -> Result<GF, Error> {
        affine(&self.decaf_xtw()).map(|(_, y, _)| y)
    }

    fn t_decaf_affine(&self) -> Result<GF, Error> {
        affine(&self.decaf_xtw()).map(|(_, _, t)| t)
    }

    /// Builds a point from its affine coordinates. With
    /// `TrustLevel::Untrusted`, the curve equation is verified, and, for
    /// subgroup types, membership in the prime-order subgroup. With
    /// `TrustLevel::Trusted`, invalid coordinates yield an unspecified
    /// value.
    fn from_affine(x: GF, y: GF, trust: TrustLevel) -> Result<Self, Error> {
        let p = Xtw { X: x, Y: y, T: x * y, Z: GF::ONE };
        if trust == TrustLevel::Untrusted {
            if !p.on_curve() {
                debug!("rejected affine coordinates: not on the curve");
                return Err(Error::NotOnCurve);
            }
            if Self::SUBGROUP_ONLY && !p.in_subgroup() {
                debug!("rejected affine coordinates: not in the subgroup");
                return Err(Error::NotInSubgroup);
            }
        }
        Ok(Self::from_xtw(&p))
    }

    #[inline]
    fn set_neutral(&mut self) {
        *self = Self::NEUTRAL;
    }

    /// Sets this value to `a + b`.
    fn set_add<P: CurvePoint, Q: CurvePoint>(&mut self, a: &P, b: &Q) {
        *self = if Self::SUBGROUP_ONLY {
            Self::from_efgh(&coords::add_unified(
                &subgroup_operand(a), &subgroup_operand(b)))
        } else {
            Self::from_efgh(&coords::add_full(&a.exact_xtw(), &b.exact_xtw()))
        };
    }

    /// Sets this value to `a - b`.
    fn set_sub<P: CurvePoint, Q: CurvePoint>(&mut self, a: &P, b: &Q) {
        *self = if Self::SUBGROUP_ONLY {
            Self::from_efgh(&coords::add_unified(
                &subgroup_operand(a), &subgroup_operand(b).neg()))
        } else {
            Self::from_efgh(&coords::add_full(
                &a.exact_xtw(), &b.exact_xtw().neg()))
        };
    }

    /// Sets this value to `2*a`. The double of any curve point is in
    /// the subgroup (modulo A), so subgroup receivers accept any operand.
    fn set_double<P: CurvePoint>(&mut self, a: &P) {
        *self = if Self::SUBGROUP_ONLY {
            Self::from_efgh(&coords::double(&a.decaf_xtw()))
        } else {
            Self::from_efgh(&coords::double(&a.exact_xtw()))
        };
    }

    /// Sets this value to `-a`.
    fn set_neg<P: CurvePoint>(&mut self, a: &P) {
        *self = if Self::SUBGROUP_ONLY {
            Self::from_xtw(&subgroup_operand(a).neg())
        } else {
            Self::from_xtw(&a.exact_xtw().neg())
        };
    }

    /// Sets this value to `psi(a)`. Since `psi(A) = N`, subgroup
    /// receivers also accept operands of the A coset; an operand of the
    /// E1 or E2 coset (whose image lies in the A coset) panics.
    fn set_endo<P: CurvePoint>(&mut self, a: &P) {
        *self = if Self::SUBGROUP_ONLY {
            Self::from_efgh(&coords::endo(&endo_operand(a)))
        } else {
            Self::from_efgh(&coords::endo(&a.exact_xtw()))
        };
    }

    #[inline]
    fn double(&self) -> Self {
        let mut r = *self;
        r.set_double(self);
        r
    }

    #[inline]
    fn endo(&self) -> Self {
        let mut r = *self;
        r.set_endo(self);
        r
    }

    /// Multiplies this point by a non-negative integer (four 64-bit
    /// limbs, little-endian). On types which are not subgroup-only, the
    /// integer is not reduced modulo the subgroup order.
    fn mul_integer(&self, k: &[u64; 4]) -> Self {
        mul::mul_integer(self, k)
    }

    fn mul_small(&self, k: u64) -> Self {
        mul::mul_integer(self, &[k, 0, 0, 0])
    }
}

/// Operations specific to the subgroup-only types.
pub trait SubgroupPoint: CurvePoint {

    /// The conventional generator of the prime-order subgroup.
    const GENERATOR: Self;

    /// Converts a point of any type. NaP is rejected. With
    /// `TrustLevel::Untrusted`, a source that is not in the prime-order
    /// subgroup is rejected with `Error::NotInSubgroup`; with
    /// `TrustLevel::Trusted`, it yields an unspecified value.
    fn from_point<P: CurvePoint>(p: &P, trust: TrustLevel)
        -> Result<Self, Error>
    {
        if P::SUBGROUP_ONLY {
            let q = p.decaf_xtw();
            if q.is_nap() {
                debug!("rejected point conversion: NaP");
                return Err(Error::NotAPoint);
            }
            return Ok(Self::from_xtw(&q));
        }
        let q = p.exact_xtw();
        if q.is_nap() {
            debug!("rejected point conversion: NaP");
            return Err(Error::NotAPoint);
        }
        if trust == TrustLevel::Untrusted && !q.in_subgroup() {
            debug!("rejected point conversion: not in the subgroup");
            return Err(Error::NotInSubgroup);
        }
        Ok(Self::from_xtw(&q))
    }

    /// Multiplies this point by a scalar (GLV method).
    fn mul_scalar(&self, k: &Scalar) -> Self {
        mul::mul_glv(self, k)
    }

    /// Encodes this point over 32 bytes: the affine x coordinate of the
    /// point (not of its representative modulo A), canonical,
    /// little-endian. Calling this function on NaP is a caller error
    /// and panics.
    fn encode(&self) -> [u8; 32] {
        match affine(&self.exact_xtw()) {
            Ok((x, _, _)) => x.encode32(),
            Err(e) => panic!("cannot encode point: {}", e),
        }
    }

    /// Decodes a point from 32 bytes. The input is untrusted: the x
    /// coordinate must be canonical, and correspond to a point of the
    /// prime-order subgroup.
    fn decode(buf: &[u8]) -> Result<Self, Error> {
        let x = GF::decode32(buf).map_err(|e| {
            debug!("rejected point encoding: {}", e);
            e
        })?;

        // y^2 = (1 - a*x^2)/(1 - d*x^2); neither factor can be zero
        // since a and d are not squares.
        let xx = x.square();
        let num = GF::ONE - CURVE_A * xx;
        let den = GF::ONE - CURVE_D * xx;
        let y = match den.invert().and_then(|di| (num * di).sqrt()) {
            Ok(y) => y,
            Err(_) => {
                debug!("rejected point encoding: not on the curve");
                return Err(Error::NotOnCurve);
            }
        };

        // Points of the N and A cosets have a square 1 - a*x^2.
        if num.legendre() != 1 {
            debug!("rejected point encoding: not in the subgroup");
            return Err(Error::NotInSubgroup);
        }

        // (x, -y) = -(P + A): exactly one of the two candidates has
        // A-character +1.
        let mut p = Xtw { X: x, Y: y, T: x * y, Z: GF::ONE };
        if p.legendre_a() != 1 {
            p.Y = -y;
            p.T = -p.T;
        }
        Ok(Self::from_xtw(&p))
    }
}

// Extended coordinates of an operand of a subgroup receiver.
fn subgroup_operand<P: CurvePoint>(p: &P) -> Xtw {
    if P::SUBGROUP_ONLY {
        p.decaf_xtw()
    } else {
        let q = p.exact_xtw();
        assert!(q.is_nap() || q.in_subgroup(),
            "operand is not in the prime-order subgroup");
        q
    }
}

// Operand of psi for a subgroup receiver: NaP, or a point of the N or A
// coset.
fn endo_operand<P: CurvePoint>(p: &P) -> Xtw {
    if P::SUBGROUP_ONLY {
        p.decaf_xtw()
    } else {
        let q = p.exact_xtw();
        assert!(q.is_nap() || (!q.Z.is_zero() && q.legendre_e() == 1),
            "operand is not in the N or A coset");
        q
    }
}

// Affine coordinates (x, y, t).
pub(crate) fn affine(p: &Xtw) -> Result<(GF, GF, GF), Error> {
    if p.is_nap() {
        return Err(Error::NotAPoint);
    }
    if p.Z.is_zero() {
        return Err(Error::PointAtInfinity);
    }
    let iz = p.Z.invert()?;
    Ok((p.X * iz, p.Y * iz, p.T * iz))
}
