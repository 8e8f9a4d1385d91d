// Points in affine coordinates (x, y, t = x*y).
//
// Each operation computes in extended coordinates and normalizes the
// result, which costs one inversion. A result that cannot be held (a
// point at infinity, for AxtwFull) becomes NaP.

use core::convert::TryFrom;

use super::coords::{Efgh, Sealed, Xtw};
use super::{EfghFull, EfghSubgroup, XtwFull, XtwSubgroup};
use super::{CurvePoint, Coset, SubgroupPoint, GF};
use super::{GENERATOR_X, GENERATOR_Y, GENERATOR_T};
use crate::Error;

/// A point on the curve, other than E1 and E2, in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AxtwFull {
    x: GF,
    y: GF,
    t: GF,
}

/// A point of the prime-order subgroup, in affine coordinates (stored
/// modulo A).
#[derive(Clone, Copy, Debug)]
pub struct AxtwSubgroup {
    x: GF,
    y: GF,
    t: GF,
}

// Number of points normalized with a single inversion.
const BATCH: usize = 64;

// Affine coordinates, or NaP for values at infinity.
fn normalize(p: &Xtw) -> (GF, GF, GF) {
    if p.is_nap() {
        return (GF::ZERO, GF::ZERO, GF::ZERO);
    }
    match p.Z.invert() {
        Ok(iz) => (p.X * iz, p.Y * iz, p.T * iz),
        Err(_) => (GF::ZERO, GF::ZERO, GF::ZERO),
    }
}

impl Sealed for AxtwFull {

    #[inline]
    fn exact_xtw(&self) -> Xtw {
        Xtw { X: self.x, Y: self.y, T: self.t, Z: GF::ONE }
    }

    #[inline]
    fn decaf_xtw(&self) -> Xtw {
        self.exact_xtw()
    }

    fn from_xtw(p: &Xtw) -> Self {
        let (x, y, t) = normalize(p);
        Self { x, y, t }
    }

    fn from_efgh(p: &Efgh) -> Self {
        Self::from_xtw(&p.to_xtw())
    }
}

impl Sealed for AxtwSubgroup {

    #[inline]
    fn exact_xtw(&self) -> Xtw {
        self.decaf_xtw().decaf_to_exact()
    }

    #[inline]
    fn decaf_xtw(&self) -> Xtw {
        Xtw { X: self.x, Y: self.y, T: self.t, Z: GF::ONE }
    }

    fn from_xtw(p: &Xtw) -> Self {
        let (x, y, t) = normalize(p);
        Self { x, y, t }
    }

    fn from_efgh(p: &Efgh) -> Self {
        Self::from_xtw(&p.to_xtw())
    }
}

impl CurvePoint for AxtwFull {
    const SUBGROUP_ONLY: bool = false;
    const CAN_REPRESENT_INFINITY: bool = false;
    const NEUTRAL: Self = Self { x: GF::ZERO, y: GF::ONE, t: GF::ZERO };
    const NAP: Self = Self { x: GF::ZERO, y: GF::ZERO, t: GF::ZERO };
}

impl CurvePoint for AxtwSubgroup {
    const SUBGROUP_ONLY: bool = true;
    const CAN_REPRESENT_INFINITY: bool = false;
    const NEUTRAL: Self = Self { x: GF::ZERO, y: GF::ONE, t: GF::ZERO };
    const NAP: Self = Self { x: GF::ZERO, y: GF::ZERO, t: GF::ZERO };
}

impl SubgroupPoint for AxtwSubgroup {
    const GENERATOR: Self = Self {
        x: GENERATOR_X,
        y: GENERATOR_Y,
        t: GENERATOR_T,
    };
}

impl AxtwFull {

    /// Returns `self + A`.
    #[inline]
    pub fn add_torsion_a(&self) -> Self {
        Self { x: -self.x, y: -self.y, t: self.t }
    }

    /// Returns `self + E1`, which is a point at infinity if `self` is N
    /// or A.
    pub fn add_torsion_e1(&self) -> Result<Self, Error> {
        self.shift_to_affine(&self.exact_xtw().add_torsion_e1())
    }

    /// Returns `self + E2`, which is a point at infinity if `self` is N
    /// or A.
    pub fn add_torsion_e2(&self) -> Result<Self, Error> {
        self.shift_to_affine(&self.exact_xtw().add_torsion_e2())
    }

    fn shift_to_affine(&self, p: &Xtw) -> Result<Self, Error> {
        if self.is_nap() {
            return Ok(*self);
        }
        Self::try_from_xtw(p)
    }

    fn try_from_xtw(p: &Xtw) -> Result<Self, Error> {
        if p.is_nap() {
            return Err(Error::NotAPoint);
        }
        if p.Z.is_zero() {
            return Err(Error::PointAtInfinity);
        }
        let iz = p.Z.invert()?;
        Ok(Self { x: p.X * iz, y: p.Y * iz, t: p.T * iz })
    }

    /// Returns the coset of the prime-order subgroup that contains this
    /// point; NaP has none.
    pub fn coset(&self) -> Result<Coset, Error> {
        if self.is_nap() {
            return Err(Error::NotAPoint);
        }
        Ok(self.exact_xtw().coset())
    }

    /// Normalizes a slice of points. Each output is NaP if the
    /// corresponding input is NaP or a point at infinity. The two slices
    /// must have the same length.
    pub fn batch_from_xtw(src: &[XtwFull], dst: &mut [AxtwFull]) {
        assert!(src.len() == dst.len());
        for (s, d) in src.chunks(BATCH).zip(dst.chunks_mut(BATCH)) {
            let mut iz = [GF::ZERO; BATCH];
            for i in 0..s.len() {
                iz[i] = s[i].exact_xtw().Z;
            }
            // Zero inverts to zero.
            GF::batch_invert(&mut iz[..s.len()]);
            for i in 0..s.len() {
                let p = s[i].exact_xtw();
                d[i] = if p.is_nap() || p.Z.is_zero() {
                    Self::NAP
                } else {
                    Self { x: p.X * iz[i], y: p.Y * iz[i], t: p.T * iz[i] }
                };
            }
        }
    }
}

impl TryFrom<XtwFull> for AxtwFull {
    type Error = Error;

    fn try_from(p: XtwFull) -> Result<Self, Error> {
        Self::try_from_xtw(&p.exact_xtw())
    }
}

impl TryFrom<EfghFull> for AxtwFull {
    type Error = Error;

    fn try_from(p: EfghFull) -> Result<Self, Error> {
        Self::try_from_xtw(&p.exact_xtw())
    }
}

point_ops!(AxtwFull);
point_ops!(AxtwSubgroup);
subgroup_ops!(AxtwSubgroup);

point_from!(exact: AxtwSubgroup => AxtwFull);
point_from!(exact: XtwSubgroup => AxtwFull);
point_from!(exact: EfghSubgroup => AxtwFull);
point_from!(decaf: XtwSubgroup => AxtwSubgroup);
point_from!(decaf: EfghSubgroup => AxtwSubgroup);
