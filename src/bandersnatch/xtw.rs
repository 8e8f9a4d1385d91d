// Points in extended twisted Edwards coordinates (X:Y:T:Z).

use tracing::trace;

use super::coords::{Efgh, Sealed, Xtw};
use super::{AxtwFull, AxtwSubgroup, EfghFull, EfghSubgroup};
use super::{CurvePoint, Coset, SubgroupPoint, GF};
use super::{CURVE_A, CURVE_D, GENERATOR_X, GENERATOR_Y, GENERATOR_T};
use crate::{CryptoRng, Error, RngCore};

/// A point on the whole curve, in extended coordinates.
#[derive(Clone, Copy, Debug)]
pub struct XtwFull(Xtw);

/// A point of the prime-order subgroup, in extended coordinates (stored
/// modulo A).
#[derive(Clone, Copy, Debug)]
pub struct XtwSubgroup(Xtw);

impl Sealed for XtwFull {

    #[inline(always)]
    fn exact_xtw(&self) -> Xtw {
        self.0
    }

    #[inline(always)]
    fn decaf_xtw(&self) -> Xtw {
        self.0
    }

    #[inline(always)]
    fn from_xtw(p: &Xtw) -> Self {
        Self(*p)
    }

    #[inline(always)]
    fn from_efgh(p: &Efgh) -> Self {
        Self(p.to_xtw())
    }
}

impl Sealed for XtwSubgroup {

    #[inline]
    fn exact_xtw(&self) -> Xtw {
        self.0.decaf_to_exact()
    }

    #[inline(always)]
    fn decaf_xtw(&self) -> Xtw {
        self.0
    }

    #[inline(always)]
    fn from_xtw(p: &Xtw) -> Self {
        Self(*p)
    }

    #[inline(always)]
    fn from_efgh(p: &Efgh) -> Self {
        Self(p.to_xtw())
    }
}

impl CurvePoint for XtwFull {
    const SUBGROUP_ONLY: bool = false;
    const CAN_REPRESENT_INFINITY: bool = true;
    const NEUTRAL: Self = Self(Xtw::NEUTRAL);
    const NAP: Self = Self(Xtw::NAP);

    #[inline]
    fn is_nap(&self) -> bool {
        self.0.is_nap()
    }
}

impl CurvePoint for XtwSubgroup {
    const SUBGROUP_ONLY: bool = true;
    const CAN_REPRESENT_INFINITY: bool = false;
    const NEUTRAL: Self = Self(Xtw::NEUTRAL);
    const NAP: Self = Self(Xtw::NAP);

    #[inline]
    fn is_nap(&self) -> bool {
        self.0.is_nap()
    }
}

impl SubgroupPoint for XtwSubgroup {
    const GENERATOR: Self = Self(Xtw {
        X: GENERATOR_X,
        Y: GENERATOR_Y,
        T: GENERATOR_T,
        Z: GF::ONE,
    });
}

impl XtwFull {

    /// Returns `self + A`.
    #[inline]
    pub fn add_torsion_a(&self) -> Self {
        Self(self.0.add_torsion_a())
    }

    /// Returns `self + E1`.
    #[inline]
    pub fn add_torsion_e1(&self) -> Self {
        Self(self.0.add_torsion_e1())
    }

    /// Returns `self + E2`.
    #[inline]
    pub fn add_torsion_e2(&self) -> Self {
        Self(self.0.add_torsion_e2())
    }

    /// Returns the coset of the prime-order subgroup that contains this
    /// point; NaP has none.
    pub fn coset(&self) -> Result<Coset, Error> {
        if self.0.is_nap() {
            return Err(Error::NotAPoint);
        }
        Ok(self.0.coset())
    }

    /// Gets a random point, uniformly among all affine points of the
    /// curve (the points at infinity are never returned).
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        loop {
            let x = GF::random(rng);
            let xx = x.square();
            let num = GF::ONE - CURVE_A * xx;
            let den = GF::ONE - CURVE_D * xx;
            if let Ok(y) = den.invert().and_then(|di| (num * di).sqrt()) {
                let y = if (rng.next_u32() & 1) != 0 { -y } else { y };
                return Self(Xtw { X: x, Y: y, T: x * y, Z: GF::ONE });
            }
            trace!("random x has no matching y, retrying");
        }
    }
}

impl XtwSubgroup {

    /// Gets a random point of the prime-order subgroup (the double of
    /// a random curve point).
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut r = Self::NEUTRAL;
        r.set_double(&XtwFull::random(rng));
        r
    }
}

point_ops!(XtwFull);
point_ops!(XtwSubgroup);
subgroup_ops!(XtwSubgroup);

point_from!(exact: XtwSubgroup => XtwFull);
point_from!(exact: AxtwFull => XtwFull);
point_from!(exact: AxtwSubgroup => XtwFull);
point_from!(exact: EfghFull => XtwFull);
point_from!(exact: EfghSubgroup => XtwFull);
point_from!(decaf: AxtwSubgroup => XtwSubgroup);
point_from!(decaf: EfghSubgroup => XtwSubgroup);

#[cfg(test)]
mod tests {

    use super::{XtwFull, XtwSubgroup};
    use core::convert::TryFrom;
    use crate::bandersnatch::coords::Sealed;
    use crate::bandersnatch::tests::DRNG;
    use crate::bandersnatch::{Coset, CurvePoint, SubgroupPoint, TrustLevel};
    use crate::bandersnatch::{AxtwFull, EfghFull, Scalar, SQRT_D_OVER_A};
    use crate::field::GFbandersnatch as GF;
    use crate::Error;

    fn torsion() -> [XtwFull; 4] {
        let n = XtwFull::NEUTRAL;
        [n, n.add_torsion_a(), n.add_torsion_e1(), n.add_torsion_e2()]
    }

    #[test]
    fn torsion_shifts() {
        let mut rng = DRNG::from_seed(b"xtw torsion shifts");
        let [_, a, e1, e2] = torsion();
        assert!(e1.is_at_infinity() && e2.is_at_infinity());
        assert!(!a.is_at_infinity() && !a.is_neutral());
        assert!(e1.xtw_coords().0 == SQRT_D_OVER_A);
        assert!(e1.x_affine() == Err(Error::PointAtInfinity));

        for _ in 0..20 {
            let p = XtwFull::random(&mut rng);
            assert!(p.validate());
            let shifts = [
                (p.add_torsion_a(), a),
                (p.add_torsion_e1(), e1),
                (p.add_torsion_e2(), e2),
            ];
            for (s, t) in shifts.iter() {
                assert!(*s == p + t);
                assert!(s.validate());
            }
            // Involutions, and the composition of all three is the
            // identity.
            assert!(p.add_torsion_a().add_torsion_a() == p);
            assert!(p.add_torsion_e1().add_torsion_e1() == p);
            assert!(p.add_torsion_e2().add_torsion_e2() == p);
            assert!(p.add_torsion_a().add_torsion_e1().add_torsion_e2() == p);
            assert!(p.add_torsion_e2().add_torsion_a().add_torsion_e1() == p);
        }
    }

    #[test]
    fn group_law() {
        let mut rng = DRNG::from_seed(b"xtw group law");
        for _ in 0..20 {
            let p = XtwFull::random(&mut rng);
            let q = XtwFull::random(&mut rng);
            let r = XtwFull::random(&mut rng);
            assert!(p + q == q + p);
            assert!((p + q) + r == p + (q + r));
            assert!(p + p == p.double());
            assert!(p - p == XtwFull::NEUTRAL);
            assert!((p - q) + q == p);
            assert!(-(-p) == p);
            assert!(p + XtwFull::NEUTRAL == p);
            assert!(p.double().is_in_subgroup() || p.double().is_neutral());

            let mut s = p;
            s += q;
            s -= r;
            assert!(s == p + q - r);

            // Affine reads agree with the projective coordinates.
            let (X, Y, T, Z) = p.xtw_coords();
            let iz = Z.invert().unwrap();
            assert!(p.x_affine().unwrap() == X * iz);
            assert!(p.y_affine().unwrap() == Y * iz);
            assert!(p.t_affine().unwrap() == T * iz);
            let x = p.x_affine().unwrap();
            let y = p.y_affine().unwrap();
            assert!(XtwFull::from_affine(x, y, TrustLevel::Untrusted).unwrap() == p);
            assert!(XtwFull::from_affine(x, y + GF::ONE, TrustLevel::Untrusted)
                == Err(Error::NotOnCurve));
        }

        let n = XtwFull::NEUTRAL;
        assert!(n.double() == n);
        assert!(n.x_affine() == Ok(GF::ZERO));
        assert!(n.y_affine() == Ok(GF::ONE));
    }

    #[test]
    fn cosets() {
        // Multiplying by n sends each point to the 2-torsion point of
        // its coset.
        let mut rng = DRNG::from_seed(b"xtw cosets");
        let [tn, ta, te1, te2] = torsion();
        let order = Scalar::MODULUS;
        let mut count = [0usize; 4];
        for _ in 0..200 {
            let p = XtwFull::random(&mut rng);
            let c = p.coset().unwrap();
            let m = p.mul_integer(&order);
            let (t, idx) = match c {
                Coset::N => (tn, 0),
                Coset::A => (ta, 1),
                Coset::E1 => (te1, 2),
                Coset::E2 => (te2, 3),
            };
            assert!(m == t);
            count[idx] += 1;
            assert!(p.is_in_subgroup() == (c == Coset::N));
        }
        // Each coset is hit about a quarter of the time.
        for c in count.iter() {
            assert!(*c > 25 && *c < 75);
        }
        assert!(te1.coset() == Ok(Coset::E1));
        assert!(te2.coset() == Ok(Coset::E2));
        assert!(XtwFull::NAP.coset() == Err(Error::NotAPoint));
    }

    #[test]
    fn subgroup() {
        let mut rng = DRNG::from_seed(b"xtw subgroup");
        for _ in 0..20 {
            let p = XtwSubgroup::random(&mut rng);
            let q = XtwSubgroup::random(&mut rng);
            assert!(p.validate());
            assert!(p.is_in_subgroup());

            // The stored representative may differ from the point by A,
            // which is not observable.
            let pa = XtwSubgroup::from_xtw(&p.decaf_xtw().add_torsion_a());
            assert!(pa == p);
            assert!(pa.xtw_coords() == p.xtw_coords());
            assert!(pa.x_affine() == p.x_affine());
            assert!(XtwFull::from(pa) == XtwFull::from(p));

            // Subgroup arithmetic agrees with full-curve arithmetic.
            let fp = XtwFull::from(p);
            let fq = XtwFull::from(q);
            assert!(XtwFull::from(p + q) == fp + fq);
            assert!(XtwFull::from(pa + q) == fp + fq);
            assert!(XtwFull::from(p - q) == fp - fq);
            assert!(XtwFull::from(-pa) == -fp);
            assert!(XtwFull::from(p.endo()) == fp.endo());
            assert!(p + XtwSubgroup::NEUTRAL == p);
            assert!((p - p).is_neutral());

            // Mixed operands.
            let mut r = XtwSubgroup::NAP;
            r.set_add(&fp, &q);
            assert!(r == p + q);
            let mut s = XtwFull::NAP;
            s.set_sub(&pa, &fq);
            assert!(s == fp - fq);

            // Doubling takes any point into the subgroup.
            let f = XtwFull::random(&mut rng);
            let mut d = XtwSubgroup::NAP;
            d.set_double(&f);
            assert!(XtwFull::from(d) == f.double());

            // psi(A) = N: operands of the A coset map into the subgroup.
            let fa = fp.add_torsion_a();
            let mut e = XtwSubgroup::NAP;
            e.set_endo(&fa);
            assert!(e.validate());
            assert!(XtwFull::from(e) == fa.endo());
            assert!(e == p.endo());
            e.set_endo(&fp);
            assert!(XtwFull::from(e) == fp.endo());
            if f.coset() == Ok(Coset::A) {
                e.set_endo(&f);
                assert!(XtwFull::from(e) == f.endo());
            }

            // Untrusted conversions check membership.
            assert!(XtwSubgroup::from_point(&fp, TrustLevel::Untrusted).unwrap() == p);
            assert!(XtwSubgroup::from_point(&fp.add_torsion_a(), TrustLevel::Untrusted)
                == Err(Error::NotInSubgroup));
            assert!(XtwSubgroup::from_point(&fp.add_torsion_e1(), TrustLevel::Untrusted)
                == Err(Error::NotInSubgroup));
            let x = fp.x_affine().unwrap();
            let y = fp.y_affine().unwrap();
            assert!(XtwSubgroup::from_affine(x, y, TrustLevel::Untrusted).unwrap() == p);
            assert!(XtwSubgroup::from_affine(-x, -y, TrustLevel::Untrusted)
                == Err(Error::NotInSubgroup));
        }
        assert!(XtwSubgroup::GENERATOR.validate());
        assert!(XtwSubgroup::from_point(&XtwFull::NAP, TrustLevel::Trusted)
            == Err(Error::NotAPoint));
    }

    #[test]
    #[should_panic]
    fn subgroup_operand_check() {
        let mut rng = DRNG::from_seed(b"xtw operand check");
        let p = XtwSubgroup::random(&mut rng);
        let f = XtwFull::from(p).add_torsion_e1();
        let mut r = XtwSubgroup::NAP;
        r.set_add(&p, &f);
    }

    #[test]
    #[should_panic(expected = "operand is not in the N or A coset")]
    fn endo_operand_check() {
        // psi maps the E1 and E2 cosets into the A coset.
        let mut rng = DRNG::from_seed(b"xtw endo operand check");
        let p = XtwSubgroup::random(&mut rng);
        let f = XtwFull::from(p).add_torsion_e1();
        assert!(f.endo().coset() == Ok(Coset::A));
        let mut e = XtwSubgroup::NAP;
        e.set_endo(&f);
    }

    #[test]
    fn nap() {
        let mut rng = DRNG::from_seed(b"xtw nap");
        let p = XtwFull::random(&mut rng);
        let nap = XtwFull::default();
        assert!(nap.is_nap());
        assert!(!nap.is_neutral());
        assert!(!nap.is_at_infinity());
        assert!(!nap.is_in_subgroup());
        assert!(!nap.validate());
        assert!(nap == XtwFull::NAP);
        assert!(nap != p);
        assert!((nap + p).is_nap());
        assert!((p - nap).is_nap());
        assert!((-nap).is_nap());
        assert!(nap.double().is_nap());
        assert!(nap.endo().is_nap());
        assert!(nap.mul_small(0).is_nap());
        assert!(nap.add_torsion_e1().is_nap());
        assert!(nap.x_affine() == Err(Error::NotAPoint));
        assert!(AxtwFull::try_from(nap) == Err(Error::NotAPoint));
        assert!(EfghFull::from(nap).is_nap());

        let s = XtwSubgroup::default();
        assert!(s.is_nap() && !s.is_neutral() && !s.is_in_subgroup());
        assert!(!s.validate());
        assert!((s + XtwSubgroup::GENERATOR).is_nap());
        assert!(XtwFull::from(s).is_nap());
    }
}
