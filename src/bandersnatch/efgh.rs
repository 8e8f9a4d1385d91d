// Points in EFGH coordinates: X = E*F, Y = G*H, T = E*H, Z = F*G.
//
// Group law outputs are produced natively in this form, so storing them
// as EFGH saves the four multiplications of the conversion; conversely,
// using an EFGH value as an operand costs these four multiplications.

use super::coords::{Efgh, Sealed, Xtw};
use super::{AxtwFull, AxtwSubgroup, XtwFull, XtwSubgroup};
use super::{CurvePoint, Coset, SubgroupPoint, GF};
use super::{GENERATOR_X, GENERATOR_Y};
use crate::Error;

/// A point on the whole curve, in EFGH coordinates.
#[derive(Clone, Copy, Debug)]
pub struct EfghFull(Efgh);

/// A point of the prime-order subgroup, in EFGH coordinates (stored
/// modulo A).
#[derive(Clone, Copy, Debug)]
pub struct EfghSubgroup(Efgh);

impl Sealed for EfghFull {

    #[inline]
    fn exact_xtw(&self) -> Xtw {
        self.0.to_xtw()
    }

    #[inline]
    fn decaf_xtw(&self) -> Xtw {
        self.0.to_xtw()
    }

    #[inline]
    fn from_xtw(p: &Xtw) -> Self {
        Self(Efgh::from_xtw(p))
    }

    #[inline(always)]
    fn from_efgh(p: &Efgh) -> Self {
        Self(*p)
    }
}

impl Sealed for EfghSubgroup {

    #[inline]
    fn exact_xtw(&self) -> Xtw {
        self.0.to_xtw().decaf_to_exact()
    }

    #[inline]
    fn decaf_xtw(&self) -> Xtw {
        self.0.to_xtw()
    }

    #[inline]
    fn from_xtw(p: &Xtw) -> Self {
        Self(Efgh::from_xtw(p))
    }

    #[inline(always)]
    fn from_efgh(p: &Efgh) -> Self {
        Self(*p)
    }
}

impl CurvePoint for EfghFull {
    const SUBGROUP_ONLY: bool = false;
    const CAN_REPRESENT_INFINITY: bool = true;
    const NEUTRAL: Self = Self(Efgh::NEUTRAL);
    const NAP: Self = Self(Efgh::NAP);

    #[inline]
    fn is_nap(&self) -> bool {
        self.0.is_nap()
    }
}

impl CurvePoint for EfghSubgroup {
    const SUBGROUP_ONLY: bool = true;
    const CAN_REPRESENT_INFINITY: bool = false;
    const NEUTRAL: Self = Self(Efgh::NEUTRAL);
    const NAP: Self = Self(Efgh::NAP);

    #[inline]
    fn is_nap(&self) -> bool {
        self.0.is_nap()
    }

    // Subgroup membership modulo A: the E-character of the representative
    // is enough, since it is +1 on both the N and A cosets.
    fn validate(&self) -> bool {
        let p = &self.0;
        if p.is_nap() || p.F.is_zero() || p.G.is_zero() {
            return false;
        }
        p.to_xtw().on_curve() && p.legendre_e() == 1
    }
}

impl SubgroupPoint for EfghSubgroup {
    // x = E/G, y = H/F
    const GENERATOR: Self = Self(Efgh {
        E: GENERATOR_X,
        F: GF::ONE,
        G: GF::ONE,
        H: GENERATOR_Y,
    });
}

impl EfghFull {

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
        let p = &self.0;
        if p.is_nap() {
            return Err(Error::NotAPoint);
        }
        if p.F.is_zero() || p.G.is_zero() {
            // Z = 0: a point at infinity.
            return Ok(self.exact_xtw().coset());
        }
        Ok(match (p.legendre_e() == 1, p.legendre_a() == 1) {
            (true, true) => Coset::N,
            (true, false) => Coset::A,
            (false, true) => Coset::E1,
            (false, false) => Coset::E2,
        })
    }
}

point_ops!(EfghFull);
point_ops!(EfghSubgroup);
subgroup_ops!(EfghSubgroup);

point_from!(exact: XtwFull => EfghFull);
point_from!(exact: XtwSubgroup => EfghFull);
point_from!(exact: AxtwFull => EfghFull);
point_from!(exact: AxtwSubgroup => EfghFull);
point_from!(exact: EfghSubgroup => EfghFull);
point_from!(decaf: XtwSubgroup => EfghSubgroup);
point_from!(decaf: AxtwSubgroup => EfghSubgroup);

#[cfg(test)]
mod tests {

    use super::{EfghFull, EfghSubgroup};
    use crate::bandersnatch::coords::Sealed;
    use crate::bandersnatch::tests::DRNG;
    use crate::bandersnatch::{CurvePoint, SubgroupPoint, TrustLevel};
    use crate::bandersnatch::{AxtwFull, AxtwSubgroup, XtwFull, XtwSubgroup};
    use crate::Error;

    #[test]
    fn full() {
        let mut rng = DRNG::from_seed(b"efgh full");
        let e1 = EfghFull::NEUTRAL.add_torsion_e1();
        let e2 = EfghFull::NEUTRAL.add_torsion_e2();
        assert!(e1.is_at_infinity() && e2.is_at_infinity());
        assert!(e1.is_equal(&XtwFull::NEUTRAL.add_torsion_e1()));
        assert!(e1 + e2 == EfghFull::NEUTRAL.add_torsion_a());
        for _ in 0..20 {
            let f = XtwFull::random(&mut rng);
            let g = XtwFull::random(&mut rng);
            let p = EfghFull::from(f);
            let q = EfghFull::from(g);
            assert!(p.validate());
            assert!(p.is_equal(&f));
            assert!((p + q).is_equal(&(f + g)));
            assert!((p - q).is_equal(&(f - g)));
            assert!(p.double().is_equal(&f.double()));
            assert!(p.endo().is_equal(&f.endo()));
            assert!(p.coset() == f.coset());
            assert!(p.add_torsion_e1().coset() == f.add_torsion_e1().coset());
            assert!(p.add_torsion_a().is_equal(&f.add_torsion_a()));
            assert!(p.add_torsion_e1().is_equal(&f.add_torsion_e1()));
            assert!(p.add_torsion_e2().is_equal(&f.add_torsion_e2()));
            assert!(p.add_torsion_e1().add_torsion_a().add_torsion_e2() == p);
            assert!(XtwFull::from(p) == f);

            // Mixed operand types.
            let a = AxtwFull::NEUTRAL + AxtwFull::from(XtwSubgroup::random(&mut rng));
            let mut r = EfghFull::NAP;
            r.set_add(&f, &a);
            assert!(r.is_equal(&(f + XtwFull::from(a))));
            r.set_sub(&a, &q);
            assert!(r.is_equal(&(XtwFull::from(a) - g)));
        }
        assert!(EfghFull::NAP.coset() == Err(Error::NotAPoint));
        assert!(EfghFull::default().is_nap());
        assert!(!EfghFull::NAP.validate());
    }

    #[test]
    fn subgroup() {
        let mut rng = DRNG::from_seed(b"efgh subgroup");
        for _ in 0..20 {
            let s = XtwSubgroup::random(&mut rng);
            let t = XtwSubgroup::random(&mut rng);
            let p = EfghSubgroup::from(s);
            let q = EfghSubgroup::from(AxtwSubgroup::from(t));
            assert!(p.validate());

            // validate() holds on both representatives modulo A, and
            // fails on the E1 and E2 cosets.
            let pa = EfghSubgroup::from_xtw(&s.decaf_xtw().add_torsion_a());
            assert!(pa.validate() && pa == p);
            let fs = XtwFull::from(s);
            let bad = EfghSubgroup::from_xtw(&fs.add_torsion_e1().exact_xtw());
            assert!(!bad.validate());
            let bad = EfghSubgroup::from_xtw(&fs.add_torsion_e2().exact_xtw());
            assert!(!bad.validate());
            assert!(p.is_equal(&s));
            assert!((p + q).is_equal(&(s + t)));
            assert!((p - q).is_equal(&(s - t)));
            assert!(p.double().is_equal(&s.double()));
            assert!(p.endo().is_equal(&s.endo()));
            assert!(EfghFull::from(p).is_equal(&XtwFull::from(s)));
            assert!(XtwSubgroup::from(p) == s);
            assert!(AxtwSubgroup::from(p).is_equal(&s));
            assert!(AxtwFull::from(p).is_equal(&XtwFull::from(s)));
            let f = EfghFull::from(p);
            assert!(EfghSubgroup::from_point(&f, TrustLevel::Untrusted) == Ok(p));
            assert!(EfghSubgroup::from_point(&f.add_torsion_e2(), TrustLevel::Untrusted)
                == Err(Error::NotInSubgroup));
        }
        assert!(EfghSubgroup::GENERATOR.validate());
        assert!(EfghSubgroup::GENERATOR.is_equal(&XtwSubgroup::GENERATOR));
        assert!(EfghSubgroup::NEUTRAL.is_neutral());
        assert!(!EfghSubgroup::NAP.validate());
    }
}
