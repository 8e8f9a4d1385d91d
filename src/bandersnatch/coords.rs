// Coordinate-level formulas shared by all point types.
//
// Every point type converts to and from the two working systems
// defined here:
//
//  - `Xtw`: extended twisted Edwards coordinates (X:Y:T:Z), with
//    x = X/Z, y = Y/Z and X*Y = T*Z. The two points at infinity E1 and
//    E2 have Z = 0.
//
//  - `Efgh`: the four factors that the addition and doubling formulas
//    compute before their final multiplications; X = E*F, Y = G*H,
//    T = E*H, Z = F*G, hence x = E/G and y = H/F. (E, G) and (F, H)
//    can be scaled independently.
//
// "NaP" (not a point) is the coordinate state X = Y = 0, which no curve
// point can have; in EFGH coordinates it reads E*F = G*H = 0. All
// formulas map NaP inputs to NaP outputs.

#![allow(non_snake_case)]

use tracing::trace;

use crate::field::GFbandersnatch as GF;
use super::{Coset, CURVE_A, CURVE_D, SQRT_D_OVER_A, ENDO_B, ENDO_C};

#[derive(Clone, Copy, Debug)]
pub struct Xtw {
    pub X: GF,
    pub Y: GF,
    pub T: GF,
    pub Z: GF,
}

#[derive(Clone, Copy, Debug)]
pub struct Efgh {
    pub E: GF,
    pub F: GF,
    pub G: GF,
    pub H: GF,
}

/// Conversions between a point type and the working coordinates. This
/// trait is not reachable from outside the crate, which seals
/// `CurvePoint`.
pub trait Sealed: Copy {

    /// Coordinates of the point that this value stands for.
    fn exact_xtw(&self) -> Xtw;

    /// Coordinates as stored. For subgroup types, this is either the
    /// point or the point plus A; for other types, same as `exact_xtw()`.
    fn decaf_xtw(&self) -> Xtw;

    /// Build from coordinates. Subgroup types accept either
    /// representative modulo A.
    fn from_xtw(p: &Xtw) -> Self;

    /// Same as `from_xtw()`, from EFGH coordinates.
    fn from_efgh(p: &Efgh) -> Self;
}

impl Xtw {

    pub const NAP: Self = Self {
        X: GF::ZERO,
        Y: GF::ZERO,
        T: GF::ZERO,
        Z: GF::ZERO,
    };

    pub const NEUTRAL: Self = Self {
        X: GF::ZERO,
        Y: GF::ONE,
        T: GF::ZERO,
        Z: GF::ONE,
    };

    #[inline]
    pub fn is_nap(&self) -> bool {
        self.X.is_zero() && self.Y.is_zero()
    }

    // Curve equation a*X^2 + Y^2 = Z^2 + d*T^2 and X*Y = T*Z. NaP
    // coordinates with T = Z = 0 pass this test.
    pub fn on_curve(&self) -> bool {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let TT = self.T.square();
        (CURVE_A * XX + YY).equals(ZZ + CURVE_D * TT)
            && (self.X * self.Y).equals(self.T * self.Z)
    }

    #[inline]
    pub fn neg(&self) -> Self {
        Self { X: -self.X, Y: self.Y, T: -self.T, Z: self.Z }
    }

    // P + A = (-x, -y)
    #[inline]
    pub fn add_torsion_a(&self) -> Self {
        Self { X: -self.X, Y: -self.Y, T: self.T, Z: self.Z }
    }

    // P + E1 = (sigma/(d*x), a*sigma/(d*y)); projectively, X and Y are
    // swapped with Z and T.
    pub fn add_torsion_e1(&self) -> Self {
        Self {
            X: SQRT_D_OVER_A * self.Y,
            Y: CURVE_A * SQRT_D_OVER_A * self.X,
            T: self.Z,
            Z: CURVE_D * self.T,
        }
    }

    // P + E2 = P + E1 + A
    pub fn add_torsion_e2(&self) -> Self {
        self.add_torsion_e1().add_torsion_a()
    }

    // E-character: Legendre symbol of 1 - a*x^2 (+1 on the N and A
    // cosets, -1 on the E1 and E2 cosets). Defined for all points,
    // including points at infinity.
    #[inline]
    pub fn legendre_e(&self) -> i32 {
        (self.Z.square() - CURVE_A * self.X.square()).legendre()
    }

    // A-character: Legendre symbol of (1 + y)*(1 + sigma*y) (+1 on the N
    // and E1 cosets, -1 on the A and E2 cosets). The point A itself
    // (y = -1) is handled explicitly. Z must not be zero.
    pub fn legendre_a(&self) -> i32 {
        let zy = self.Z + self.Y;
        if zy.is_zero() {
            return -1;
        }
        (zy * (self.Z + SQRT_D_OVER_A * self.Y)).legendre()
    }

    // Membership in the prime-order subgroup (exact coordinates).
    pub fn in_subgroup(&self) -> bool {
        !self.is_nap()
            && !self.Z.is_zero()
            && self.legendre_e() == 1
            && self.legendre_a() == 1
    }

    // Coset of the prime-order subgroup containing this point; the
    // point must not be NaP.
    pub fn coset(&self) -> Coset {
        if self.Z.is_zero() {
            // E1 = (sigma : 0 : 1 : 0), E2 = (-sigma : 0 : 1 : 0)
            return if self.X.equals(SQRT_D_OVER_A * self.T) {
                Coset::E1
            } else {
                Coset::E2
            };
        }
        match (self.legendre_e() == 1, self.legendre_a() == 1) {
            (true, true) => Coset::N,
            (true, false) => Coset::A,
            (false, true) => Coset::E1,
            (false, false) => Coset::E2,
        }
    }

    // Given either representative modulo A of a subgroup point, return
    // the subgroup point itself.
    pub fn decaf_to_exact(&self) -> Self {
        if self.is_nap() || self.legendre_a() == 1 {
            *self
        } else {
            self.add_torsion_a()
        }
    }

    // Exact equality. Two NaPs are equal; NaP never equals a point.
    pub fn equals_exact(&self, rhs: &Self) -> bool {
        match (self.is_nap(), rhs.is_nap()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        match (self.Z.is_zero(), rhs.Z.is_zero()) {
            (false, false) => {
                (self.X * rhs.Z).equals(rhs.X * self.Z)
                    && (self.Y * rhs.Z).equals(rhs.Y * self.Z)
            }
            (true, true) => (self.X * rhs.T).equals(rhs.X * self.T),
            _ => false,
        }
    }

    // Equality modulo A: x/y is invariant under P -> P + A, and
    // determines the class for points of the N and A cosets.
    pub fn equals_decaf(&self, rhs: &Self) -> bool {
        match (self.is_nap(), rhs.is_nap()) {
            (true, true) => true,
            (false, false) => (self.X * rhs.Y).equals(rhs.X * self.Y),
            _ => false,
        }
    }
}

impl Efgh {

    pub const NAP: Self = Self {
        E: GF::ZERO,
        F: GF::ZERO,
        G: GF::ZERO,
        H: GF::ZERO,
    };

    pub const NEUTRAL: Self = Self {
        E: GF::ZERO,
        F: GF::ONE,
        G: GF::ONE,
        H: GF::ONE,
    };

    pub const TORSION_A: Self = Self {
        E: GF::ZERO,
        F: GF::ONE,
        G: GF::ONE,
        H: GF::MINUS_ONE,
    };

    // NaP iff X = E*F and Y = G*H are both zero.
    #[inline]
    pub fn is_nap(&self) -> bool {
        (self.E.is_zero() || self.F.is_zero())
            && (self.G.is_zero() || self.H.is_zero())
    }

    #[inline]
    pub fn to_xtw(&self) -> Xtw {
        Xtw {
            X: self.E * self.F,
            Y: self.G * self.H,
            T: self.E * self.H,
            Z: self.F * self.G,
        }
    }

    pub fn from_xtw(p: &Xtw) -> Self {
        if !p.Z.is_zero() {
            // E/G = X/Z, H/F = Y/Z (scaling factor Z)
            Self { E: p.X, F: p.Z, G: p.Z, H: p.Y }
        } else {
            // At infinity (or NaP): scaling factor X, using X*Y = T*Z.
            Self { E: p.X, F: p.X, G: p.Z, H: p.T }
        }
    }

    #[inline]
    pub fn neg(&self) -> Self {
        Self { E: -self.E, F: self.F, G: self.G, H: self.H }
    }

    #[inline]
    pub fn add_torsion_a(&self) -> Self {
        Self { E: -self.E, F: self.F, G: self.G, H: -self.H }
    }

    pub fn add_torsion_e1(&self) -> Self {
        Self {
            E: SQRT_D_OVER_A * self.G,
            F: SQRT_D_OVER_A * self.H,
            G: CURVE_D * self.E,
            H: self.F,
        }
    }

    pub fn add_torsion_e2(&self) -> Self {
        Self {
            E: -(SQRT_D_OVER_A * self.G),
            F: -(SQRT_D_OVER_A * self.H),
            G: CURVE_D * self.E,
            H: self.F,
        }
    }

    // Characters, as on Xtw (x = E/G, y = H/F).
    #[inline]
    pub fn legendre_e(&self) -> i32 {
        (self.G.square() - CURVE_A * self.E.square()).legendre()
    }

    // F and G must not be zero.
    pub fn legendre_a(&self) -> i32 {
        let fh = self.F + self.H;
        if fh.is_zero() {
            return -1;
        }
        (fh * (self.F + SQRT_D_OVER_A * self.H)).legendre()
    }
}

// Unified addition law (8M). It is complete on the union of the N and
// A cosets; on other inputs it may degenerate to all-zero output, which
// is a NaP.
pub fn add_unified(p: &Xtw, q: &Xtw) -> Efgh {
    let (X1, Y1, T1, Z1) = (&p.X, &p.Y, &p.T, &p.Z);
    let (X2, Y2, T2, Z2) = (&q.X, &q.Y, &q.T, &q.Z);

    let zz = Z1 * Z2;
    let dtt = CURVE_D * (T1 * T2);
    Efgh {
        E: X1 * Y2 + Y1 * X2,
        F: zz - dtt,
        G: zz + dtt,
        H: Y1 * Y2 - CURVE_A * (X1 * X2),
    }
}

// Dual addition law. It is valid exactly where the unified law is not
// (apart from a few pairs where both are valid).
pub fn add_dual(p: &Xtw, q: &Xtw) -> Efgh {
    let (X1, Y1, T1, Z1) = (&p.X, &p.Y, &p.T, &p.Z);
    let (X2, Y2, T2, Z2) = (&q.X, &q.Y, &q.T, &q.Z);

    let tz = T1 * Z2;
    let zt = Z1 * T2;
    Efgh {
        E: tz + zt,
        F: X1 * Y2 - Y1 * X2,
        G: Y1 * Y2 + CURVE_A * (X1 * X2),
        H: tz - zt,
    }
}

// Complete addition on the whole curve: unified law, with a fallback
// to the dual law when the former degenerates.
pub fn add_full(p: &Xtw, q: &Xtw) -> Efgh {
    let r = add_unified(p, q);
    if r.is_nap() && !p.is_nap() && !q.is_nap() {
        trace!("unified addition degenerated, using dual addition law");
        return add_dual(p, q);
    }
    r
}

// Doubling (4S+...); complete on the whole curve.
pub fn double(p: &Xtw) -> Efgh {
    let XX = p.X.square();
    let YY = p.Y.square();
    let ZZ2 = p.Z.square().mul2();
    let aXX = CURVE_A * XX;
    let E = (p.X + p.Y).square() - XX - YY;
    let G = aXX + YY;
    Efgh {
        E,
        F: G - ZZ2,
        G,
        H: aXX - YY,
    }
}

// Degree-2 endomorphism psi:
//   psi(x, y) = (c*(1 - y^2)/(x*y), b*(y^2 + b)/(y^2 - b))
// with psi(N) = psi(A) = N and psi(E1) = psi(E2) = A. The image is
// always in the N or A coset.
pub fn endo(p: &Xtw) -> Efgh {
    if p.is_nap() {
        return Efgh::NAP;
    }
    let TZ = p.T * p.Z;
    if TZ.is_zero() {
        // x = 0 (N or A), or a point at infinity (E1 or E2).
        return if p.Z.is_zero() { Efgh::TORSION_A } else { Efgh::NEUTRAL };
    }
    let YY = p.Y.square();
    let bZZ = ENDO_B * p.Z.square();
    Efgh {
        E: ENDO_C * (p.Z.square() - YY),
        F: YY - bZZ,
        G: TZ,
        H: ENDO_B * (YY + bZZ),
    }
}
