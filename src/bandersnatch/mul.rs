// Scalar multiplication.
//
// Integers are recoded into signed digits (sliding window) and the
// multiple is accumulated from the top digit down, with precomputed
// tables of odd multiples. Subgroup points use the GLV split into two
// half-size multipliers of P and psi(P). None of this is constant-time.

use super::coords::{self, Xtw};
use super::glv::{self, SlidingWindowDigits};
use super::point::CurvePoint;
use super::Scalar;

const WINDOW: u32 = 5;

// Odd multiples 1, 3, 5 ... 2^(WINDOW - 1) - 1.
const TABLE_LEN: usize = 1 << (WINDOW - 2);

// Digits of a 256-bit integer; the recoding may carry into bit 256.
const MAX_DIGITS: usize = 257;

// Group law on the accumulator: points of the subgroup (modulo A) use
// the unified law only.
#[inline]
fn add(subgroup: bool, p: &Xtw, q: &Xtw) -> Xtw {
    if subgroup {
        coords::add_unified(p, q).to_xtw()
    } else {
        coords::add_full(p, q).to_xtw()
    }
}

// win[i] = (2*i + 1)*p
fn make_table(subgroup: bool, p: &Xtw) -> [Xtw; TABLE_LEN] {
    let mut win = [*p; TABLE_LEN];
    let p2 = coords::double(p).to_xtw();
    for i in 1..TABLE_LEN {
        win[i] = add(subgroup, &win[i - 1], &p2);
    }
    win
}

// Signed digits indexed by position.
fn recode(x: &[u64; 4]) -> [i32; MAX_DIGITS] {
    let mut sd = [0i32; MAX_DIGITS];
    for d in SlidingWindowDigits::new(x, WINDOW) {
        let c = d.coeff as i32;
        sd[d.position as usize] = if d.negative { -c } else { c };
    }
    sd
}

fn recode_i128(x: i128) -> [i32; MAX_DIGITS] {
    let m = x.unsigned_abs();
    let mut sd = recode(&[m as u64, (m >> 64) as u64, 0, 0]);
    if x < 0 {
        for d in sd.iter_mut() {
            *d = -*d;
        }
    }
    sd
}

// Compute sum_j (sum_i sd_j[i]*2^i)*P_j, where tables[j] contains the
// odd multiples of P_j.
fn mul_windows(subgroup: bool, tables: &[[Xtw; TABLE_LEN]],
    digits: &[[i32; MAX_DIGITS]]) -> Xtw
{
    let top = digits.iter()
        .filter_map(|sd| sd.iter().rposition(|&e| e != 0))
        .max();
    let top = match top {
        Some(t) => t,
        None => return Xtw::NEUTRAL,
    };

    let mut r = Xtw::NEUTRAL;
    let mut ndbl = 0u32;
    for i in (0..=top).rev() {
        if digits.iter().all(|sd| sd[i] == 0) {
            ndbl += 1;
            continue;
        }
        for _ in 0..ndbl {
            r = coords::double(&r).to_xtw();
        }
        ndbl = 1;
        for (win, sd) in tables.iter().zip(digits.iter()) {
            let e = sd[i];
            if e > 0 {
                r = add(subgroup, &r, &win[(e >> 1) as usize]);
            } else if e < 0 {
                r = add(subgroup, &r, &win[((-e) >> 1) as usize].neg());
            }
        }
    }
    for _ in 1..ndbl {
        r = coords::double(&r).to_xtw();
    }
    r
}

pub(crate) fn mul_integer<P: CurvePoint>(p: &P, k: &[u64; 4]) -> P {
    if p.is_nap() {
        return P::NAP;
    }
    let subgroup = P::SUBGROUP_ONLY;
    let base = if subgroup { p.decaf_xtw() } else { p.exact_xtw() };
    let win = make_table(subgroup, &base);
    P::from_xtw(&mul_windows(subgroup, &[win], &[recode(k)]))
}

pub(crate) fn mul_glv<P: CurvePoint>(p: &P, k: &Scalar) -> P {
    debug_assert!(P::SUBGROUP_ONLY);
    if p.is_nap() {
        return P::NAP;
    }
    let d = glv::decompose(k);
    let win0 = make_table(true, &p.decaf_xtw());
    let mut win1 = [Xtw::NAP; TABLE_LEN];
    for i in 0..TABLE_LEN {
        win1[i] = coords::endo(&win0[i]).to_xtw();
    }
    P::from_xtw(&mul_windows(true, &[win0, win1],
        &[recode_i128(d.u), recode_i128(d.v)]))
}

#[cfg(test)]
mod tests {

    use crate::bandersnatch::tests::DRNG;
    use crate::bandersnatch::{CurvePoint, SubgroupPoint, Scalar, LAMBDA};
    use crate::bandersnatch::{COFACTOR, CURVE_ORDER};
    use crate::bandersnatch::{AxtwSubgroup, EfghSubgroup, XtwFull, XtwSubgroup};
    use crate::Error;
    use sha2::{Sha256, Digest};

    // Plain double-and-add.
    fn mul_ref(p: &XtwFull, k: &[u64; 4]) -> XtwFull {
        let mut r = XtwFull::NEUTRAL;
        for i in (0..256).rev() {
            r = r.double();
            if ((k[i >> 6] >> (i & 63)) & 1) != 0 {
                r += p;
            }
        }
        r
    }

    #[test]
    fn mul_integer() {
        let mut rng = DRNG::from_seed(b"mul integer");
        let mut sh = Sha256::new();
        for i in 0..20u64 {
            let p = XtwFull::random(&mut rng);
            sh.update(i.to_le_bytes());
            let v = sh.finalize_reset();
            let mut k = [0u64; 4];
            for j in 0..4 {
                let mut w = [0u8; 8];
                w.copy_from_slice(&v[8 * j..8 * j + 8]);
                k[j] = u64::from_le_bytes(w);
            }
            assert!(p.mul_integer(&k) == mul_ref(&p, &k));
            assert!(p.mul_small(k[0]) == mul_ref(&p, &[k[0], 0, 0, 0]));
            assert!(p * 3 == p + p + p);
        }
        let p = XtwFull::random(&mut rng);
        assert!(p.mul_small(0) == XtwFull::NEUTRAL);
        assert!(p.mul_small(1) == p);
        assert!(p.mul_integer(&[u64::MAX; 4]) == mul_ref(&p, &[u64::MAX; 4]));

        // 4*n is the curve order.
        let n = Scalar::MODULUS;
        let n4 = [n[0] << 2, (n[1] << 2) | (n[0] >> 62),
            (n[2] << 2) | (n[1] >> 62), (n[3] << 2) | (n[2] >> 62)];
        assert!(CURVE_ORDER == n4);
        assert!(p.mul_integer(&CURVE_ORDER) == XtwFull::NEUTRAL);
        assert!(p.mul_integer(&n) != XtwFull::NEUTRAL || p.is_in_subgroup());
        for _ in 0..10 {
            let q = XtwFull::random(&mut rng);
            assert!((q * COFACTOR).is_in_subgroup()
                || (q * COFACTOR).is_neutral());
            assert!(q.mul_integer(&CURVE_ORDER) == XtwFull::NEUTRAL);
        }
    }

    #[test]
    fn mul_scalar() {
        let mut rng = DRNG::from_seed(b"mul scalar");
        let g = XtwSubgroup::GENERATOR;
        assert!(g.mul_integer(&Scalar::MODULUS) == XtwSubgroup::NEUTRAL);
        assert!(XtwFull::from(g).mul_integer(&Scalar::MODULUS) == XtwFull::NEUTRAL);
        assert!(g * Scalar::ZERO == XtwSubgroup::NEUTRAL);
        assert!(g * Scalar::ONE == g);
        assert!(g * Scalar::MINUS_ONE == -g);

        let mut sh = Sha256::new();
        for i in 0..20u64 {
            let p = XtwSubgroup::random(&mut rng);
            sh.update(i.to_le_bytes());
            let k = Scalar::decode_reduce(&sh.finalize_reset());
            let kp = p * k;
            assert!(XtwFull::from(kp) == mul_ref(&XtwFull::from(p), &k.to_w64le()));
            assert!(kp == p.mul_integer(&k.to_w64le()));
            assert!(k * p == kp);
            assert!(AxtwSubgroup::from(p) * k == AxtwSubgroup::from(kp));
            assert!(EfghSubgroup::from(p) * k == EfghSubgroup::from(kp));

            // psi(P) = LAMBDA*P
            assert!(p.endo() == p * LAMBDA);

            let k2 = Scalar::random(&mut rng);
            assert!(p * (k + k2) == kp + p * k2);
            assert!((p * k) * k2 == p * (k * k2));
            let mut q = p;
            q *= k;
            assert!(q == kp);
        }
        assert!((XtwSubgroup::NAP * Scalar::ONE).is_nap());
    }

    #[test]
    fn encoding() {
        let mut rng = DRNG::from_seed(b"encoding");
        let n = XtwSubgroup::NEUTRAL;
        assert!(n.encode() == [0u8; 32]);
        assert!(XtwSubgroup::decode(&[0u8; 32]).unwrap().is_neutral());

        // The generator encodes as its x coordinate.
        let g = hex::decode("18ae52a26618e7e1658499ad22c0792bf342be7b77113774c5340b2ccc32c129").unwrap();
        assert!(XtwSubgroup::GENERATOR.encode()[..] == g[..]);
        assert!(XtwSubgroup::decode(&g).unwrap() == XtwSubgroup::GENERATOR);
        assert!(AxtwSubgroup::decode(&g).unwrap().y_affine()
            == XtwSubgroup::GENERATOR.y_affine());

        for _ in 0..20 {
            let p = XtwSubgroup::random(&mut rng);
            let q = XtwSubgroup::random(&mut rng);
            let r = p + q;
            let buf = r.encode();
            assert!(buf == r.x_affine().unwrap().encode32());
            let r2 = XtwSubgroup::decode(&buf).unwrap();
            assert!(r2 == r);
            assert!(XtwFull::from(r2) == XtwFull::from(r));
            assert!(AxtwSubgroup::decode(&buf).unwrap() == AxtwSubgroup::from(r));
            assert!(EfghSubgroup::decode(&buf).unwrap().encode() == buf);

            // Points outside the subgroup.
            let f = XtwFull::from(r);
            let fa = f.add_torsion_a();
            let fe = f.add_torsion_e1();
            assert!(XtwSubgroup::decode(&fa.x_affine().unwrap().encode32()).unwrap() == -r);
            assert!(XtwSubgroup::decode(&fe.x_affine().unwrap().encode32())
                == Err(Error::NotInSubgroup));

            // Non-canonical encodings.
            let mut bad = buf;
            bad[31] |= 0x80;
            assert!(XtwSubgroup::decode(&bad) == Err(Error::NonCanonical));
        }

        assert!(XtwSubgroup::decode(&[0u8; 31])
            == Err(Error::InvalidLength { expected: 32, actual: 31 }));

        // Some x coordinates are not on the curve at all.
        let mut sh = Sha256::new();
        let mut not_on_curve = 0;
        for i in 0..40u64 {
            sh.update(i.to_le_bytes());
            let mut buf = [0u8; 32];
            buf.copy_from_slice(&sh.finalize_reset());
            buf[31] &= 0x3F;
            match XtwSubgroup::decode(&buf) {
                Ok(p) => assert!(p.encode() == buf),
                Err(Error::NotOnCurve) => not_on_curve += 1,
                Err(e) => assert!(e == Error::NotInSubgroup),
            }
        }
        assert!(not_on_curve > 0);
    }
}
