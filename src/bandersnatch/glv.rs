//! GLV decomposition of scalars, and signed sliding-window recoding.
//!
//! The endomorphism `psi` acts on the prime-order subgroup as the
//! multiplication by `LAMBDA`, a square root of -2 modulo `n`. A scalar
//! `k` is split into two signed integers `u` and `v` of about 127 bits
//! each, such that `k = u + v*LAMBDA mod n`; then `k*P` is computed as
//! `u*P + v*psi(P)`, which halves the number of doublings.
//!
//! The pairs `(u, v)` such that `u + v*LAMBDA = 0 mod n` form a lattice,
//! with the reduced basis `b1 = (2*w, -s)` and `b2 = (-s, -w)`, where
//! `2*w^2 + s^2 = n`. The decomposition first rounds `(k, 0)` to a
//! nearby lattice vector (Babai rounding, with fixed-point
//! approximations of `w/n` and `s/n`), then moves the difference
//! towards the origin as long as adding one of the six
//! Voronoi-relevant vectors `+-b1`, `+-b2`, `+-(b1 + b2)` makes it
//! strictly shorter (infinity norm).

use crate::backend::Zu256;
use super::Scalar;

/// `s` in the lattice basis; `2*w^2 + s^2 = n`.
pub const GLV_S: i128 = 113482231691339203864511368254957623327;

/// `w` in the lattice basis.
pub const GLV_W: i128 = 10741319382058138887739339959866629956;

/// First reduced basis vector `b1 = (2*w, -s)` of the lattice of pairs
/// `(u, v)` with `u + v*LAMBDA = 0 mod n`.
pub const GLV_B1: (i128, i128) = (2 * GLV_W, -GLV_S);

/// Second reduced basis vector `b2 = (-s, -w)`.
pub const GLV_B2: (i128, i128) = (-GLV_S, -GLV_W);

// round(2^320 * w / n) and round(2^320 * s / n)
const G1: Zu256 = Zu256::w64be(
    0x0000000000000000, 0x4760F127D8767BDE,
    0x993B75E7547768AA, 0xBCB69F852DCABF61);
const G2: Zu256 = Zu256::w64be(
    0x0000000000000002, 0xF21DF5B0541CF632,
    0xDEBAC77A3F4747C1, 0xB896E1904DEBA650);

// Voronoi-relevant vectors: +-b1, +-b2, +-(b1 + b2).
const NEIGHBORS: [(i128, i128); 6] = [
    GLV_B1,
    (-GLV_B1.0, -GLV_B1.1),
    GLV_B2,
    (-GLV_B2.0, -GLV_B2.1),
    (GLV_B1.0 + GLV_B2.0, GLV_B1.1 + GLV_B2.1),
    (-GLV_B1.0 - GLV_B2.0, -GLV_B1.1 - GLV_B2.1),
];

/// A pair `(u, v)` with `k = u + v*LAMBDA mod n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlvDecomposition {
    pub u: i128,
    pub v: i128,
}

/// Decomposes a scalar.
pub fn decompose(k: &Scalar) -> GlvDecomposition {
    decompose_signed(false, &k.to_w64le())
}

/// Decomposes the signed integer `-magnitude` (if `negative` is true)
/// or `magnitude` (otherwise). The magnitude is given as four 64-bit
/// limbs in little-endian order, and must be lower than 2^255.
pub fn decompose_signed(negative: bool, magnitude: &[u64; 4])
    -> GlvDecomposition
{
    assert!((magnitude[3] >> 63) == 0, "GLV input out of range");

    // c1 = round(k*w/n) and c2 = round(k*s/n). c1 fits on 126 bits, but
    // c2 may reach 130 bits; only its low 128 bits are kept, which does
    // not matter since (u, v) is small and computed modulo 2^128.
    let k = Zu256(*magnitude);
    let c1 = k.mul256x256(&G1).round_shr_trunc128(320);
    let c2 = k.mul256x256(&G2).round_shr_trunc128(320);

    // (u, v) = (k, 0) - c1*b1 + c2*b2
    let klo = (magnitude[0] as u128) | ((magnitude[1] as u128) << 64);
    let s = GLV_S as u128;
    let w = GLV_W as u128;
    let u = klo
        .wrapping_sub(c1.wrapping_mul(w << 1))
        .wrapping_sub(c2.wrapping_mul(s));
    let v = c1.wrapping_mul(s).wrapping_sub(c2.wrapping_mul(w));
    let (mut u, mut v) = (u as i128, v as i128);

    loop {
        let mut best = norm(u, v);
        let mut next = None;
        for &(du, dv) in NEIGHBORS.iter() {
            if let (Some(u2), Some(v2)) = (u.checked_add(du), v.checked_add(dv)) {
                let m = norm(u2, v2);
                if m < best {
                    best = m;
                    next = Some((u2, v2));
                }
            }
        }
        match next {
            Some((u2, v2)) => {
                u = u2;
                v = v2;
            }
            None => break,
        }
    }

    if negative {
        GlvDecomposition { u: -u, v: -v }
    } else {
        GlvDecomposition { u, v }
    }
}

#[inline]
fn norm(u: i128, v: i128) -> u128 {
    core::cmp::max(u.unsigned_abs(), v.unsigned_abs())
}

/// One signed digit: the value `(-1)^negative * coeff * 2^position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedDigit {
    pub position: u32,
    pub coeff: u32,
    pub negative: bool,
}

/// Signed sliding-window recoding of a non-negative integer.
///
/// The iterator yields the non-zero digits in increasing position
/// order. Each coefficient is odd and lower than `2^(window - 1)` (or
/// equal to 1, for a window of 1 bit), and the sum of all digits is
/// the source integer. Two digits are at least `window` positions
/// apart.
#[derive(Clone, Debug)]
pub struct SlidingWindowDigits {
    buf: [u64; 5],
    window: u32,
}

impl SlidingWindowDigits {

    /// Starts the recoding of `x` (four 64-bit limbs, little-endian),
    /// with a window size between 1 and 16 bits.
    pub fn new(x: &[u64; 4], window: u32) -> Self {
        assert!(window >= 1 && window <= 16, "invalid window size");
        Self {
            buf: [x[0], x[1], x[2], x[3], 0],
            window,
        }
    }
}

impl Iterator for SlidingWindowDigits {
    type Item = SignedDigit;

    fn next(&mut self) -> Option<SignedDigit> {
        let j = self.buf.iter().position(|&w| w != 0)?;
        let s = self.buf[j].trailing_zeros();
        let position = ((j as u32) << 6) + s;
        let w = self.window;
        let mask = (1u64 << w) - 1;

        // Extract and clear the w bits starting at the lowest set bit.
        let mut v = self.buf[j] >> s;
        self.buf[j] &= !(mask << s);
        if s + w > 64 && j < 4 {
            v |= self.buf[j + 1] << (64 - s);
            self.buf[j + 1] &= !(mask >> (64 - s));
        }
        let v = (v & mask) as u32;

        if v > (1u32 << (w - 1)) {
            // Use v - 2^w and propagate a carry at position + w.
            let mut k = ((position + w) >> 6) as usize;
            let mut c = 1u64 << ((position + w) & 63);
            while c != 0 && k < 5 {
                let (r, cc) = self.buf[k].overflowing_add(c);
                self.buf[k] = r;
                c = cc as u64;
                k += 1;
            }
            Some(SignedDigit { position, coeff: (1u32 << w) - v, negative: true })
        } else {
            Some(SignedDigit { position, coeff: v, negative: false })
        }
    }
}
