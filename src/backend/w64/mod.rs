// Multi-limb integer support on 64-bit words.
//
// Carrying addition and subtraction should use u64::carrying_add()
// and u64::borrowing_sub(), but these functions are currently only
// experimental. The helpers below are plain `const fn` over u128 so
// that the same code paths serve both at runtime and for constant
// evaluation of the Montgomery parameters.

pub mod modint;
pub mod zz;

pub use modint::MontInt256;

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^64, c_out
#[inline(always)]
pub(crate) const fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128) + (y as u128) + (c as u128);
    (z as u64, (z >> 64) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^64, c_out
#[inline(always)]
pub(crate) const fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_sub(y as u128).wrapping_sub(c as u128);
    (z as u64, (z >> 127) as u8)
}

// Compute x*y+z1+z2 over 128 bits, returned as two 64-bit words (lo, hi).
// This cannot overflow: (2^64-1)^2 + 2*(2^64-1) = 2^128 - 1.
#[inline(always)]
pub(crate) const fn umull_add2(x: u64, y: u64, z1: u64, z2: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128)) + (z1 as u128) + (z2 as u128);
    (t as u64, (t >> 64) as u64)
}

// 256-bit helpers on little-endian limb arrays. Comparisons and shifts
// are variable-time (Jacobi symbols, exponent scanning).

// x + y, and the outgoing carry.
#[inline(always)]
pub(crate) const fn add256(x: &[u64; 4], y: &[u64; 4]) -> ([u64; 4], u8) {
    let (d0, cc) = addcarry_u64(x[0], y[0], 0);
    let (d1, cc) = addcarry_u64(x[1], y[1], cc);
    let (d2, cc) = addcarry_u64(x[2], y[2], cc);
    let (d3, cc) = addcarry_u64(x[3], y[3], cc);
    ([ d0, d1, d2, d3 ], cc)
}

// x - y, and the outgoing borrow.
#[inline(always)]
pub(crate) const fn sub256(x: &[u64; 4], y: &[u64; 4]) -> ([u64; 4], u8) {
    let (d0, cc) = subborrow_u64(x[0], y[0], 0);
    let (d1, cc) = subborrow_u64(x[1], y[1], cc);
    let (d2, cc) = subborrow_u64(x[2], y[2], cc);
    let (d3, cc) = subborrow_u64(x[3], y[3], cc);
    ([ d0, d1, d2, d3 ], cc)
}

// Return x if w == 0, y if w == 0xFFFFFFFFFFFFFFFF.
#[inline(always)]
pub(crate) const fn select256(x: &[u64; 4], y: &[u64; 4], w: u64) -> [u64; 4] {
    [
        x[0] ^ (w & (x[0] ^ y[0])),
        x[1] ^ (w & (x[1] ^ y[1])),
        x[2] ^ (w & (x[2] ^ y[2])),
        x[3] ^ (w & (x[3] ^ y[3])),
    ]
}

#[inline]
pub(crate) fn is_zero256(x: &[u64; 4]) -> bool {
    (x[0] | x[1] | x[2] | x[3]) == 0
}

// Unsigned x < y.
#[inline]
pub(crate) fn lt256(x: &[u64; 4], y: &[u64; 4]) -> bool {
    sub256(x, y).1 != 0
}

// Number of trailing zeros; x must not be zero.
#[inline]
pub(crate) fn ctz256(x: &[u64; 4]) -> u32 {
    let mut n = 0;
    for i in 0..4 {
        if x[i] != 0 {
            return n + x[i].trailing_zeros();
        }
        n += 64;
    }
    n
}

// Bit length (0 for zero).
#[inline]
pub(crate) fn bitlen256(x: &[u64; 4]) -> u32 {
    for i in (0..4).rev() {
        if x[i] != 0 {
            return 64 * (i as u32) + 64 - x[i].leading_zeros();
        }
    }
    0
}

// Logical right shift by s bits (s < 256).
#[inline]
pub(crate) fn shr256(x: &[u64; 4], s: u32) -> [u64; 4] {
    let limbs = (s >> 6) as usize;
    let bits = s & 63;
    let mut d = [0u64; 4];
    for i in 0..(4 - limbs) {
        let lo = x[i + limbs] >> bits;
        let hi = if bits != 0 && i + limbs + 1 < 4 {
            x[i + limbs + 1] << (64 - bits)
        } else {
            0
        };
        d[i] = lo | hi;
    }
    d
}
