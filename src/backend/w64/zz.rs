use super::{addcarry_u64, umull_add2};

/// A custom 256-bit unsigned integer (four 64-bit limbs, little-endian).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zu256(pub(crate) [u64; 4]);

impl Zu256 {

    #[inline(always)]
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    #[inline(always)]
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    /// Full 256x256 -> 512 product.
    pub fn mul256x256(self, b: &Self) -> Zu512 {
        let mut d = [0u64; 8];
        for i in 0..4 {
            let mut hi = 0;
            for j in 0..4 {
                let (lo, h) = umull_add2(self.0[i], b.0[j], d[i + j], hi);
                d[i + j] = lo;
                hi = h;
            }
            d[i + 4] = hi;
        }
        Zu512(d)
    }
}

/// A custom 512-bit unsigned integer (eight 64-bit limbs, little-endian).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zu512(pub(crate) [u64; 8]);

impl Zu512 {

    /// Compute `round(self / 2^n)` (halves rounded up), truncated to its
    /// low 128 bits. The shift count `n` must be in the 1..=383 range.
    pub fn round_shr_trunc128(self, n: u32) -> u128 {
        assert!(n >= 1 && n <= 383);

        // Add 2^(n-1), then shift.
        let mut d = self.0;
        let k = ((n - 1) >> 6) as usize;
        let (v, mut cc) = addcarry_u64(d[k], 1u64 << ((n - 1) & 63), 0);
        d[k] = v;
        for i in (k + 1)..8 {
            let (v, c) = addcarry_u64(d[i], 0, cc);
            d[i] = v;
            cc = c;
        }

        let j = (n >> 6) as usize;
        let s = n & 63;
        let limb = |i: usize| if i < 8 { d[i] } else { 0 };
        let (lo, hi) = if s == 0 {
            (limb(j), limb(j + 1))
        } else {
            ((limb(j) >> s) | (limb(j + 1) << (64 - s)),
             (limb(j + 1) >> s) | (limb(j + 2) << (64 - s)))
        };
        (lo as u128) | ((hi as u128) << 64)
    }
}
