use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::{CryptoRng, RngCore};

use crate::Error;
use super::{addcarry_u64, umull_add2, add256, sub256, select256};
use super::{is_zero256, lt256, ctz256, bitlen256, shr256};

// Integers modulo M = M0 + M1*2^64 + M2*2^128 + M3*2^192, stored in
// Montgomery representation (value x is held as x*2^256 mod M).
//
// Internal limbs are only weakly reduced: any integer in [0, 2*M) is a
// valid representation, and all arithmetic routines accept and return
// values in that range. Full reduction happens only when a canonical
// integer is needed (comparisons, sign, Legendre symbol, encoding).
// The modulus must be odd and lower than 2^255, so that 2*M fits in
// 256 bits; it may still exceed 2^254, in which case sums of two
// operands can overflow 2^256 and the routines below account for it.
//
// Most functions are not constant-time (the Legendre symbol, inversion
// and the vartime exponentiations leak their input through timing).
#[derive(Clone, Copy, Debug)]
pub struct MontInt256<const M0: u64, const M1: u64, const M2: u64, const M3: u64>([u64; 4]);

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> MontInt256<M0, M1, M2, M3> {

    // Modulus must be odd and at least 193 bits; its top bit must be
    // clear.
    #[allow(dead_code)]
    const COMPILE_TIME_CHECKS: () = Self::compile_time_checks();
    const fn compile_time_checks() {
        static_assert!((M0 & 1) != 0);
        static_assert!(M3 != 0);
        static_assert!((M3 >> 63) == 0);
    }

    // Modulus, in base 2^64 (low-to-high order).
    pub const MODULUS: [u64; 4] = [ M0, M1, M2, M3 ];

    // 2*M; upper bound (exclusive) of the internal representation.
    const MODULUS_X2: [u64; 4] = [
        M0 << 1,
        (M1 << 1) | (M0 >> 63),
        (M2 << 1) | (M1 >> 63),
        (M3 << 1) | (M2 >> 63),
    ];

    // (M - 1)/2
    const HALF_MODULUS: [u64; 4] = [
        (M0 >> 1) | (M1 << 63),
        (M1 >> 1) | (M2 << 63),
        (M2 >> 1) | (M3 << 63),
        M3 >> 1,
    ];

    // M - 2 (exponent for Fermat inversion)
    const MM2: [u64; 4] = sub256(&[ M0, M1, M2, M3 ], &[ 2, 0, 0, 0 ]).0;

    pub const ZERO: MontInt256<M0, M1, M2, M3> =
        MontInt256::<M0, M1, M2, M3>([ 0, 0, 0, 0 ]);
    pub const ONE: MontInt256<M0, M1, M2, M3> =
        MontInt256::<M0, M1, M2, M3>::w64le(1, 0, 0, 0);
    pub const MINUS_ONE: MontInt256<M0, M1, M2, M3> =
        MontInt256::<M0, M1, M2, M3>::w64le(M0 - 1, M1, M2, M3);

    const M0I: u64 = Self::make_m0i(M0);
    const R2: Self = Self(Self::make_r2());

    // Create an element from its four 64-bit limbs, provided in
    // little-endian order (least significant limb first). The integer
    // may be arbitrary in the 0..2^256-1 range; it is implicitly reduced
    // modulo M. This function can be used in constant expressions.
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        Self(Self::mont_mul(&[ x0, x1, x2, x3 ], &Self::R2.0))
    }

    // Create an element from its four 64-bit limbs, provided in
    // big-endian order (most significant limb first). This function can
    // be used in constant expressions.
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self(Self::mont_mul(&[ x0, x1, x2, x3 ], &Self::R2.0))
    }

    // Same as w64le(), for runtime use.
    #[inline(always)]
    pub fn from_w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        let mut r = Self([ x0, x1, x2, x3 ]);
        r.set_mul(&Self::R2);
        r
    }

    // Same as w64be(), for runtime use.
    #[inline(always)]
    pub fn from_w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::from_w64le(x0, x1, x2, x3)
    }

    // Create an element by converting the provided integer.
    #[inline(always)]
    pub fn from_u64(x: u64) -> Self {
        Self::from_w64le(x, 0, 0, 0)
    }

    // Create an element by converting the provided integer.
    // Negative values are implicitly reduced modulo M.
    #[inline]
    pub fn from_i64(x: i64) -> Self {
        let r = Self::from_u64(x.unsigned_abs());
        if x < 0 { -r } else { r }
    }

    // Create an element by converting the provided integer.
    #[inline(always)]
    pub fn from_u128(x: u128) -> Self {
        Self::from_w64le(x as u64, (x >> 64) as u64, 0, 0)
    }

    // Create an element by converting the provided integer.
    // Negative values are implicitly reduced modulo M.
    #[inline]
    pub fn from_i128(x: i128) -> Self {
        let r = Self::from_u128(x.unsigned_abs());
        if x < 0 { -r } else { r }
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        // The sum is lower than 4*M, which may exceed 2^256; if there
        // is a carry, or if the sum is at least 2*M, then subtracting
        // 2*M (modulo 2^256) yields the correct result.
        let (d, cc) = add256(&self.0, &rhs.0);
        let (e, bb) = sub256(&d, &Self::MODULUS_X2);
        let w = ((cc | (bb ^ 1)) as u64).wrapping_neg();
        self.0 = select256(&d, &e, w);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        let (d, bb) = sub256(&self.0, &rhs.0);
        let w = (bb as u64).wrapping_neg();
        let m2 = Self::MODULUS_X2;
        let (e, _) = add256(&d, &[ m2[0] & w, m2[1] & w, m2[2] & w, m2[3] & w ]);
        self.0 = e;
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        let mut r = Self::ZERO;
        r.set_sub(self);
        *self = r;
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        self.0 = Self::mont_mul(&self.0, &rhs.0);
    }

    // Square this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        self.0 = Self::mont_mul(&self.0, &self.0);
    }

    // Square this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    // Square this value n times.
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        for _ in 0..n {
            r.set_square();
        }
        r
    }

    #[inline]
    fn set_half(&mut self) {
        // Add M if the value is odd; x + M < 3*M < 2^257, and the
        // shifted result is lower than 1.5*M.
        let w = (self.0[0] & 1).wrapping_neg();
        let m = Self::MODULUS;
        let (d, cc) = add256(&self.0, &[ m[0] & w, m[1] & w, m[2] & w, m[3] & w ]);
        self.0 = [
            (d[0] >> 1) | (d[1] << 63),
            (d[1] >> 1) | (d[2] << 63),
            (d[2] >> 1) | (d[3] << 63),
            (d[3] >> 1) | ((cc as u64) << 63),
        ];
    }

    #[inline(always)]
    pub fn half(self) -> Self {
        let mut r = self;
        r.set_half();
        r
    }

    #[inline(always)]
    pub fn mul2(self) -> Self {
        let mut r = self;
        r.set_add(&self);
        r
    }

    #[inline(always)]
    pub fn mul4(self) -> Self {
        self.mul2().mul2()
    }

    // Bring the internal representation into the 0..M-1 range.
    #[inline]
    pub(crate) fn set_normalized(&mut self) {
        let (d, bb) = sub256(&self.0, &Self::MODULUS);
        self.0 = select256(&d, &self.0, (bb as u64).wrapping_neg());
    }

    // Get the canonical integer value (in the 0..M-1 range) as four
    // 64-bit limbs in little-endian order.
    pub fn to_w64le(self) -> [u64; 4] {
        let mut r = Self(Self::mont_mul(&self.0, &[ 1, 0, 0, 0 ]));
        r.set_normalized();
        r.0
    }

    // Return true if this value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        let mut r = self;
        r.set_normalized();
        is_zero256(&r.0)
    }

    // Return true if this value is equal to rhs.
    #[inline]
    pub fn equals(self, rhs: Self) -> bool {
        (self - rhs).is_zero()
    }

    // Raise this value to the provided exponent. The exponent is public
    // and encoded over four 64-bit limbs (little-endian).
    pub fn pow_vartime(self, e: &[u64; 4]) -> Self {
        let mut r = Self::ONE;
        for i in (0..bitlen256(e)).rev() {
            r.set_square();
            if ((e[(i >> 6) as usize] >> (i & 63)) & 1) != 0 {
                r.set_mul(&self);
            }
        }
        r
    }

    // Invert this value; zero has no inverse.
    pub fn invert(self) -> Result<Self, Error> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.pow_vartime(&Self::MM2))
    }

    // Perform a batch inversion of some elements. All elements of
    // the slice are replaced with their respective inverse (elements
    // of value zero are "inverted" into themselves).
    pub fn batch_invert(xx: &mut [Self]) {
        // Montgomery's trick, applied over chunks of 200 elements so that
        // the prefix products can live on the stack.
        for chunk in xx.chunks_mut(200) {
            let mut tt = [Self::ONE; 200];
            let mut acc = Self::ONE;
            for (j, x) in chunk.iter().enumerate() {
                tt[j] = acc;
                if !x.is_zero() {
                    acc *= x;
                }
            }

            // acc is a product of non-zero values, hence invertible.
            let mut k = match acc.invert() {
                Ok(k) => k,
                Err(_) => return,
            };
            for j in (0..chunk.len()).rev() {
                let x = chunk[j];
                if !x.is_zero() {
                    chunk[j] = k * tt[j];
                    k *= x;
                }
            }
        }
    }

    // Compute the Legendre symbol on this value. Return value is:
    //   0   if this value is zero
    //  +1   if this value is a non-zero quadratic residue
    //  -1   if this value is not a quadratic residue
    // The modulus must be prime.
    pub fn legendre(self) -> i32 {
        // 2^256 is a square, so the Montgomery factor does not change
        // the symbol.
        let mut r = self;
        r.set_normalized();
        jacobi_vartime(r.0, Self::MODULUS)
    }

    // Sign of this value: +1 if its canonical integer is in
    // 1..(M-1)/2, -1 if it is in (M+1)/2..M-1, and 0 for zero.
    pub fn sign(self) -> i32 {
        let v = self.to_w64le();
        if is_zero256(&v) {
            0
        } else if lt256(&Self::HALF_MODULUS, &v) {
            -1
        } else {
            1
        }
    }

    // Encode this value onto exactly 32 bytes. The normalized value (in
    // the 0..M-1 range) is written in little-endian order.
    pub fn encode32(self) -> [u8; 32] {
        let v = self.to_w64le();
        let mut d = [0u8; 32];
        for i in 0..4 {
            d[8 * i..8 * i + 8].copy_from_slice(&v[i].to_le_bytes());
        }
        d
    }

    // Interpret 32 bytes as an unsigned little-endian integer.
    fn w64le_from_bytes(buf: &[u8]) -> [u64; 4] {
        let mut v = [0u64; 4];
        for i in 0..4 {
            let mut w = [0u8; 8];
            w.copy_from_slice(&buf[8 * i..8 * i + 8]);
            v[i] = u64::from_le_bytes(w);
        }
        v
    }

    // Decode a value from exactly 32 bytes (little-endian). The integer
    // must be strictly lower than the modulus.
    pub fn decode32(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() != 32 {
            return Err(Error::InvalidLength { expected: 32, actual: buf.len() });
        }
        let v = Self::w64le_from_bytes(buf);
        if !lt256(&v, &Self::MODULUS) {
            return Err(Error::NonCanonical);
        }
        Ok(Self::from_w64le(v[0], v[1], v[2], v[3]))
    }

    // Decode an element from some bytes. The bytes are interpreted in
    // unsigned little-endian convention, and the resulting integer is
    // reduced modulo M. This process never fails.
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut n = buf.len();
        if n == 0 {
            return Self::ZERO;
        }

        // Top chunk is partial if the length is not a multiple of 32.
        let k = if (n & 31) == 0 { 32 } else { n & 31 };
        let mut tmp = [0u8; 32];
        tmp[..k].copy_from_slice(&buf[n - k..]);
        let v = Self::w64le_from_bytes(&tmp);
        let mut r = Self::from_w64le(v[0], v[1], v[2], v[3]);
        n -= k;

        // Horner evaluation in base 2^256. Multiplying by R2 in
        // Montgomery representation multiplies the value by 2^256.
        while n > 0 {
            n -= 32;
            r.set_mul(&Self::R2);
            let v = Self::w64le_from_bytes(&buf[n..n + 32]);
            r.set_add(&Self::from_w64le(v[0], v[1], v[2], v[3]));
        }
        r
    }

    // Get a uniformly random element. 512 bits are drawn and reduced;
    // the bias is negligible.
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut tmp = [0u8; 64];
        rng.fill_bytes(&mut tmp);
        Self::decode_reduce(&tmp)
    }

    // Given m0 (odd), compute -1/m0 mod 2^64.
    const fn make_m0i(m0: u64) -> u64 {
        // m0*m0 = 1 mod 8; each Newton step doubles the number of
        // correct low bits (3 -> 96).
        let mut y = m0;
        let mut i = 0;
        while i < 5 {
            y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
            i += 1;
        }
        y.wrapping_neg()
    }

    // Compute 2^512 mod M (canonical) by repeated modular doublings.
    // Compile-time only; no constant-time requirement.
    const fn make_r2() -> [u64; 4] {
        let m = Self::MODULUS;
        let mut x = [ 1u64, 0, 0, 0 ];
        let mut i = 0;
        while i < 512 {
            // x < M < 2^255, so the doubling cannot overflow.
            let (d, _) = add256(&x, &x);
            let (e, bb) = sub256(&d, &m);
            x = select256(&e, &d, (bb as u64).wrapping_neg());
            i += 1;
        }
        x
    }

    // Montgomery multiplication: return a*b/2^256 mod M. If a*b is
    // lower than 2^257*M (in particular, if both operands are lower
    // than 2*M, or if b is lower than M), then the output is lower than
    // 2*M. This function is usable in constant expressions.
    const fn mont_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        // 512-bit product, with one extra limb for reduction carries.
        let mut t = [0u64; 9];
        let mut i = 0;
        while i < 4 {
            let mut hi = 0;
            let mut j = 0;
            while j < 4 {
                let (lo, h) = umull_add2(a[i], b[j], t[i + j], hi);
                t[i + j] = lo;
                hi = h;
                j += 1;
            }
            t[i + 4] = hi;
            i += 1;
        }

        // Clear the low four limbs, one at a time.
        let m = Self::MODULUS;
        let mut i = 0;
        while i < 4 {
            let f = t[i].wrapping_mul(Self::M0I);
            let mut hi = 0;
            let mut j = 0;
            while j < 4 {
                let (lo, h) = umull_add2(f, m[j], t[i + j], hi);
                t[i + j] = lo;
                hi = h;
                j += 1;
            }
            let mut k = i + 4;
            while k < 9 {
                let (d, cc) = addcarry_u64(t[k], hi, 0);
                t[k] = d;
                hi = cc as u64;
                k += 1;
            }
            i += 1;
        }

        // The quotient is below 3*M < 2^257; t[8] is its top bit. One
        // conditional subtraction of M brings it below 2*M.
        let r = [ t[4], t[5], t[6], t[7] ];
        let (d, bb) = sub256(&r, &m);
        let w = (t[8] | ((bb as u64) ^ 1)).wrapping_neg();
        select256(&r, &d, w)
    }
}

// Jacobi symbol (a|m) for an odd modulus m, with binary reduction
// steps. Variable-time.
fn jacobi_vartime(a: [u64; 4], m: [u64; 4]) -> i32 {
    let mut a = a;
    let mut m = m;
    let mut t = 1i32;
    while !is_zero256(&a) {
        let tz = ctz256(&a);
        a = shr256(&a, tz);
        if (tz & 1) != 0 {
            let r = m[0] & 7;
            if r == 3 || r == 5 {
                t = -t;
            }
        }

        // Both a and m are odd now; quadratic reciprocity.
        if lt256(&a, &m) {
            core::mem::swap(&mut a, &mut m);
            if (a[0] & 3) == 3 && (m[0] & 3) == 3 {
                t = -t;
            }
        }
        a = sub256(&a, &m).0;
    }
    if m == [ 1, 0, 0, 0 ] { t } else { 0 }
}

// ========================================================================
// Implementations of all the traits needed to use the simple operators
// (+, *, -...) on element instances, with or without references.

macro_rules! montint_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $set:ident) => {
        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $Op<MontInt256<M0, M1, M2, M3>> for MontInt256<M0, M1, M2, M3>
        {
            type Output = MontInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: MontInt256<M0, M1, M2, M3>)
                -> MontInt256<M0, M1, M2, M3>
            {
                let mut r = self;
                r.$set(&other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $Op<&MontInt256<M0, M1, M2, M3>> for MontInt256<M0, M1, M2, M3>
        {
            type Output = MontInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: &MontInt256<M0, M1, M2, M3>)
                -> MontInt256<M0, M1, M2, M3>
            {
                let mut r = self;
                r.$set(other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $Op<MontInt256<M0, M1, M2, M3>> for &MontInt256<M0, M1, M2, M3>
        {
            type Output = MontInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: MontInt256<M0, M1, M2, M3>)
                -> MontInt256<M0, M1, M2, M3>
            {
                let mut r = *self;
                r.$set(&other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $Op<&MontInt256<M0, M1, M2, M3>> for &MontInt256<M0, M1, M2, M3>
        {
            type Output = MontInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: &MontInt256<M0, M1, M2, M3>)
                -> MontInt256<M0, M1, M2, M3>
            {
                let mut r = *self;
                r.$set(other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $OpAssign<MontInt256<M0, M1, M2, M3>> for MontInt256<M0, M1, M2, M3>
        {
            #[inline(always)]
            fn $op_assign(&mut self, other: MontInt256<M0, M1, M2, M3>) {
                self.$set(&other);
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
            $OpAssign<&MontInt256<M0, M1, M2, M3>> for MontInt256<M0, M1, M2, M3>
        {
            #[inline(always)]
            fn $op_assign(&mut self, other: &MontInt256<M0, M1, M2, M3>) {
                self.$set(other);
            }
        }
    };
}

montint_binop!(Add, add, AddAssign, add_assign, set_add);
montint_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
montint_binop!(Mul, mul, MulAssign, mul_assign, set_mul);

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Neg for MontInt256<M0, M1, M2, M3>
{
    type Output = MontInt256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> MontInt256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Neg for &MontInt256<M0, M1, M2, M3>
{
    type Output = MontInt256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> MontInt256<M0, M1, M2, M3> {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// Equality is on the represented value, not on the stored limbs.
impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    PartialEq for MontInt256<M0, M1, M2, M3>
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(*other)
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Eq for MontInt256<M0, M1, M2, M3> { }

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Default for MontInt256<M0, M1, M2, M3>
{
    #[inline(always)]
    fn default() -> Self {
        Self::ZERO
    }
}
