//! Finite fields.
//!
//! This module defines the base field of the Bandersnatch curve (the
//! scalar field of BLS12-381), as a specialization of the
//! backend-provided `MontInt256` type. The scalar field of the curve
//! (integers modulo the prime subgroup order) is `bandersnatch::Scalar`.

use crate::Error;

pub use crate::backend::MontInt256;

/// Integers modulo
/// `p = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
pub type GFbandersnatch = MontInt256<
    0xFFFFFFFF00000001, 0x53BDA402FFFE5BFE,
    0x3339D80809A1D805, 0x73EDA753299D7D48>;

impl GFbandersnatch {

    // p - 1 = 2^32 * q with q odd.
    const TWO_ADICITY: u32 = 32;

    // (q - 1)/2
    const QM1D2: [u64; 4] = [
        0x7FFF2DFF7FFFFFFF, 0x04D0EC02A9DED201,
        0x94CEBEA4199CEC04, 0x0000000039F6D3A9,
    ];

    // 7^q, a primitive 2^32-th root of unity (7 is not a square).
    const ROOT_OF_UNITY: Self = Self::w64be(
        0x16A2A19EDFE81F20, 0xD09B681922C813B4,
        0xB63683508C2280B9, 0x3829971F439F0D2B);

    /// Square root (Tonelli-Shanks). Which of the two roots is returned
    /// is unspecified. Variable-time.
    pub fn sqrt(self) -> Result<Self, Error> {
        match self.legendre() {
            0 => return Ok(Self::ZERO),
            -1 => return Err(Error::NotASquare),
            _ => {}
        }

        // Invariants: x^2 = self*b, b^(2^(v-1)) = 1, z has order 2^v.
        let w = self.pow_vartime(&Self::QM1D2);
        let mut v = Self::TWO_ADICITY;
        let mut x = self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;
        while !b.equals(Self::ONE) {
            let mut k = 0;
            let mut b2k = b;
            while !b2k.equals(Self::ONE) {
                b2k.set_square();
                k += 1;
                if k >= v {
                    return Err(Error::NotASquare);
                }
            }
            let w = z.xsquare(v - k - 1);
            z = w.square();
            b *= z;
            x *= w;
            v = k;
        }
        Ok(x)
    }
}
