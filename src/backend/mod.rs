//! Low-level integer and modular arithmetic.
//!
//! This module provides the generic structure that implements integers
//! modulo a 255-bit (or smaller) odd modulus, in Montgomery
//! representation, and the wide unsigned integers used for lattice
//! splitting of scalars. Only 64-bit limbs are implemented; on 32-bit
//! targets the `u128` arithmetic they rely on is emulated by the
//! compiler.
//!
//! The following properties apply to the `MontInt256` implementation:
//!
//!  - An instance encapsulates an integer modulo `M`. Internally, values
//!    are weakly reduced: the stored integer is lower than `2*M`, but
//!    not necessarily lower than `M`. Equality, zero tests, signs,
//!    Legendre symbols and encodings always operate on the fully
//!    reduced value.
//!
//!  - The constant values `Self::ZERO`, `Self::ONE` and `Self::MINUS_ONE`
//!    contain the elements of value 0, 1 and -1, respectively.
//!
//!  - Usual arithmetic operators can be used on elements (`+`, `-`, `*`,
//!    and the compound assignments `+=`, `-=` and `*=`). Operators can
//!    use both the raw types, and references thereof. There is no
//!    division operator; `invert(self) -> Result<Self, Error>` fails on
//!    zero with `Error::DivisionByZero`.
//!
//!  - Function `set_square(&mut self)` squares an element (in place).
//!    Corresponding function `square(self) -> Self` returns the result
//!    as a new instance; `xsquare(self, n)` performs `n` successive
//!    squarings.
//!
//!  - Functions `half()`, `mul2()` and `mul4()` multiply an element by
//!    1/2, 2 and 4, respectively, faster than a generic multiplication.
//!
//!  - Constant values can be defined with the const-qualified `w64le()`
//!    and `w64be()` functions, which take the value as four 64-bit limbs
//!    in little-endian and big-endian order, respectively. The 256-bit
//!    value is implicitly reduced modulo `M`. Runtime variants
//!    `from_w64le()` and `from_w64be()` yield the same output.
//!
//!  - Conversions from `i64`, `u64`, `i128` and `u128` use the functions
//!    `from_i64()`, `from_u64()`, and so on. Negative integers are
//!    reduced modulo `M`.
//!
//!  - Function `equals(self, rhs: Self) -> bool` (also available as
//!    `==`) compares values; `is_zero(self) -> bool` is the specialized
//!    comparison with zero.
//!
//!  - The `legendre(self) -> i32` function returns the Legendre symbol
//!    for an element (0 for zero, +1 for non-zero squares, -1 for
//!    non-squares). The `sign(self) -> i32` function returns +1 for
//!    values in `1..(M-1)/2`, -1 for values in `(M+1)/2..M-1`, and 0 for
//!    zero.
//!
//!  - The `batch_invert(xx: &mut[Self])` function performs inversion
//!    of all elements in the provided slice, with a single internal
//!    inversion per batch of 200 elements. Elements of value zero are
//!    tolerated (the "inverse" of zero is zero).
//!
//!  - `encode32()` produces the canonical 32-byte little-endian
//!    encoding; `decode32()` accepts only canonical encodings of exactly
//!    32 bytes; `decode_reduce()` accepts bytes of any length and
//!    reduces the integer modulo `M`.

pub mod w64;

pub use w64::MontInt256;
pub use w64::zz::{Zu256, Zu512};
