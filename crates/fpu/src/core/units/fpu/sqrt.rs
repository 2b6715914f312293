//! Correctly rounded square root on top of the IEEE primitive.
//!
//! `rustc_apfloat` has no square root, so it is built from parts the
//! primitive does have. For a finite positive `x = m · 2^e` with `e` even:
//!
//! 1. scale the integer significand to `M = m · 4^s` so that `M` fills 126
//!    bits,
//! 2. take the exact integer square root `r = ⌊√M⌋`,
//! 3. fold any remainder into the least significant bit of `r` (sticky bit),
//! 4. round `r` to the target precision with `from_u128_r`,
//! 5. put the exponent back: `√x = r · 2^(e/2 − s)`.
//!
//! `r` carries at least 62 significant bits, more than two beyond binary64's
//! precision, so step 4 sees the correct round and sticky bits and the result
//! is the correctly rounded root under every rounding direction. The result
//! of a square root is never subnormal and never overflows, so step 5 is an
//! exact adjustment of the exponent field.

use rustc_apfloat::{Round, Status, StatusAnd};

use super::format::FpFormat;

/// Computes `√x` rounded according to `round`.
///
/// Special cases follow IEEE-754: `√−0 = −0`, `√+∞ = +∞`, the root of a
/// negative non-zero value is an invalid operation, and a signaling NaN
/// operand is an invalid operation. NaN results are returned as produced;
/// the caller applies its NaN policy.
pub fn sqrt_r<F: FpFormat>(x: F, round: Round) -> StatusAnd<F> {
    if x.is_nan() {
        let status = if x.is_signaling() { Status::INVALID_OP } else { Status::OK };
        return status.and(x);
    }
    if x.is_zero() {
        return Status::OK.and(x);
    }
    if x.is_negative() {
        return Status::INVALID_OP.and(F::qnan(None));
    }
    if x.is_infinite() {
        return Status::OK.and(x);
    }

    let fmt = F::FORMAT;
    let raw = F::widen(x.to_raw());
    let frac_bits = fmt.frac_bits as i32;
    let biased = fmt.biased_exponent(raw) as i32;
    let frac = u128::from(fmt.fraction(raw));

    let (mut m, mut e) = if biased == 0 {
        (frac, 1 - fmt.bias() - frac_bits)
    } else {
        (frac | (1 << fmt.frac_bits), biased - fmt.bias() - frac_bits)
    };
    if e & 1 != 0 {
        m <<= 1;
        e -= 1;
    }

    let s = (m.leading_zeros() - 2) / 2;
    let scaled = m << (2 * s);
    let mut r = scaled.isqrt();
    if r * r != scaled {
        r |= 1;
    }

    let StatusAnd { status, value } = F::from_u128_r(r, round);
    let shift = e / 2 - s as i32;
    let adjusted = (value.to_bits() as i128 + (i128::from(shift) << fmt.frac_bits)) as u128;
    status.and(F::from_bits(adjusted))
}
