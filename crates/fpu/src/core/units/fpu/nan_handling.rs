//! NaN boxing, canonicalization and NaN-aware min/max for the FPU.
//!
//! RISC-V stores single-precision values in 64-bit floating-point registers
//! using "NaN boxing": the upper 32 bits must be all 1s.
//!
//! - **Boxing** ([`box_f32`]): Sets upper 32 bits to 1s when writing a binary32
//!   result into a 64-bit register.
//! - **Unboxing** ([`unbox_f32`]): Checks that the upper 32 bits are all 1s.
//!   If not, the value is treated as canonical NaN (RISC-V spec §12.2).
//! - **Canonicalization** ([`canonical_nan`]): NaN results of arithmetic are
//!   replaced with the canonical quiet NaN, discarding payload bits (§11.3).
//! - **Silencing** ([`silence`]): Sets the quiet bit and keeps the payload.
//! - **minNum/maxNum** ([`fmin`], [`fmax`]): NaN-aware selection with −0 < +0.

use super::format::{FloatFormat, FpFormat};

/// Upper-32-bit mask used for NaN boxing validation.
pub const NAN_BOX_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// Boxes raw binary32 bits into a 64-bit register image.
///
/// # Arguments
///
/// * `bits` - The binary32 encoding.
///
/// # Returns
///
/// `bits` in the lower half and all 1s in the upper half.
#[inline]
pub const fn box_f32(bits: u32) -> u64 {
    bits as u64 | NAN_BOX_MASK
}

/// Unboxes a 64-bit register image to binary32 bits.
///
/// Returns the canonical NaN (`0x7fc00000`) if the image is not properly
/// NaN-boxed (RISC-V spec §12.2).
#[inline]
pub const fn unbox_f32(reg: u64) -> u32 {
    if is_boxed(reg) {
        reg as u32
    } else {
        FloatFormat::SINGLE.canonical_nan() as u32
    }
}

/// Returns true if the upper 32 bits of `reg` are all 1s.
#[inline]
pub const fn is_boxed(reg: u64) -> bool {
    reg & NAN_BOX_MASK == NAN_BOX_MASK
}

/// The canonical quiet NaN of format `F` (`0x7fc00000` / `0x7ff8000000000000`).
#[inline]
pub fn canonical_nan<F: FpFormat>() -> F::Bits {
    F::narrow(F::FORMAT.canonical_nan())
}

/// Quiets a NaN, keeping its sign and payload. Non-NaN values pass through.
#[inline]
pub fn silence<F: FpFormat>(bits: F::Bits) -> F::Bits {
    let raw = F::widen(bits);
    if F::FORMAT.is_nan(raw) {
        F::narrow(raw | F::FORMAT.quiet_bit())
    } else {
        bits
    }
}

/// IEEE 754-2008 `minNum` (RISC-V FMIN).
///
/// If exactly one operand is NaN, returns the other operand.
/// If both are NaN, returns canonical NaN.
/// Otherwise returns the arithmetic minimum, ordering −0 below +0.
///
/// Signaling inputs raise NV; that is the caller's job.
pub fn fmin<F: FpFormat>(a: F::Bits, b: F::Bits) -> F::Bits {
    let (x, y) = (F::from_raw(a), F::from_raw(b));
    match (x.is_nan(), y.is_nan()) {
        (true, true) => canonical_nan::<F>(),
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            if x.is_zero() && y.is_zero() {
                if x.is_negative() { a } else { b }
            } else if x < y {
                a
            } else {
                b
            }
        }
    }
}

/// IEEE 754-2008 `maxNum` (RISC-V FMAX).
///
/// Mirror image of [`fmin`]: +0 is ordered above −0.
pub fn fmax<F: FpFormat>(a: F::Bits, b: F::Bits) -> F::Bits {
    let (x, y) = (F::from_raw(a), F::from_raw(b));
    match (x.is_nan(), y.is_nan()) {
        (true, true) => canonical_nan::<F>(),
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            if x.is_zero() && y.is_zero() {
                if x.is_negative() { b } else { a }
            } else if x > y {
                a
            } else {
                b
            }
        }
    }
}
