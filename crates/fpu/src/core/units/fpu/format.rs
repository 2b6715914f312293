//! Per-width floating-point format descriptors.
//!
//! Everything the unit needs to know about a binary interchange format that
//! is not arithmetic lives here: field widths, masks, the canonical NaN and
//! the register boxing rule. The classifier, the sign-flip primitive, NaN
//! handling and square root all read the same [`FloatFormat`] so there is
//! one place where binary32 and binary64 differ.

use std::fmt;

use rustc_apfloat::ieee::{Double, Quad, Single};
use rustc_apfloat::{Float, FloatConvert, Round};

use super::nan_handling::{box_f32, unbox_f32};

/// Field layout of an IEEE-754 binary interchange format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    /// Instruction suffix (`s` or `d`).
    pub name: &'static str,
    /// Total width in bits.
    pub width: u32,
    /// Width of the biased exponent field.
    pub exp_bits: u32,
    /// Width of the trailing significand field.
    pub frac_bits: u32,
}

impl FloatFormat {
    /// IEEE-754 binary32 (F extension).
    pub const SINGLE: Self = Self {
        name: "s",
        width: 32,
        exp_bits: 8,
        frac_bits: 23,
    };

    /// IEEE-754 binary64 (D extension).
    pub const DOUBLE: Self = Self {
        name: "d",
        width: 64,
        exp_bits: 11,
        frac_bits: 52,
    };

    /// Mask of the sign bit.
    #[inline]
    pub const fn sign_mask(self) -> u64 {
        1 << (self.width - 1)
    }

    /// Mask of the biased exponent field, in place.
    #[inline]
    pub const fn exp_mask(self) -> u64 {
        ((1 << self.exp_bits) - 1) << self.frac_bits
    }

    /// Mask of the trailing significand field.
    #[inline]
    pub const fn frac_mask(self) -> u64 {
        (1 << self.frac_bits) - 1
    }

    /// The most significant fraction bit; set for quiet NaNs.
    #[inline]
    pub const fn quiet_bit(self) -> u64 {
        1 << (self.frac_bits - 1)
    }

    /// Exponent bias.
    #[inline]
    pub const fn bias(self) -> i32 {
        (1 << (self.exp_bits - 1)) - 1
    }

    /// Mask covering every bit of the format.
    #[inline]
    pub const fn width_mask(self) -> u64 {
        u64::MAX >> (64 - self.width)
    }

    /// RISC-V canonical NaN: positive, quiet, zero payload.
    #[inline]
    pub const fn canonical_nan(self) -> u64 {
        self.exp_mask() | self.quiet_bit()
    }

    /// Magnitude bits of the largest finite value.
    #[inline]
    pub const fn largest_finite(self) -> u64 {
        (self.exp_mask() - (1 << self.frac_bits)) | self.frac_mask()
    }

    /// Binary128 encoding of `2^(emax + 1)`, the smallest magnitude whose
    /// rounding overflows under every rounding direction.
    #[inline]
    pub const fn overflow_bound_quad(self) -> u128 {
        const QUAD_BIAS: u128 = 16383;
        const QUAD_FRAC_BITS: u32 = 112;
        (QUAD_BIAS + self.bias() as u128 + 1) << QUAD_FRAC_BITS
    }

    /// Returns true if the sign bit of `bits` is set.
    #[inline]
    pub const fn sign(self, bits: u64) -> bool {
        bits & self.sign_mask() != 0
    }

    /// Returns the biased exponent field of `bits`.
    #[inline]
    pub const fn biased_exponent(self, bits: u64) -> u64 {
        (bits & self.exp_mask()) >> self.frac_bits
    }

    /// Returns the trailing significand field of `bits`.
    #[inline]
    pub const fn fraction(self, bits: u64) -> u64 {
        bits & self.frac_mask()
    }

    /// Returns true if `bits` encodes a NaN of either kind.
    #[inline]
    pub const fn is_nan(self, bits: u64) -> bool {
        bits & self.exp_mask() == self.exp_mask() && self.fraction(bits) != 0
    }

    /// Returns true if `bits` encodes a signaling NaN.
    #[inline]
    pub const fn is_snan(self, bits: u64) -> bool {
        self.is_nan(bits) && bits & self.quiet_bit() == 0
    }
}

/// A binary interchange format the unit can execute.
///
/// Implemented for the primitive's `Single` and `Double`; the raw encoding
/// type is `u32` and `u64` respectively. Values cross the unit's API only as
/// raw bits and are rebuilt into the primitive type at the point of use.
pub trait FpFormat: Float {
    /// Raw encoding of one value.
    type Bits: Copy + Eq + fmt::Debug + fmt::LowerHex + Send + Sync + 'static;

    /// Field layout of this format.
    const FORMAT: FloatFormat;

    /// Zero-extends raw bits to 64 bits.
    fn widen(bits: Self::Bits) -> u64;

    /// Truncates a 64-bit value to this format's width.
    fn narrow(raw: u64) -> Self::Bits;

    /// Reads an operand of this format from a 64-bit FP register image.
    fn unbox(reg: u64) -> Self::Bits;

    /// Writes a result of this format into a 64-bit FP register image.
    fn boxed(bits: Self::Bits) -> u64;

    /// Builds a primitive value from raw bits.
    #[inline]
    fn from_raw(bits: Self::Bits) -> Self {
        Self::from_bits(u128::from(Self::widen(bits)))
    }

    /// Returns the raw bits of a primitive value.
    #[inline]
    fn to_raw(self) -> Self::Bits {
        Self::narrow(self.to_bits() as u64)
    }

    /// Converts to binary128, which holds every value of this format exactly.
    fn to_quad(self) -> Quad;
}

impl FpFormat for Single {
    type Bits = u32;

    const FORMAT: FloatFormat = FloatFormat::SINGLE;

    #[inline]
    fn widen(bits: u32) -> u64 {
        u64::from(bits)
    }

    #[inline]
    fn narrow(raw: u64) -> u32 {
        raw as u32
    }

    #[inline]
    fn unbox(reg: u64) -> u32 {
        unbox_f32(reg)
    }

    #[inline]
    fn boxed(bits: u32) -> u64 {
        box_f32(bits)
    }

    #[inline]
    fn to_quad(self) -> Quad {
        let mut loses_info = false;
        <Self as FloatConvert<Quad>>::convert_r(self, Round::NearestTiesToEven, &mut loses_info).value
    }
}

impl FpFormat for Double {
    type Bits = u64;

    const FORMAT: FloatFormat = FloatFormat::DOUBLE;

    #[inline]
    fn widen(bits: u64) -> u64 {
        bits
    }

    #[inline]
    fn narrow(raw: u64) -> u64 {
        raw
    }

    #[inline]
    fn unbox(reg: u64) -> u64 {
        reg
    }

    #[inline]
    fn boxed(bits: u64) -> u64 {
        bits
    }

    #[inline]
    fn to_quad(self) -> Quad {
        let mut loses_info = false;
        <Self as FloatConvert<Quad>>::convert_r(self, Round::NearestTiesToEven, &mut loses_info).value
    }
}

/// Inverts the sign of a raw value of format `F`.
///
/// A pure bit operation: no rounding, no flags, NaN payloads untouched.
/// Used to build the negated operands of the fused multiply-add family.
#[inline]
pub fn flip_sign<F: FpFormat>(bits: F::Bits) -> F::Bits {
    F::narrow(F::widen(bits) ^ F::FORMAT.sign_mask())
}
