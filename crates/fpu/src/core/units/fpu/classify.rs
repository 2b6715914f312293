//! FCLASS: floating-point classification.
//!
//! Classification is a pure function of the raw encoding. It reads the sign,
//! exponent and fraction fields through the format descriptor and never
//! touches the rounding mode or the exception flags.
//!
//! | Bit | Class               |
//! |-----|---------------------|
//! |  0  | −∞                  |
//! |  1  | negative normal     |
//! |  2  | negative subnormal  |
//! |  3  | −0                  |
//! |  4  | +0                  |
//! |  5  | positive subnormal  |
//! |  6  | positive normal     |
//! |  7  | +∞                  |
//! |  8  | signaling NaN       |
//! |  9  | quiet NaN           |

use super::format::FpFormat;

/// The ten FCLASS categories, numbered by their result bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FClass {
    /// −∞.
    NegInfinity = 0,
    /// Negative normal number.
    NegNormal = 1,
    /// Negative subnormal number.
    NegSubnormal = 2,
    /// −0.
    NegZero = 3,
    /// +0.
    PosZero = 4,
    /// Positive subnormal number.
    PosSubnormal = 5,
    /// Positive normal number.
    PosNormal = 6,
    /// +∞.
    PosInfinity = 7,
    /// Signaling NaN.
    SignalingNan = 8,
    /// Quiet NaN.
    QuietNan = 9,
}

impl FClass {
    /// Returns the one-hot FCLASS result mask.
    #[inline]
    pub const fn mask(self) -> u64 {
        1 << self as u8
    }
}

/// Classifies a raw value of format `F`.
pub fn classify<F: FpFormat>(bits: F::Bits) -> FClass {
    let fmt = F::FORMAT;
    let raw = F::widen(bits);
    let negative = fmt.sign(raw);
    let exp = fmt.biased_exponent(raw);
    let frac = fmt.fraction(raw);
    let exp_all_ones = exp == fmt.exp_mask() >> fmt.frac_bits;

    match (exp_all_ones, exp == 0, frac == 0, negative) {
        (true, _, true, true) => FClass::NegInfinity,
        (true, _, true, false) => FClass::PosInfinity,
        (true, _, false, _) => {
            if raw & fmt.quiet_bit() == 0 {
                FClass::SignalingNan
            } else {
                FClass::QuietNan
            }
        }
        (false, true, true, true) => FClass::NegZero,
        (false, true, true, false) => FClass::PosZero,
        (false, true, false, true) => FClass::NegSubnormal,
        (false, true, false, false) => FClass::PosSubnormal,
        (false, false, _, true) => FClass::NegNormal,
        (false, false, _, false) => FClass::PosNormal,
    }
}
