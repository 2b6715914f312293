//! Floating-point rounding mode support.
//!
//! RISC-V defines five rounding modes (spec §11.2):
//!
//! | Value | Mode | Description                          |
//! |-------|------|--------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even       |
//! | 0b001 | RTZ  | Round towards Zero                   |
//! | 0b010 | RDN  | Round Down (towards −∞)              |
//! | 0b011 | RUP  | Round Up (towards +∞)                |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//! | 0b111 | DYN  | Use `fcsr.frm` (instruction field only) |
//!
//! 0b101 and 0b110 are reserved; an instruction that resolves to one of
//! them, directly or through `frm`, is illegal.

use std::fmt;

use rustc_apfloat::Round;

use crate::common::{IllegalCause, Trap};
use crate::core::arch::csr::FpState;

/// Instruction rounding-mode field value selecting `fcsr.frm`.
pub const RM_DYNAMIC: u8 = 0b111;

/// RISC-V rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down (towards −∞).
    Rdn = 0b010,
    /// Round Up (towards +∞).
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    Rmm = 0b100,
}

impl RoundingMode {
    /// All five static rounding modes in encoding order.
    pub const ALL: [Self; 5] = [Self::Rne, Self::Rtz, Self::Rdn, Self::Rup, Self::Rmm];

    /// Decodes a 3-bit rounding mode field from an instruction or `fcsr.frm`.
    ///
    /// Returns `None` for reserved encodings (0b101, 0b110) and the dynamic
    /// sentinel (0b111), which must be resolved to `fcsr.frm` by the caller.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Returns the 3-bit encoding of this mode.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the rounding directive understood by the IEEE primitive.
    pub const fn to_round(self) -> Round {
        match self {
            Self::Rne => Round::NearestTiesToEven,
            Self::Rtz => Round::TowardZero,
            Self::Rdn => Round::TowardNegative,
            Self::Rup => Round::TowardPositive,
            Self::Rmm => Round::NearestTiesToAway,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rne => "rne",
            Self::Rtz => "rtz",
            Self::Rdn => "rdn",
            Self::Rup => "rup",
            Self::Rmm => "rmm",
        })
    }
}

/// Resolves an instruction's rounding-mode field and installs it.
///
/// `code` 7 selects the persisted `frm`. The resolved mode becomes the IEEE
/// primitive's rounding direction for the rest of the instruction.
///
/// # Arguments
///
/// * `state` - The hart's floating-point state.
/// * `code` - The 3-bit `rm` field of the instruction.
///
/// # Returns
///
/// The resolved mode, or `Trap::IllegalInstruction` if it is reserved.
pub fn resolve_rounding_mode(state: &mut FpState, code: u8) -> Result<RoundingMode, Trap> {
    let resolved = if code == RM_DYNAMIC { state.frm } else { code };
    let Some(mode) = RoundingMode::from_bits(resolved) else {
        tracing::debug!(code, frm = state.frm, "reserved rounding mode");
        return Err(Trap::IllegalInstruction(IllegalCause::ReservedRoundingMode(resolved)));
    };
    state.env.set_rounding(mode);
    Ok(mode)
}
