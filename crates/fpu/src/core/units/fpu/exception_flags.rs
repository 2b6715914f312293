//! Floating-point exception (accrued) flags.
//!
//! RISC-V defines five exception flags in `fcsr.fflags` (spec §11.2):
//!
//! | Bit | Flag | Description         |
//! |-----|------|---------------------|
//! |  4  | NV   | Invalid Operation   |
//! |  3  | DZ   | Divide by Zero      |
//! |  2  | OF   | Overflow            |
//! |  1  | UF   | Underflow           |
//! |  0  | NX   | Inexact             |
//!
//! The IEEE primitive reports the same five conditions through its own
//! `Status` bit set, in a different bit order. [`FpFlags::from_status`]
//! translates one into the other, and [`drain_and_translate`] moves the
//! primitive's status for one call into the sticky `fflags` register.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use rustc_apfloat::Status;

use crate::core::arch::csr::FpState;

/// Floating-point exception flags (RISC-V `fcsr.fflags`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const NV: Self = Self(1 << 4);
    /// Divide by Zero.
    pub const DZ: Self = Self(1 << 3);
    /// Overflow.
    pub const OF: Self = Self(1 << 2);
    /// Underflow.
    pub const UF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);
    /// All five flags.
    pub const ALL: Self = Self(0x1F);

    /// Builds a flag set from raw `fflags` bits, dropping bits above bit 4.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Translates the IEEE primitive's status into RISC-V flag encoding.
    pub fn from_status(status: Status) -> Self {
        let mut flags = Self::NONE;
        if status.contains(Status::INEXACT) {
            flags |= Self::NX;
        }
        if status.contains(Status::UNDERFLOW) {
            flags |= Self::UF;
        }
        if status.contains(Status::OVERFLOW) {
            flags |= Self::OF;
        }
        if status.contains(Status::DIV_BY_ZERO) {
            flags |= Self::DZ;
        }
        if status.contains(Status::INVALID_OP) {
            flags |= Self::NV;
        }
        flags
    }

    /// Returns the raw 5-bit flag value for writing into `fcsr`.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the specified flag is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FpFlags {
    /// Formats the set as the flag mnemonics, most significant first (e.g. `NV|NX`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names = [
            (Self::NV, "NV"),
            (Self::DZ, "DZ"),
            (Self::OF, "OF"),
            (Self::UF, "UF"),
            (Self::NX, "NX"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Moves the exception status of the last primitive call into `fflags`.
///
/// Reads the primitive's status, resets it to empty, translates it to RISC-V
/// encoding and ORs the result into the sticky flags. Called exactly once per
/// primitive-backed operation, after the primitive and before the result is
/// returned.
pub fn drain_and_translate(state: &mut FpState) {
    let status = state.env.take_status();
    let flags = FpFlags::from_status(status);
    if !flags.is_empty() {
        tracing::trace!(%flags, "accrued FP exception flags");
    }
    state.accrue(flags);
}
