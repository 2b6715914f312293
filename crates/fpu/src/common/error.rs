//! Trap and configuration error definitions.
//!
//! This module defines the error handling for the floating-point unit. It provides:
//! 1. **Trap Representation:** The only synchronous exception an FP instruction can
//!    raise by itself is an illegal instruction; IEEE exceptions are flags, not traps.
//! 2. **Cause Codes:** Mapping of a trap to its `mcause` exception code.
//! 3. **Configuration Errors:** Reporting malformed configuration input.

use thiserror::Error;

/// `mcause` exception code for an illegal instruction.
pub const ILLEGAL_INSTRUCTION: u64 = 2;

/// Why an FP instruction was rejected as illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IllegalCause {
    /// `mstatus.FS` is Off, so every FP instruction is illegal.
    FpDisabled,

    /// The rounding-mode field (after resolving the dynamic selector through
    /// `frm`) held a reserved encoding. The associated value is that encoding.
    ReservedRoundingMode(u8),

    /// The instruction only exists on RV64 (FCVT.L*, FCVT.*.L*) but the
    /// unit is configured for RV32.
    UnsupportedXlen,
}

/// RISC-V traps the floating-point unit can request.
///
/// The FPU never delivers a trap itself; it returns one and performs no
/// further work for the instruction. Delivery (`mepc`, `mcause`, `mtval`,
/// privilege switch) belongs to the surrounding CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Illegal instruction exception.
    #[error("IllegalInstruction({0})")]
    IllegalInstruction(IllegalCause),
}

impl Trap {
    /// Returns the `mcause` exception code for this trap.
    pub const fn cause(&self) -> u64 {
        match self {
            Self::IllegalInstruction(_) => ILLEGAL_INSTRUCTION,
        }
    }
}

impl std::fmt::Display for IllegalCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FpDisabled => write!(f, "mstatus.FS is Off"),
            Self::ReservedRoundingMode(rm) => write!(f, "reserved rounding mode {rm:#05b}"),
            Self::UnsupportedXlen => write!(f, "instruction requires RV64"),
        }
    }
}

/// Errors produced while loading an [`FpuConfig`](crate::config::FpuConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid JSON or did not match the configuration schema.
    #[error("invalid FPU configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
