//! Floating-point Control and Status Register (CSR) definitions and state.
//!
//! This module implements the floating-point slice of the CSR subsystem. It provides:
//! 1. **Address Definitions:** Constants for `fflags`, `frm` and `fcsr`.
//! 2. **Field Masks:** Bitmasks and shifts for `fcsr` and the `mstatus.FS` field.
//! 3. **Register Storage:** The `FpState` struct holding the persisted FP registers.
//! 4. **Access Logic:** CSR read and write views over that state.

use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::ieee::IeeeEnv;

/// Floating-point accrued exceptions CSR address.
pub const FFLAGS: u32 = 0x001;

/// Floating-point dynamic rounding mode CSR address.
pub const FRM: u32 = 0x002;

/// Floating-point control and status register CSR address (`frm` + `fflags`).
pub const FCSR: u32 = 0x003;

/// Bit mask of the `fflags` field.
pub const FFLAGS_MASK: u64 = 0x1F;

/// Bit mask of the `frm` field (after shifting).
pub const FRM_MASK: u64 = 0x7;

/// Bit shift of the `frm` field inside `fcsr`.
pub const FCSR_FRM_SHIFT: u64 = 5;

/// Floating-point state field mask in `mstatus` register.
pub const MSTATUS_FS: u64 = 3 << 13;

/// Bit shift of the floating-point state field in `mstatus` register.
pub const MSTATUS_FS_SHIFT: u64 = 13;

/// Floating-point state: off (no FPU state).
pub const MSTATUS_FS_OFF: u64 = 0 << 13;

/// Floating-point state: initial (FPU state is initial).
pub const MSTATUS_FS_INIT: u64 = 1 << 13;

/// Floating-point state: clean (FPU state is clean, no writes).
pub const MSTATUS_FS_CLEAN: u64 = 2 << 13;

/// Floating-point state: dirty (FPU state has been modified).
pub const MSTATUS_FS_DIRTY: u64 = 3 << 13;

/// The `mstatus.FS` extension context status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FsState {
    /// FP instructions are illegal.
    #[default]
    Off,
    /// FP state holds its reset values.
    Initial,
    /// FP state matches the last save.
    Clean,
    /// FP state has been modified since the last save.
    Dirty,
}

impl FsState {
    /// Decodes the FS field from a full `mstatus` value.
    pub const fn from_mstatus(mstatus: u64) -> Self {
        match (mstatus & MSTATUS_FS) >> MSTATUS_FS_SHIFT {
            0 => Self::Off,
            1 => Self::Initial,
            2 => Self::Clean,
            _ => Self::Dirty,
        }
    }

    /// Returns the FS field positioned for insertion into `mstatus`.
    pub const fn to_mstatus_bits(self) -> u64 {
        match self {
            Self::Off => MSTATUS_FS_OFF,
            Self::Initial => MSTATUS_FS_INIT,
            Self::Clean => MSTATUS_FS_CLEAN,
            Self::Dirty => MSTATUS_FS_DIRTY,
        }
    }
}

/// Floating-point architectural state of a single hart.
///
/// `frm` and `fflags` persist across instructions and are mutated in place by
/// the FPU. `env` is the IEEE primitive's working state: its rounding
/// direction is installed and its status drained on every instruction, so
/// nothing in it outlives a single operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FpState {
    /// Dynamic rounding mode (`fcsr.frm`), 3 bits.
    pub frm: u8,
    /// Accrued exception flags (`fcsr.fflags`).
    pub fflags: FpFlags,
    /// Extension context status (`mstatus.FS`).
    pub fs: FsState,
    pub(crate) env: IeeeEnv,
}

impl FpState {
    /// Creates a state with FP enabled (`FS = Initial`), `frm = RNE` and no flags.
    pub fn new() -> Self {
        Self {
            fs: FsState::Initial,
            ..Self::default()
        }
    }

    /// Creates a state with FP disabled (`FS = Off`), as after reset.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns true if FP instructions may execute.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.fs != FsState::Off
    }

    /// ORs `flags` into `fflags`. Non-empty flags dirty the FP state.
    pub(crate) fn accrue(&mut self, flags: FpFlags) {
        if flags.is_empty() {
            return;
        }
        self.fflags |= flags;
        self.mark_dirty();
    }

    /// Writing FP state moves an enabled FS to Dirty. FS = Off is left alone.
    fn mark_dirty(&mut self) {
        if self.is_enabled() {
            self.fs = FsState::Dirty;
        }
    }

    /// Reads a floating-point CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address (`FFLAGS`, `FRM` or `FCSR`).
    ///
    /// # Returns
    ///
    /// The CSR value, or `None` if `addr` is not a floating-point CSR.
    pub fn csr_read(&self, addr: u32) -> Option<u64> {
        let fflags = u64::from(self.fflags.bits()) & FFLAGS_MASK;
        let frm = u64::from(self.frm) & FRM_MASK;
        match addr {
            FFLAGS => Some(fflags),
            FRM => Some(frm),
            FCSR => Some((frm << FCSR_FRM_SHIFT) | fflags),
            _ => None,
        }
    }

    /// Writes a floating-point CSR. Writes are masked to the field width and
    /// mark enabled FP state dirty.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address (`FFLAGS`, `FRM` or `FCSR`).
    /// * `val` - The value to write.
    ///
    /// # Returns
    ///
    /// `true` if `addr` named a floating-point CSR and the write happened.
    pub fn csr_write(&mut self, addr: u32, val: u64) -> bool {
        match addr {
            FFLAGS => self.fflags = FpFlags::from_bits_truncate((val & FFLAGS_MASK) as u8),
            FRM => self.frm = (val & FRM_MASK) as u8,
            FCSR => {
                self.fflags = FpFlags::from_bits_truncate((val & FFLAGS_MASK) as u8);
                self.frm = ((val >> FCSR_FRM_SHIFT) & FRM_MASK) as u8;
            }
            _ => return false,
        }
        self.mark_dirty();
        true
    }
}
