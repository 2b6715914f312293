//! Working state of the IEEE-754 arithmetic primitive.
//!
//! `rustc_apfloat` is stateless: every call takes a rounding direction and
//! returns its exception status next to the value. [`IeeeEnv`] gives that
//! pair a home inside [`FpState`](crate::core::arch::csr::FpState) so that a
//! single instruction reads as: install the rounding mode, clear the status,
//! call the primitive, drain the status into `fflags`.

use std::fmt;

use rustc_apfloat::{Round, Status, StatusAnd};

use super::rounding_modes::RoundingMode;

/// Rounding direction and pending exception status of the IEEE primitive.
#[derive(Clone, Copy)]
pub struct IeeeEnv {
    rounding: RoundingMode,
    status: Status,
}

impl fmt::Debug for IeeeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IeeeEnv")
            .field("rounding", &self.rounding)
            .field("status", &format_args!("{:#07b}", self.status.bits()))
            .finish()
    }
}

impl PartialEq for IeeeEnv {
    fn eq(&self, other: &Self) -> bool {
        self.rounding == other.rounding && self.status.bits() == other.status.bits()
    }
}

impl Eq for IeeeEnv {}

impl Default for IeeeEnv {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::Rne,
            status: Status::OK,
        }
    }
}

impl IeeeEnv {
    /// Installs the rounding direction used by the next primitive call.
    #[inline]
    pub const fn set_rounding(&mut self, mode: RoundingMode) {
        self.rounding = mode;
    }

    /// Returns the installed rounding mode.
    #[inline]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Returns the installed rounding direction in the primitive's encoding.
    #[inline]
    pub const fn round(&self) -> Round {
        self.rounding.to_round()
    }

    /// Empties the pending status.
    #[inline]
    pub fn clear_status(&mut self) {
        self.status = Status::OK;
    }

    /// Adds `status` to the pending status.
    #[inline]
    pub fn raise(&mut self, status: Status) {
        self.status |= status;
    }

    /// Records the status of a primitive call and returns its value.
    #[inline]
    pub fn apply<T>(&mut self, result: StatusAnd<T>) -> T {
        self.raise(result.status);
        result.value
    }

    /// Returns the pending status, leaving it empty.
    #[inline]
    pub fn take_status(&mut self) -> Status {
        std::mem::replace(&mut self.status, Status::OK)
    }

    /// Returns the pending status without clearing it.
    #[inline]
    pub const fn status(&self) -> Status {
        self.status
    }
}
