//! Comparisons: FEQ, FLT, FLE.
//!
//! Results are integers (1 or 0) written to an X register. FEQ is a quiet
//! comparison and raises NV only for signaling NaN operands; FLT and FLE are
//! signaling comparisons and raise NV for any NaN operand (RISC-V spec §11.8).
//! Any NaN operand makes the result 0. None of them consult the rounding mode.

use std::cmp::Ordering;

use rustc_apfloat::Status;

use crate::common::Trap;
use crate::core::arch::csr::FpState;

use super::Fpu;
use super::exception_flags::drain_and_translate;
use super::format::FpFormat;

/// NaN sensitivity of a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Signaling {
    Quiet,
    Any,
}

impl Fpu {
    /// FEQ: `a == b`, quiet.
    pub fn feq<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<u64, Trap> {
        self.compare::<F>(state, a, b, Signaling::Quiet, |ord| ord == Ordering::Equal)
    }

    /// FLT: `a < b`, signaling.
    pub fn flt<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<u64, Trap> {
        self.compare::<F>(state, a, b, Signaling::Any, |ord| ord == Ordering::Less)
    }

    /// FLE: `a <= b`, signaling.
    pub fn fle<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<u64, Trap> {
        self.compare::<F>(state, a, b, Signaling::Any, |ord| ord != Ordering::Greater)
    }

    fn compare<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        signaling: Signaling,
        holds: fn(Ordering) -> bool,
    ) -> Result<u64, Trap> {
        self.begin_unrounded(state)?;
        let (x, y) = (F::from_raw(a), F::from_raw(b));
        let invalid = match signaling {
            Signaling::Quiet => x.is_signaling() || y.is_signaling(),
            Signaling::Any => x.is_nan() || y.is_nan(),
        };
        if invalid {
            state.env.raise(Status::INVALID_OP);
        }
        // partial_cmp is None for any NaN and treats -0 == +0.
        let result = x.partial_cmp(&y).is_some_and(holds);
        drain_and_translate(state);
        Ok(u64::from(result))
    }
}
