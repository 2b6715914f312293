//! Conversions: FCVT between floating-point and integer, and between
//! binary32 and binary64.
//!
//! Float → integer (RISC-V spec §11.7):
//! - The value is rounded to an integer under the resolved rounding mode.
//! - Out-of-range values and ±∞ saturate to the destination's bound and raise
//!   NV only. A NaN converts as +∞.
//! - 32-bit results, signed or unsigned, are sign-extended to 64 bits.
//!
//! Integer → float rounds under the resolved mode and may raise NX only.
//!
//! binary64 → binary32 rounds and may raise OF, UF, NX; binary32 → binary64
//! is exact. A NaN result of either is quiet with its payload kept, and a
//! signaling NaN operand raises NV.

use rustc_apfloat::ieee::{Double, Single};
use rustc_apfloat::{FloatConvert, Round, Status, StatusAnd};

use crate::common::Trap;
use crate::core::arch::csr::FpState;

use super::{Fpu, settle_overflow};
use super::exception_flags::drain_and_translate;
use super::format::FpFormat;
use super::nan_handling::silence;

/// Integer destination of a float → integer conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct IntTarget {
    width: usize,
    signed: bool,
}

impl IntTarget {
    const W: Self = Self { width: 32, signed: true };
    const WU: Self = Self { width: 32, signed: false };
    const L: Self = Self { width: 64, signed: true };
    const LU: Self = Self { width: 64, signed: false };

    /// The bound an out-of-range value of the given sign saturates to.
    const fn saturate(self, negative: bool) -> i128 {
        match (self.signed, negative) {
            (true, true) => -(1 << (self.width - 1)),
            (true, false) => (1 << (self.width - 1)) - 1,
            (false, true) => 0,
            (false, false) => (1 << self.width) - 1,
        }
    }

    /// Writes an in-range integer as an XLEN register value.
    const fn to_register(self, value: i128) -> u64 {
        if self.width == 32 {
            value as u32 as i32 as i64 as u64
        } else {
            value as u64
        }
    }
}

impl Fpu {
    /// FCVT.W.fmt: float to signed 32-bit integer, sign-extended.
    pub fn fcvt_w<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, rm: u8) -> Result<u64, Trap> {
        self.float_to_int::<F>(state, a, rm, IntTarget::W)
    }

    /// FCVT.WU.fmt: float to unsigned 32-bit integer, sign-extended.
    pub fn fcvt_wu<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, rm: u8) -> Result<u64, Trap> {
        self.float_to_int::<F>(state, a, rm, IntTarget::WU)
    }

    /// FCVT.L.fmt: float to signed 64-bit integer. RV64 only.
    pub fn fcvt_l<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, rm: u8) -> Result<u64, Trap> {
        self.float_to_int::<F>(state, a, rm, IntTarget::L)
    }

    /// FCVT.LU.fmt: float to unsigned 64-bit integer. RV64 only.
    pub fn fcvt_lu<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, rm: u8) -> Result<u64, Trap> {
        self.float_to_int::<F>(state, a, rm, IntTarget::LU)
    }

    /// FCVT.fmt.W: the low 32 bits of `x` as a signed integer, to float.
    pub fn fcvt_from_w<F: FpFormat>(&self, state: &mut FpState, x: u64, rm: u8) -> Result<F::Bits, Trap> {
        self.int_to_float::<F>(state, rm, false, |round| F::from_i128_r(i128::from(x as i32), round))
    }

    /// FCVT.fmt.WU: the low 32 bits of `x` as an unsigned integer, to float.
    pub fn fcvt_from_wu<F: FpFormat>(&self, state: &mut FpState, x: u64, rm: u8) -> Result<F::Bits, Trap> {
        self.int_to_float::<F>(state, rm, false, |round| F::from_u128_r(u128::from(x as u32), round))
    }

    /// FCVT.fmt.L: `x` as a signed 64-bit integer, to float. RV64 only.
    pub fn fcvt_from_l<F: FpFormat>(&self, state: &mut FpState, x: u64, rm: u8) -> Result<F::Bits, Trap> {
        self.int_to_float::<F>(state, rm, true, |round| F::from_i128_r(i128::from(x as i64), round))
    }

    /// FCVT.fmt.LU: `x` as an unsigned 64-bit integer, to float. RV64 only.
    pub fn fcvt_from_lu<F: FpFormat>(&self, state: &mut FpState, x: u64, rm: u8) -> Result<F::Bits, Trap> {
        self.int_to_float::<F>(state, rm, true, |round| F::from_u128_r(u128::from(x), round))
    }

    /// FCVT.S.D: binary64 to binary32, rounded.
    pub fn fcvt_s_d(&self, state: &mut FpState, a: u64, rm: u8) -> Result<u32, Trap> {
        self.convert_width::<Double, Single>(state, a, rm)
    }

    /// FCVT.D.S: binary32 to binary64. Exact for every non-NaN operand.
    pub fn fcvt_d_s(&self, state: &mut FpState, a: u32, rm: u8) -> Result<u64, Trap> {
        self.convert_width::<Single, Double>(state, a, rm)
    }

    fn float_to_int<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        rm: u8,
        target: IntTarget,
    ) -> Result<u64, Trap> {
        let round = if target.width == 64 {
            self.begin_rv64(state, rm)?
        } else {
            self.begin_rounded(state, rm)?
        };
        let mut x = F::from_raw(a);
        if x.is_nan() {
            x = F::INFINITY;
        }
        let mut is_exact = false;
        let StatusAnd { status, value } = if target.signed {
            x.to_i128_r(target.width, round, &mut is_exact)
        } else {
            x.to_u128_r(target.width, round, &mut is_exact).map(|v| v as i128)
        };
        let value = if status.contains(Status::INVALID_OP) {
            state.env.raise(Status::INVALID_OP);
            target.saturate(x.is_negative())
        } else {
            state.env.raise(status);
            value
        };
        drain_and_translate(state);
        Ok(target.to_register(value))
    }

    fn int_to_float<F: FpFormat>(
        &self,
        state: &mut FpState,
        rm: u8,
        rv64_only: bool,
        convert: impl FnOnce(Round) -> StatusAnd<F>,
    ) -> Result<F::Bits, Trap> {
        let round = if rv64_only {
            self.begin_rv64(state, rm)?
        } else {
            self.begin_rounded(state, rm)?
        };
        let value = state.env.apply(convert(round));
        drain_and_translate(state);
        Ok(value.to_raw())
    }

    fn convert_width<S, T>(&self, state: &mut FpState, a: S::Bits, rm: u8) -> Result<T::Bits, Trap>
    where
        S: FpFormat + FloatConvert<T>,
        T: FpFormat,
    {
        let round = self.begin_rounded(state, rm)?;
        let mut x = S::from_raw(a);
        // Quiet first: narrowing can shift out every payload bit of an sNaN.
        if x.is_signaling() {
            state.env.raise(Status::INVALID_OP);
            x = S::from_raw(silence::<S>(a));
        }
        let mut loses_info = false;
        let value: T = state.env.apply(x.convert_r(round, &mut loses_info));
        settle_overflow(state, value, || x.to_quad());
        drain_and_translate(state);
        Ok(silence::<T>(value.to_raw()))
    }
}
