//! Floating-Point Unit (FPU).
//!
//! This module implements the floating-point execution unit used in the
//! Execute stage. It handles single-precision (F) and double-precision (D)
//! operations, including fused multiply-add, comparisons, classification and
//! conversions between integer and floating-point formats.
//!
//! Every operation follows the same sequence:
//! 1. **Privilege gate:** `mstatus.FS == Off` makes the instruction illegal.
//! 2. **Rounding mode:** resolve the instruction's `rm` field (dynamic → `frm`).
//! 3. **Primitive:** clear the IEEE status, run the `rustc_apfloat` operation.
//! 4. **Flags:** translate the primitive's status and OR it into `fflags`.
//!
//! A trap returns early from step 1 or 2 with no state modified.
//!
//! Operations are organized into submodules:
//! - [`arith`]: add/sub/mul/div/sqrt, min/max, fused multiply-add, sign injection.
//! - [`compare`]: FEQ, FLT, FLE.
//! - [`convert`]: float ↔ integer and binary32 ↔ binary64 conversions.
//! - [`classify`]: FCLASS.
//! - [`nan_handling`]: NaN boxing/unboxing and canonical NaN propagation.
//! - [`rounding_modes`]: rounding mode decoding and resolution.
//! - [`exception_flags`]: `fflags` encoding and status translation.

/// Arithmetic, min/max, fused multiply-add and sign injection.
pub mod arith;

/// Classification (FCLASS).
pub mod classify;

/// Comparisons (FEQ, FLT, FLE).
pub mod compare;

/// Integer and cross-width conversions.
pub mod convert;

/// Floating-point exception flag types.
pub mod exception_flags;

/// Per-width format descriptors and the sign-flip primitive.
pub mod format;

/// Working state of the IEEE primitive.
pub mod ieee;

/// NaN boxing, unboxing, and canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;

/// Square root built on the IEEE primitive.
pub mod sqrt;

use rustc_apfloat::ieee::{Double, Quad, Single};
use rustc_apfloat::{Float, Round, Status, StatusAnd};

use crate::common::{IllegalCause, Trap};
use crate::config::{ClassifyPolicy, FpuConfig, NanPolicy};
use crate::core::arch::csr::FpState;

use self::classify::classify;
use self::exception_flags::drain_and_translate;
use self::format::FpFormat;
use self::nan_handling::{canonical_nan, silence};
use self::rounding_modes::resolve_rounding_mode;

/// Floating-point operation selector for [`Fpu::execute`].
///
/// The operand format is chosen separately by `is32`, except for the two
/// cross-width conversions whose formats are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpOp {
    /// FADD: `a + b`.
    FAdd,
    /// FSUB: `a - b`.
    FSub,
    /// FMUL: `a × b`.
    FMul,
    /// FDIV: `a / b`.
    FDiv,
    /// FSQRT: `√a`.
    FSqrt,
    /// FMIN: `minNum(a, b)`.
    FMin,
    /// FMAX: `maxNum(a, b)`.
    FMax,
    /// FMADD: `(a × b) + c`.
    FMAdd,
    /// FMSUB: `(a × b) - c`.
    FMSub,
    /// FNMSUB: `-(a × b) + c`.
    FNMSub,
    /// FNMADD: `-(a × b) - c`.
    FNMAdd,
    /// FSGNJ: magnitude of `a`, sign of `b`.
    FSgnj,
    /// FSGNJN: magnitude of `a`, inverted sign of `b`.
    FSgnjn,
    /// FSGNJX: magnitude of `a`, sign `a ^ b`.
    FSgnjx,
    /// FEQ: quiet equality, integer result.
    FEq,
    /// FLT: signaling less-than, integer result.
    FLt,
    /// FLE: signaling less-or-equal, integer result.
    FLe,
    /// FCLASS: one-hot classification mask, integer result.
    FClass,
    /// FCVT.W.fmt: float to signed 32-bit integer.
    FCvtW,
    /// FCVT.WU.fmt: float to unsigned 32-bit integer.
    FCvtWu,
    /// FCVT.L.fmt: float to signed 64-bit integer (RV64 only).
    FCvtL,
    /// FCVT.LU.fmt: float to unsigned 64-bit integer (RV64 only).
    FCvtLu,
    /// FCVT.fmt.W: signed 32-bit integer to float.
    FCvtFromW,
    /// FCVT.fmt.WU: unsigned 32-bit integer to float.
    FCvtFromWu,
    /// FCVT.fmt.L: signed 64-bit integer to float (RV64 only).
    FCvtFromL,
    /// FCVT.fmt.LU: unsigned 64-bit integer to float (RV64 only).
    FCvtFromLu,
    /// FCVT.S.D: binary64 to binary32.
    FCvtSD,
    /// FCVT.D.S: binary32 to binary64.
    FCvtDS,
}

/// Two-operand rounded operation, evaluable at any precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn eval<T: Float>(self, x: T, y: T, round: Round) -> StatusAnd<T> {
        match self {
            Self::Add => x.add_r(y, round),
            Self::Sub => x.sub_r(y, round),
            Self::Mul => x.mul_r(y, round),
            Self::Div => x.div_r(y, round),
        }
    }
}

/// Raises OF for a result the primitive clamped to the largest finite value.
///
/// When the rounding direction points toward zero for the result's sign, the
/// primitive returns ±largest with NX alone even if the exact result lies past
/// the format's range. `exact` re-evaluates the operation in binary128 rounding
/// toward zero; compared against `2^(emax + 1)` that decides overflow exactly.
fn settle_overflow<F: FpFormat>(state: &mut FpState, value: F, exact: impl FnOnce() -> Quad) {
    let status = state.env.status();
    if !status.contains(Status::INEXACT) || status.contains(Status::OVERFLOW) {
        return;
    }
    let fmt = F::FORMAT;
    if F::widen(value.to_raw()) & !fmt.sign_mask() != fmt.largest_finite() {
        return;
    }
    let bound = Quad::from_bits(fmt.overflow_bound_quad());
    let wide = exact();
    if wide >= bound || wide <= -bound {
        state.env.raise(Status::OVERFLOW);
    }
}

/// Floating-Point Unit (FPU) for floating-point operations.
///
/// Implements all RISC-V floating-point operations including arithmetic,
/// comparisons, conversions, and fused multiply-add operations from
/// the F (single-precision) and D (double-precision) extensions.
///
/// The unit holds only its configuration. All architectural state lives in
/// the [`FpState`] passed to each operation, so one `Fpu` can serve any
/// number of harts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpu {
    config: FpuConfig,
}

impl Fpu {
    /// Creates an execution unit with the given configuration.
    pub const fn new(config: FpuConfig) -> Self {
        Self { config }
    }

    /// Returns the unit's configuration.
    pub const fn config(&self) -> &FpuConfig {
        &self.config
    }

    /// Privilege gate: fails if floating-point is disabled.
    ///
    /// A no-op when the unit is configured `user_mode_only`, where `mstatus.FS`
    /// does not exist.
    ///
    /// # Returns
    ///
    /// `Trap::IllegalInstruction(FpDisabled)` when `mstatus.FS` is Off.
    pub fn check_fs_enabled(&self, state: &FpState) -> Result<(), Trap> {
        if self.config.user_mode_only || state.is_enabled() {
            return Ok(());
        }
        tracing::debug!("FP instruction with mstatus.FS = Off");
        Err(Trap::IllegalInstruction(IllegalCause::FpDisabled))
    }

    /// Fails unless the unit is attached to an RV64 hart.
    fn require_rv64(&self) -> Result<(), Trap> {
        if self.config.is_rv64() {
            Ok(())
        } else {
            tracing::debug!("RV64-only FP instruction on an RV32 hart");
            Err(Trap::IllegalInstruction(IllegalCause::UnsupportedXlen))
        }
    }

    /// Steps 1 and 2 plus the status reset for a rounding-dependent operation.
    fn begin_rounded(&self, state: &mut FpState, rm: u8) -> Result<Round, Trap> {
        self.check_fs_enabled(state)?;
        Self::prepare_rounding(state, rm)
    }

    /// As [`Self::begin_rounded`], for instructions that only exist on RV64.
    fn begin_rv64(&self, state: &mut FpState, rm: u8) -> Result<Round, Trap> {
        self.check_fs_enabled(state)?;
        self.require_rv64()?;
        Self::prepare_rounding(state, rm)
    }

    fn prepare_rounding(state: &mut FpState, rm: u8) -> Result<Round, Trap> {
        let mode = resolve_rounding_mode(state, rm)?;
        state.env.clear_status();
        Ok(mode.to_round())
    }

    /// The gate plus the status reset for an operation that ignores rounding.
    fn begin_unrounded(&self, state: &mut FpState) -> Result<(), Trap> {
        self.check_fs_enabled(state)?;
        state.env.clear_status();
        Ok(())
    }

    /// Applies the configured NaN policy to an arithmetic result.
    fn nan_result<F: FpFormat>(&self, value: F) -> F::Bits {
        if !value.is_nan() {
            return value.to_raw();
        }
        match self.config.nan_policy {
            NanPolicy::Canonical => canonical_nan::<F>(),
            NanPolicy::Propagate => silence::<F>(value.to_raw()),
        }
    }

    /// Shared body of the unary rounded operations.
    fn arith_1<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        rm: u8,
        f: fn(F, Round) -> StatusAnd<F>,
    ) -> Result<F::Bits, Trap> {
        let round = self.begin_rounded(state, rm)?;
        let value = state.env.apply(f(F::from_raw(a), round));
        drain_and_translate(state);
        Ok(self.nan_result(value))
    }

    /// Shared body of the binary rounded operations.
    fn arith_2<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        rm: u8,
        op: BinaryOp,
    ) -> Result<F::Bits, Trap> {
        let round = self.begin_rounded(state, rm)?;
        let (x, y) = (F::from_raw(a), F::from_raw(b));
        if x.is_signaling() || y.is_signaling() {
            state.env.raise(Status::INVALID_OP);
        }
        let value = state.env.apply(op.eval(x, y, round));
        settle_overflow(state, value, || op.eval(x.to_quad(), y.to_quad(), Round::TowardZero).value);
        drain_and_translate(state);
        Ok(self.nan_result(value))
    }

    /// Shared body of the fused multiply-add family. Operands arrive with
    /// their signs already flipped as the instruction requires.
    fn arith_3<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        c: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        let round = self.begin_rounded(state, rm)?;
        let (x, y, z) = (F::from_raw(a), F::from_raw(b), F::from_raw(c));
        if x.is_signaling() || y.is_signaling() || z.is_signaling() {
            state.env.raise(Status::INVALID_OP);
        }
        // ∞ × 0 is invalid even when the addend is a quiet NaN.
        if (x.is_infinite() && y.is_zero()) || (x.is_zero() && y.is_infinite()) {
            state.env.raise(Status::INVALID_OP);
        }
        let value = state.env.apply(x.mul_add_r(y, z, round));
        settle_overflow(state, value, || {
            x.to_quad().mul_add_r(y.to_quad(), z.to_quad(), Round::TowardZero).value
        });
        drain_and_translate(state);
        Ok(self.nan_result(value))
    }

    /// FCLASS: one-hot classification mask of `a`.
    ///
    /// Never touches `frm` or `fflags`. Subject to the privilege gate only
    /// under [`ClassifyPolicy::Gated`].
    pub fn fclass<F: FpFormat>(&self, state: &FpState, a: F::Bits) -> Result<u64, Trap> {
        if self.config.classify_policy == ClassifyPolicy::Gated {
            self.check_fs_enabled(state)?;
        }
        Ok(classify::<F>(a).mask())
    }

    /// Executes a floating-point operation on 64-bit register images.
    ///
    /// Binary32 operands are unboxed (an improperly NaN-boxed operand reads
    /// as the canonical NaN) and binary32 results are NaN-boxed. Integer
    /// sources of `FCvtFrom*` and integer results (compare, classify,
    /// `FCvtW*`/`FCvtL*`) are raw XLEN values.
    ///
    /// # Arguments
    ///
    /// * `state` - The hart's floating-point state.
    /// * `op`    - The operation to perform.
    /// * `a`     - First operand (`rs1`).
    /// * `b`     - Second operand (`rs2`).
    /// * `c`     - Third operand for FMA operations (`rs3`).
    /// * `rm`    - The instruction's 3-bit rounding mode field.
    /// * `is32`  - If true, perform single-precision operation. Ignored by
    ///   `FCvtSD` and `FCvtDS`.
    ///
    /// # Returns
    ///
    /// The 64-bit result, or the trap the instruction raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvsim_fpu::core::units::fpu::FpOp;
    /// use rvsim_fpu::core::units::fpu::nan_handling::box_f32;
    /// use rvsim_fpu::{FpState, Fpu};
    ///
    /// let fpu = Fpu::default();
    /// let mut state = FpState::new();
    ///
    /// // Single-precision addition with NaN boxing
    /// let a = box_f32(2.5_f32.to_bits());
    /// let b = box_f32(3.5_f32.to_bits());
    /// let result = fpu.execute(&mut state, FpOp::FAdd, a, b, 0, 0, true).unwrap();
    /// assert_eq!(result, box_f32(6.0_f32.to_bits()));
    ///
    /// // Double-precision multiplication
    /// let a = 2.0_f64.to_bits();
    /// let b = 3.5_f64.to_bits();
    /// let result = fpu.execute(&mut state, FpOp::FMul, a, b, 0, 0, false).unwrap();
    /// assert_eq!(f64::from_bits(result), 7.0);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn execute(
        &self,
        state: &mut FpState,
        op: FpOp,
        a: u64,
        b: u64,
        c: u64,
        rm: u8,
        is32: bool,
    ) -> Result<u64, Trap> {
        if is32 {
            self.execute_fmt::<Single>(state, op, [a, b, c], rm)
        } else {
            self.execute_fmt::<Double>(state, op, [a, b, c], rm)
        }
    }

    fn execute_fmt<F: FpFormat>(
        &self,
        state: &mut FpState,
        op: FpOp,
        regs: [u64; 3],
        rm: u8,
    ) -> Result<u64, Trap> {
        let [ra, rb, rc] = regs;
        let (a, b, c) = (F::unbox(ra), F::unbox(rb), F::unbox(rc));
        match op {
            FpOp::FAdd => self.fadd::<F>(state, a, b, rm).map(F::boxed),
            FpOp::FSub => self.fsub::<F>(state, a, b, rm).map(F::boxed),
            FpOp::FMul => self.fmul::<F>(state, a, b, rm).map(F::boxed),
            FpOp::FDiv => self.fdiv::<F>(state, a, b, rm).map(F::boxed),
            FpOp::FSqrt => self.fsqrt::<F>(state, a, rm).map(F::boxed),
            FpOp::FMin => self.fmin::<F>(state, a, b).map(F::boxed),
            FpOp::FMax => self.fmax::<F>(state, a, b).map(F::boxed),
            FpOp::FMAdd => self.fmadd::<F>(state, a, b, c, rm).map(F::boxed),
            FpOp::FMSub => self.fmsub::<F>(state, a, b, c, rm).map(F::boxed),
            FpOp::FNMSub => self.fnmsub::<F>(state, a, b, c, rm).map(F::boxed),
            FpOp::FNMAdd => self.fnmadd::<F>(state, a, b, c, rm).map(F::boxed),
            FpOp::FSgnj => self.fsgnj::<F>(state, a, b).map(F::boxed),
            FpOp::FSgnjn => self.fsgnjn::<F>(state, a, b).map(F::boxed),
            FpOp::FSgnjx => self.fsgnjx::<F>(state, a, b).map(F::boxed),
            FpOp::FEq => self.feq::<F>(state, a, b),
            FpOp::FLt => self.flt::<F>(state, a, b),
            FpOp::FLe => self.fle::<F>(state, a, b),
            FpOp::FClass => self.fclass::<F>(state, a),
            FpOp::FCvtW => self.fcvt_w::<F>(state, a, rm),
            FpOp::FCvtWu => self.fcvt_wu::<F>(state, a, rm),
            FpOp::FCvtL => self.fcvt_l::<F>(state, a, rm),
            FpOp::FCvtLu => self.fcvt_lu::<F>(state, a, rm),
            FpOp::FCvtFromW => self.fcvt_from_w::<F>(state, ra, rm).map(F::boxed),
            FpOp::FCvtFromWu => self.fcvt_from_wu::<F>(state, ra, rm).map(F::boxed),
            FpOp::FCvtFromL => self.fcvt_from_l::<F>(state, ra, rm).map(F::boxed),
            FpOp::FCvtFromLu => self.fcvt_from_lu::<F>(state, ra, rm).map(F::boxed),
            FpOp::FCvtSD => self.fcvt_s_d(state, Double::unbox(ra), rm).map(Single::boxed),
            FpOp::FCvtDS => self.fcvt_d_s(state, Single::unbox(ra), rm),
        }
    }
}
