//! Arithmetic operations: FADD, FSUB, FMUL, FDIV, FSQRT, FMIN, FMAX, the
//! fused multiply-add family and sign injection.
//!
//! All rounded operations are a single call into the IEEE primitive under
//! the resolved rounding mode. The negated forms of the fused multiply-add
//! flip operand signs on the raw encoding before that single call, so the
//! product and the sum are rounded once (RISC-V spec §11.6).

use rustc_apfloat::Status;

use crate::common::Trap;
use crate::core::arch::csr::FpState;

use super::{BinaryOp, Fpu};
use super::exception_flags::drain_and_translate;
use super::format::{FpFormat, flip_sign};
use super::nan_handling;
use super::sqrt::sqrt_r;

impl Fpu {
    /// FADD: `a + b`, rounded.
    pub fn fadd<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_2::<F>(state, a, b, rm, BinaryOp::Add)
    }

    /// FSUB: `a - b`, rounded.
    pub fn fsub<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_2::<F>(state, a, b, rm, BinaryOp::Sub)
    }

    /// FMUL: `a × b`, rounded.
    pub fn fmul<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_2::<F>(state, a, b, rm, BinaryOp::Mul)
    }

    /// FDIV: `a / b`, rounded. A finite non-zero dividend over zero raises DZ;
    /// `0 / 0` and `∞ / ∞` raise NV.
    pub fn fdiv<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_2::<F>(state, a, b, rm, BinaryOp::Div)
    }

    /// FSQRT: `√a`, correctly rounded.
    pub fn fsqrt<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, rm: u8) -> Result<F::Bits, Trap> {
        self.arith_1::<F>(state, a, rm, sqrt_r::<F>)
    }

    /// FMIN: IEEE 754-2008 `minNum`. Does not consult the rounding mode.
    pub fn fmin<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<F::Bits, Trap> {
        self.min_max::<F>(state, a, b, nan_handling::fmin::<F>)
    }

    /// FMAX: IEEE 754-2008 `maxNum`. Does not consult the rounding mode.
    pub fn fmax<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<F::Bits, Trap> {
        self.min_max::<F>(state, a, b, nan_handling::fmax::<F>)
    }

    fn min_max<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        select: fn(F::Bits, F::Bits) -> F::Bits,
    ) -> Result<F::Bits, Trap> {
        self.begin_unrounded(state)?;
        if F::from_raw(a).is_signaling() || F::from_raw(b).is_signaling() {
            state.env.raise(Status::INVALID_OP);
        }
        let result = select(a, b);
        drain_and_translate(state);
        Ok(result)
    }

    /// FMADD: `(a × b) + c` with a single rounding.
    pub fn fmadd<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        c: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_3::<F>(state, a, b, c, rm)
    }

    /// FMSUB: `(a × b) - c`, computed as `(a × b) + flip(c)`.
    pub fn fmsub<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        c: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_3::<F>(state, a, b, flip_sign::<F>(c), rm)
    }

    /// FNMSUB: `-(a × b) + c`, computed as `(flip(a) × b) + c`.
    pub fn fnmsub<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        c: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_3::<F>(state, flip_sign::<F>(a), b, c, rm)
    }

    /// FNMADD: `-(a × b) - c`, computed as `(flip(a) × b) + flip(c)`.
    pub fn fnmadd<F: FpFormat>(
        &self,
        state: &mut FpState,
        a: F::Bits,
        b: F::Bits,
        c: F::Bits,
        rm: u8,
    ) -> Result<F::Bits, Trap> {
        self.arith_3::<F>(state, flip_sign::<F>(a), b, flip_sign::<F>(c), rm)
    }

    /// FSGNJ: magnitude of `a` with the sign of `b`.
    pub fn fsgnj<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<F::Bits, Trap> {
        self.sign_inject::<F>(state, a, b, |_, sb| sb)
    }

    /// FSGNJN: magnitude of `a` with the inverted sign of `b`.
    pub fn fsgnjn<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<F::Bits, Trap> {
        self.sign_inject::<F>(state, a, b, |_, sb| !sb)
    }

    /// FSGNJX: magnitude of `a` with the XOR of both signs.
    pub fn fsgnjx<F: FpFormat>(&self, state: &mut FpState, a: F::Bits, b: F::Bits) -> Result<F::Bits, Trap> {
        self.sign_inject::<F>(state, a, b, |sa, sb| sa ^ sb)
    }

    // Touches only the sign bit, so it never rounds or raises flags.
    fn sign_inject<F: FpFormat>(
        &self,
        state: &FpState,
        a: F::Bits,
        b: F::Bits,
        sign: fn(bool, bool) -> bool,
    ) -> Result<F::Bits, Trap> {
        self.check_fs_enabled(state)?;
        let fmt = F::FORMAT;
        let (ra, rb) = (F::widen(a), F::widen(b));
        let magnitude = ra & !fmt.sign_mask();
        let negative = sign(fmt.sign(ra), fmt.sign(rb));
        let result = if negative { magnitude | fmt.sign_mask() } else { magnitude };
        Ok(F::narrow(result))
    }
}
