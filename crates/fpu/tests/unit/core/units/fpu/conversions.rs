//! # Conversion Tests
//!
//! FCVT between floats and integers (rounding, saturation, sign extension)
//! and between binary32 and binary64.

use rstest::rstest;
use rustc_apfloat::ieee::{Double, Single};
use rvsim_fpu::common::{IllegalCause, Trap};
use rvsim_fpu::config::{FpuConfig, Xlen};
use rvsim_fpu::core::units::fpu::classify::{FClass, classify};
use rvsim_fpu::core::units::fpu::exception_flags::FpFlags;

use crate::common::harness::*;

fn rv32() -> FpuHarness {
    FpuHarness::with_config(FpuConfig {
        xlen: Xlen::Rv32,
        ..FpuConfig::default()
    })
}

#[rstest]
#[case(2.5, RNE, 2)]
#[case(2.5, RTZ, 2)]
#[case(2.5, RDN, 2)]
#[case(2.5, RUP, 3)]
#[case(2.5, RMM, 3)]
#[case(-2.5, RNE, -2)]
#[case(-2.5, RTZ, -2)]
#[case(-2.5, RDN, -3)]
#[case(-2.5, RUP, -2)]
#[case(-2.5, RMM, -3)]
fn test_fcvt_w_rounding(#[case] x: f32, #[case] rm: u8, #[case] expected: i64) {
    let mut h = FpuHarness::new();
    let r = h.fpu.fcvt_w::<Single>(&mut h.state, s(x), rm).unwrap();
    assert_eq!(r, expected as u64);
    assert_eq!(h.flags(), FpFlags::NX);
}

#[test]
fn test_fcvt_w_exact() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_w::<Double>(&mut h.state, d(-7.0), RNE).unwrap(), (-7_i64) as u64);
    assert_eq!(h.flags(), FpFlags::NONE);
}

#[rstest]
#[case(QNAN_S, 0x0000_0000_7fff_ffff)]
#[case(SNAN_S, 0x0000_0000_7fff_ffff)]
#[case(0x7f80_0000, 0x0000_0000_7fff_ffff)]
#[case(0xff80_0000, 0xffff_ffff_8000_0000)]
#[case(0x4f40_0000, 0x0000_0000_7fff_ffff)] // 1.5 × 2^31
#[case(0xcf40_0000, 0xffff_ffff_8000_0000)] // -1.5 × 2^31
fn test_fcvt_w_saturates(#[case] x: u32, #[case] expected: u64) {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_w::<Single>(&mut h.state, x, RNE).unwrap(), expected);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[test]
fn test_fcvt_wu() {
    let mut h = FpuHarness::new();
    // 32-bit unsigned results are sign-extended like every W result.
    let r = h.fpu.fcvt_wu::<Double>(&mut h.state, d(4_294_967_295.0), RNE).unwrap();
    assert_eq!(r, u64::MAX);
    assert_eq!(h.fpu.fcvt_wu::<Double>(&mut h.state, d(7.0), RNE).unwrap(), 7);
    assert_eq!(h.flags(), FpFlags::NONE);

    assert_eq!(h.fpu.fcvt_wu::<Single>(&mut h.state, s(-1.0), RNE).unwrap(), 0);
    assert_eq!(h.flags(), FpFlags::NV);

    h.clear_flags();
    assert_eq!(h.fpu.fcvt_wu::<Single>(&mut h.state, QNAN_S, RNE).unwrap(), u64::MAX);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[test]
fn test_fcvt_wu_small_negative_rounds_to_zero() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_wu::<Single>(&mut h.state, s(-0.5), RTZ).unwrap(), 0);
    assert_eq!(h.flags(), FpFlags::NX);
}

#[test]
fn test_fcvt_l_lu() {
    let mut h = FpuHarness::new();
    assert_eq!(
        h.fpu.fcvt_l::<Double>(&mut h.state, d(-4_000_000_000.0), RNE).unwrap(),
        (-4_000_000_000_i64) as u64
    );
    assert_eq!(
        h.fpu.fcvt_lu::<Double>(&mut h.state, d(9_007_199_254_740_992.0), RNE).unwrap(),
        9_007_199_254_740_992
    );
    assert_eq!(h.flags(), FpFlags::NONE);

    assert_eq!(h.fpu.fcvt_l::<Double>(&mut h.state, d(-1e19), RNE).unwrap(), i64::MIN as u64);
    assert_eq!(h.fpu.fcvt_l::<Single>(&mut h.state, QNAN_S, RNE).unwrap(), i64::MAX as u64);
    assert_eq!(h.fpu.fcvt_lu::<Double>(&mut h.state, d(18_446_744_073_709_551_616.0), RNE).unwrap(), u64::MAX);
    assert_eq!(h.fpu.fcvt_lu::<Double>(&mut h.state, d(-3.0), RNE).unwrap(), 0);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[rstest]
#[case(0xffff_ffff, 0xbf80_0000)] // -1
#[case(0x1234_5678_0000_0002, 0x4000_0000)] // upper half ignored
#[case(0, 0)]
fn test_fcvt_from_w(#[case] x: u64, #[case] expected: u32) {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_from_w::<Single>(&mut h.state, x, RNE).unwrap(), expected);
    assert_eq!(h.flags(), FpFlags::NONE);
}

#[rstest]
#[case(RNE, 0x4b80_0000)]
#[case(RTZ, 0x4b80_0000)]
#[case(RUP, 0x4b80_0001)]
fn test_fcvt_from_w_rounds(#[case] rm: u8, #[case] expected: u32) {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_from_w::<Single>(&mut h.state, 16_777_217, rm).unwrap(), expected);
    assert_eq!(h.flags(), FpFlags::NX);
}

#[test]
fn test_fcvt_from_wu_and_lu() {
    let mut h = FpuHarness::new();
    assert_eq!(
        h.fpu.fcvt_from_wu::<Double>(&mut h.state, 0xffff_ffff, RNE).unwrap(),
        d(4_294_967_295.0)
    );
    assert_eq!(h.flags(), FpFlags::NONE);

    assert_eq!(h.fpu.fcvt_from_lu::<Single>(&mut h.state, u64::MAX, RNE).unwrap(), 0x5f80_0000);
    assert_eq!(h.fpu.fcvt_from_lu::<Single>(&mut h.state, u64::MAX, RTZ).unwrap(), 0x5f7f_ffff);
    assert_eq!(h.fpu.fcvt_from_l::<Double>(&mut h.state, i64::MAX as u64, RNE).unwrap(), d(9_223_372_036_854_775_808.0));
    assert_eq!(h.fpu.fcvt_from_l::<Double>(&mut h.state, (-2_i64) as u64, RNE).unwrap(), d(-2.0));
    assert_eq!(h.flags(), FpFlags::NX);
}

#[test]
fn test_doubleword_conversions_require_rv64() {
    let mut h = rv32();
    let trap = Trap::IllegalInstruction(IllegalCause::UnsupportedXlen);
    assert_eq!(h.fpu.fcvt_l::<Double>(&mut h.state, d(1.0), RNE), Err::<u64, _>(trap));
    assert_eq!(h.fpu.fcvt_lu::<Single>(&mut h.state, s(1.0), RNE), Err::<u64, _>(trap));
    assert_eq!(h.fpu.fcvt_from_l::<Double>(&mut h.state, 1, RNE), Err::<u64, _>(trap));
    assert_eq!(h.fpu.fcvt_from_lu::<Single>(&mut h.state, 1, RNE), Err::<u32, _>(trap));
    assert_eq!(h.flags(), FpFlags::NONE);

    // Word forms are fine on RV32.
    assert_eq!(h.fpu.fcvt_w::<Double>(&mut h.state, d(1.0), RNE), Ok(1));
}

#[test]
fn test_narrowing() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(1.5), RNE).unwrap(), s(1.5));
    assert_eq!(h.flags(), FpFlags::NONE);

    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(1.0 / 3.0), RNE).unwrap(), 0x3eaa_aaab);
    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(1.0 / 3.0), RTZ).unwrap(), 0x3eaa_aaaa);
    assert_eq!(h.flags(), FpFlags::NX);
}

#[rstest]
#[case(RNE, f64::MAX, 0x7f80_0000)]
#[case(RTZ, f64::MAX, 0x7f7f_ffff)]
#[case(RDN, f64::MAX, 0x7f7f_ffff)]
#[case(RUP, f64::MAX, 0x7f80_0000)]
#[case(RMM, f64::MAX, 0x7f80_0000)]
#[case(RTZ, -f64::MAX, 0xff7f_ffff)]
#[case(RDN, -f64::MAX, 0xff80_0000)]
#[case(RUP, -f64::MAX, 0xff7f_ffff)]
#[case(RTZ, f64::from_bits(0x47f0_0000_0000_0000), 0x7f7f_ffff)]
#[case(RUP, f64::from_bits(0xc7f0_0000_0000_0000), 0xff7f_ffff)]
fn test_narrowing_overflow(#[case] rm: u8, #[case] x: f64, #[case] expected: u32) {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(x), rm).unwrap(), expected);
    assert_eq!(h.flags(), FpFlags::OF | FpFlags::NX);
}

#[rstest]
#[case(RNE)]
#[case(RTZ)]
#[case(RDN)]
fn test_narrowing_just_above_largest_is_not_overflow(#[case] rm: u8) {
    // f32::MAX + 2^100: past the largest binary32 but short of 2^128, and
    // under half an ulp (2^103) above it.
    let x = f64::from(f32::MAX) + 2.0_f64.powi(100);
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(x), rm).unwrap(), s(f32::MAX));
    assert_eq!(h.flags(), FpFlags::NX);
}

#[test]
fn test_narrowing_underflow() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_s_d(&mut h.state, d(1e-50), RNE).unwrap(), 0);
    assert_eq!(h.flags(), FpFlags::UF | FpFlags::NX);
}

#[test]
fn test_widening_is_exact() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fcvt_d_s(&mut h.state, s(0.1), RNE).unwrap(), d(f64::from(0.1_f32)));
    assert_eq!(h.fpu.fcvt_d_s(&mut h.state, 0x0000_0001, RNE).unwrap(), d(f64::from(f32::from_bits(1))));
    assert_eq!(h.flags(), FpFlags::NONE);
}

#[test]
fn test_width_conversion_silences_snan() {
    let mut h = FpuHarness::new();
    let r = h.fpu.fcvt_d_s(&mut h.state, SNAN_S, RNE).unwrap();
    assert_eq!(classify::<Double>(r), FClass::QuietNan);
    assert_eq!(h.flags(), FpFlags::NV);

    h.clear_flags();
    let r = h.fpu.fcvt_s_d(&mut h.state, SNAN_D, RNE).unwrap();
    assert_eq!(classify::<Single>(r), FClass::QuietNan);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[test]
fn test_width_conversion_of_qnan_is_quiet() {
    let mut h = FpuHarness::new();
    let r = h.fpu.fcvt_s_d(&mut h.state, QNAN_D, RNE).unwrap();
    assert_eq!(classify::<Single>(r), FClass::QuietNan);
    assert_eq!(h.flags(), FpFlags::NONE);
}
