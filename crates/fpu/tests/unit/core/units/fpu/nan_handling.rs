//! # NaN Handling Tests
//!
//! NaN boxing of binary32 values in 64-bit registers and the NaN result
//! policy of arithmetic operations.

use rustc_apfloat::ieee::{Double, Single};
use rvsim_fpu::config::{FpuConfig, NanPolicy};
use rvsim_fpu::core::units::fpu::FpOp;
use rvsim_fpu::core::units::fpu::exception_flags::FpFlags;
use rvsim_fpu::core::units::fpu::nan_handling::{box_f32, canonical_nan, is_boxed, silence, unbox_f32};

use crate::common::harness::*;

fn propagating() -> FpuHarness {
    FpuHarness::with_config(FpuConfig {
        nan_policy: NanPolicy::Propagate,
        ..FpuConfig::default()
    })
}

#[test]
fn test_box_and_unbox() {
    let reg = box_f32(s(1.0));
    assert_eq!(reg, 0xffff_ffff_3f80_0000);
    assert!(is_boxed(reg));
    assert_eq!(unbox_f32(reg), s(1.0));
}

#[test]
fn test_improperly_boxed_reads_as_canonical_nan() {
    for reg in [0x0000_0000_3f80_0000, 0xffff_fffe_3f80_0000, 0x7fff_ffff_0000_0000] {
        assert!(!is_boxed(reg));
        assert_eq!(unbox_f32(reg), QNAN_S);
    }
}

#[test]
fn test_canonical_nans() {
    assert_eq!(canonical_nan::<Single>(), QNAN_S);
    assert_eq!(canonical_nan::<Double>(), QNAN_D);
}

#[test]
fn test_silence_sets_quiet_bit_only() {
    assert_eq!(silence::<Single>(SNAN_S), 0x7fc0_0001);
    assert_eq!(silence::<Double>(SNAN_D), 0x7ff8_0000_0000_0001);
    assert_eq!(silence::<Single>(0xffc0_0005), 0xffc0_0005);
}

#[test]
fn test_unboxed_operand_is_quiet_nan_without_nv() {
    let mut h = FpuHarness::new();
    let r = h
        .fpu
        .execute(&mut h.state, FpOp::FAdd, u64::from(s(1.0)), box_f32(s(2.0)), 0, RNE, true)
        .unwrap();
    assert_eq!(r, box_f32(QNAN_S));
    assert_eq!(h.flags(), FpFlags::NONE);
}

#[test]
fn test_unboxed_operand_to_min_yields_other_operand() {
    let mut h = FpuHarness::new();
    let r = h
        .fpu
        .execute(&mut h.state, FpOp::FMin, 0, box_f32(s(2.0)), 0, RNE, true)
        .unwrap();
    assert_eq!(r, box_f32(s(2.0)));
}

#[test]
fn test_single_results_are_boxed() {
    let mut h = FpuHarness::new();
    for op in [FpOp::FAdd, FpOp::FMul, FpOp::FSgnj, FpOp::FMax] {
        let r = h
            .fpu
            .execute(&mut h.state, op, box_f32(s(1.0)), box_f32(s(1.0)), 0, RNE, true)
            .unwrap();
        assert!(is_boxed(r), "{op:?} result {r:#018x}");
    }
}

#[test]
fn test_canonical_policy_drops_payload() {
    let mut h = FpuHarness::new();
    let r = h.fpu.fadd::<Single>(&mut h.state, 0x7fc0_0001, s(1.0), RNE).unwrap();
    assert_eq!(r, QNAN_S);
    let r = h.fpu.fmul::<Double>(&mut h.state, 0xfff8_0000_0000_0042, d(1.0), RNE).unwrap();
    assert_eq!(r, QNAN_D);
}

#[test]
fn test_propagate_policy_keeps_quiet_payload() {
    let mut h = propagating();
    let r = h.fpu.fadd::<Single>(&mut h.state, 0x7fc0_0001, s(1.0), RNE).unwrap();
    assert_eq!(r, 0x7fc0_0001);
    assert_eq!(h.flags(), FpFlags::NONE);
}

#[test]
fn test_propagate_policy_quiets_snan() {
    let mut h = propagating();
    let r = h.fpu.fadd::<Single>(&mut h.state, SNAN_S, s(1.0), RNE).unwrap();
    assert_eq!(r, 0x7fc0_0001);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[test]
fn test_propagate_policy_invalid_result_is_quiet() {
    let mut h = propagating();
    let r = h.fpu.fdiv::<Double>(&mut h.state, d(0.0), d(0.0), RNE).unwrap();
    assert!(f64::from_bits(r).is_nan());
    assert_ne!(r & 0x0008_0000_0000_0000, 0);
    assert_eq!(h.flags(), FpFlags::NV);
}

#[test]
fn test_sign_injection_ignores_nan_policy() {
    let mut h = FpuHarness::new();
    let r = h.fpu.fsgnjn::<Single>(&mut h.state, SNAN_S, s(1.0)).unwrap();
    assert_eq!(r, 0xff80_0001);
    assert_eq!(h.flags(), FpFlags::NONE);
}
