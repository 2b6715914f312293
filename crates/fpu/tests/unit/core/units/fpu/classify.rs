//! # Classification Tests
//!
//! FCLASS masks for every class in both widths, and the gating policy.

use rstest::rstest;
use rustc_apfloat::ieee::{Double, Single};
use rvsim_fpu::common::{IllegalCause, Trap};
use rvsim_fpu::config::{ClassifyPolicy, FpuConfig};
use rvsim_fpu::core::arch::csr::FpState;
use rvsim_fpu::core::units::fpu::classify::{FClass, classify};
use rvsim_fpu::core::units::fpu::exception_flags::FpFlags;

use crate::common::harness::*;

#[rstest]
#[case(0xff80_0000, FClass::NegInfinity)]
#[case(0xbf80_0000, FClass::NegNormal)]
#[case(0x8000_0001, FClass::NegSubnormal)]
#[case(0x8000_0000, FClass::NegZero)]
#[case(0x0000_0000, FClass::PosZero)]
#[case(0x007f_ffff, FClass::PosSubnormal)]
#[case(0x7f7f_ffff, FClass::PosNormal)]
#[case(0x7f80_0000, FClass::PosInfinity)]
#[case(0x7f80_0001, FClass::SignalingNan)]
#[case(0xffc0_0000, FClass::QuietNan)]
fn test_classify_single(#[case] bits: u32, #[case] class: FClass) {
    assert_eq!(classify::<Single>(bits), class);
}

#[rstest]
#[case(0xfff0_0000_0000_0000, FClass::NegInfinity)]
#[case(0xc000_0000_0000_0000, FClass::NegNormal)]
#[case(0x800f_ffff_ffff_ffff, FClass::NegSubnormal)]
#[case(0x8000_0000_0000_0000, FClass::NegZero)]
#[case(0x0000_0000_0000_0000, FClass::PosZero)]
#[case(0x0000_0000_0000_0001, FClass::PosSubnormal)]
#[case(0x0010_0000_0000_0000, FClass::PosNormal)]
#[case(0x7ff0_0000_0000_0000, FClass::PosInfinity)]
#[case(0x7ff7_ffff_ffff_ffff, FClass::SignalingNan)]
#[case(0x7ff8_0000_0000_0000, FClass::QuietNan)]
fn test_classify_double(#[case] bits: u64, #[case] class: FClass) {
    assert_eq!(classify::<Double>(bits), class);
}

#[test]
fn test_fclass_mask_bits() {
    let mut h = FpuHarness::new();
    assert_eq!(h.fpu.fclass::<Single>(&h.state, 0xff80_0000), Ok(1 << 0));
    assert_eq!(h.fpu.fclass::<Single>(&h.state, s(1.0)), Ok(1 << 6));
    assert_eq!(h.fpu.fclass::<Double>(&h.state, QNAN_D), Ok(1 << 9));
    assert_eq!(h.fpu.fclass::<Double>(&h.state, SNAN_D), Ok(1 << 8));
    assert_eq!(h.flags(), FpFlags::NONE);

    // Classification never consults the rounding mode.
    h.state.frm = 5;
    assert_eq!(h.fpu.fclass::<Single>(&h.state, s(-0.0)), Ok(1 << 3));
}

#[test]
fn test_fclass_ungated_by_default() {
    let h = FpuHarness::disabled();
    assert_eq!(h.fpu.fclass::<Single>(&h.state, s(0.0)), Ok(1 << 4));
}

#[test]
fn test_fclass_gated_policy() {
    let mut h = FpuHarness::with_config(FpuConfig {
        classify_policy: ClassifyPolicy::Gated,
        ..FpuConfig::default()
    });
    assert_eq!(h.fpu.fclass::<Single>(&h.state, s(0.0)), Ok(1 << 4));

    h.state = FpState::disabled();
    assert_eq!(
        h.fpu.fclass::<Single>(&h.state, s(0.0)),
        Err(Trap::IllegalInstruction(IllegalCause::FpDisabled))
    );
}
