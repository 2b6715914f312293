//! RISC-V floating-point execution unit.
//!
//! This crate implements the F and D extension execution semantics of an RV64GC core:
//! 1. **Core:** The `fcsr`/`mstatus.FS` floating-point state and the FPU execution unit.
//! 2. **Arithmetic:** Add, subtract, multiply, divide, square root, min/max and the
//!    fused multiply-add family, bit-exact under all five rounding modes.
//! 3. **Compare/Convert/Classify:** FEQ/FLT/FLE, integer and cross-width conversions, FCLASS.
//! 4. **Configuration:** XLEN, FS gating and NaN policy, deserializable from JSON.
//!
//! IEEE-754 arithmetic is delegated to `rustc_apfloat`; this crate owns everything
//! RISC-V specific around it (rounding-mode encoding, `fflags` translation, NaN
//! canonicalization, classification and the illegal-instruction gate).

/// Common types (traps and configuration errors).
pub mod common;
/// Execution unit configuration (XLEN, gating, NaN policy).
pub mod config;
/// CPU-side floating-point state and the FPU execution unit.
pub mod core;

/// Root configuration type; use `FpuConfig::default()` or `FpuConfig::from_json`.
pub use crate::config::FpuConfig;
/// Per-hart floating-point state (`frm`, `fflags`, `mstatus.FS`).
pub use crate::core::arch::csr::FpState;
/// Floating-point execution unit.
pub use crate::core::units::fpu::Fpu;
