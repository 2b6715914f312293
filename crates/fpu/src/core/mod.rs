//! Core floating-point implementation.
//!
//! This module contains the architectural floating-point state owned by a hart
//! and the execution unit that operates on it.

/// Architecture-specific components (floating-point CSRs and `mstatus.FS`).
pub mod arch;

/// Execution units (the floating-point unit).
pub mod units;

pub use self::units::fpu::Fpu;
