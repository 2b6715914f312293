//! RISC-V architecture-specific components.
//!
//! This module contains the floating-point slice of the architectural state:
//! the `fflags`, `frm` and `fcsr` CSRs and the `mstatus.FS` field.

/// Floating-point Control and Status Register definitions and state.
pub mod csr;
