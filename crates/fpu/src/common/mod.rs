//! Common types shared across the floating-point unit.
//!
//! This module provides the error handling building blocks:
//! 1. **Traps:** The illegal-instruction trap raised by the FPU and its cause.
//! 2. **Configuration Errors:** Failures while loading an `FpuConfig`.

/// Error types and trap definitions.
pub mod error;

pub use error::{ConfigError, IllegalCause, Trap};
