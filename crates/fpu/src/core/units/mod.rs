//! Execution units and functional components.

/// Floating-Point Unit for IEEE 754 operations.
pub mod fpu;
