//! # Unit Components
//!
//! Tests for each module of the floating-point unit, mirroring `src/`.
