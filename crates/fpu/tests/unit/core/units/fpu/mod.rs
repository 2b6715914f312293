//! Floating-point unit tests.


/// FCLASS and its gating policy.
pub mod classify;


/// Float ↔ integer and cross-width conversions.
pub mod conversions;




/// NaN boxing and NaN result policy.
pub mod nan_handling;
