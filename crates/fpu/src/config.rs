//! Configuration for the floating-point execution unit.
//!
//! This module defines the knobs that differ between the systems the unit is
//! embedded in. It provides:
//! 1. **Defaults:** RV64, FS gating enabled, ungated FCLASS, canonical NaNs.
//! 2. **Structures:** `FpuConfig`, fixed for the lifetime of an `Fpu`.
//! 3. **Enums:** XLEN, FCLASS gating policy and NaN result policy.
//!
//! Configuration is supplied as JSON (`FpuConfig::from_json`) or built with `FpuConfig::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the execution unit.
mod defaults {
    /// Whether the unit runs in a single-context, user-mode-only system where
    /// `mstatus.FS` does not exist and FP is always enabled.
    pub const USER_MODE_ONLY: bool = false;
}

/// Integer register width of the hart the unit is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Xlen {
    /// 32-bit integer registers; doubleword conversions are illegal.
    #[serde(alias = "RV32", alias = "32")]
    Rv32,
    /// 64-bit integer registers.
    #[default]
    #[serde(alias = "RV64", alias = "64")]
    Rv64,
}

/// Whether `FCLASS` is subject to the `mstatus.FS` gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ClassifyPolicy {
    /// Classification is a pure function of the operand and never traps.
    #[default]
    Ungated,
    /// Classification traps like every other FP instruction when FS is Off.
    Gated,
}

/// What an arithmetic operation returns when its result is a NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NanPolicy {
    /// Replace every NaN result with the RISC-V canonical quiet NaN.
    #[default]
    Canonical,
    /// Return the quieted NaN produced by the IEEE primitive, payload included.
    Propagate,
}

/// Floating-point execution unit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FpuConfig {
    /// Integer register width
    #[serde(default)]
    pub xlen: Xlen,

    /// Skip the `mstatus.FS` gate entirely (single-context systems)
    #[serde(default = "FpuConfig::default_user_mode_only")]
    pub user_mode_only: bool,

    /// Gating policy for FCLASS
    #[serde(default)]
    pub classify_policy: ClassifyPolicy,

    /// NaN result policy for arithmetic
    #[serde(default)]
    pub nan_policy: NanPolicy,
}

impl FpuConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `ConfigError::Parse` when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(?config, "loaded FPU configuration");
        Ok(config)
    }

    /// Returns whether the unit is attached to an RV64 hart.
    pub const fn is_rv64(&self) -> bool {
        matches!(self.xlen, Xlen::Rv64)
    }

    /// Returns the default value of `user_mode_only`.
    const fn default_user_mode_only() -> bool {
        defaults::USER_MODE_ONLY
    }
}

impl Default for FpuConfig {
    /// Creates the configuration of a full-system RV64 hart.
    fn default() -> Self {
        Self {
            xlen: Xlen::default(),
            user_mode_only: defaults::USER_MODE_ONLY,
            classify_policy: ClassifyPolicy::default(),
            nan_policy: NanPolicy::default(),
        }
    }
}
