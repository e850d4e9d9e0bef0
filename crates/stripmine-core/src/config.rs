//! Engine configuration.
//!
//! Defaults are merged with `stripmine.toml` (if present) and then with
//! `STRIPMINE_`-prefixed environment variables, so a deployment can pin the
//! vector capacity or force the scalar path without recompiling.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::unit::{VectorUnit, DEFAULT_GROUP};

/// Tunables for the strip-mining engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit register capacity in bytes; `None` means runtime detection.
    pub vlen_bytes: Option<usize>,
    /// Register-grouping factor per operation.
    pub group: usize,
    /// Skip SIMD detection and size the unit for the scalar fallback.
    pub force_scalar: bool,
    /// Default absolute comparison tolerance for float kernels.
    pub abs_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vlen_bytes: None,
            group: DEFAULT_GROUP,
            force_scalar: false,
            abs_tolerance: 1e-3,
        }
    }
}

impl EngineConfig {
    /// Loads configuration: defaults ← `stripmine.toml` ← `STRIPMINE_*` env.
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file("stripmine.toml"))
                .merge(Env::prefixed("STRIPMINE_")),
        )
    }

    /// Extracts a config from an explicit figment (used by tests).
    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Builds the vector unit this configuration describes.
    pub fn vector_unit(&self) -> Result<VectorUnit> {
        let unit = match (self.force_scalar, self.vlen_bytes) {
            // An explicit capacity wins over detection either way; forcing
            // scalar only changes the default capacity source.
            (_, Some(bytes)) => VectorUnit::with_vlen_bytes(bytes)?,
            (true, None) => VectorUnit::with_vlen_bytes(16)?,
            (false, None) => VectorUnit::detect(),
        };
        unit.with_group(self.group)
    }
}
