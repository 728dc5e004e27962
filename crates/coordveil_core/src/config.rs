//! # Spoofer Configuration
//!
//! Loaded once at mod start from a TOML file. Every field is optional and
//! falls back to the startup defaults.
//!
//! ```toml
//! mode = "offset"
//! axis_policy = "horizontal"
//!
//! [offset]
//! x = 100.0
//! z = 100.0
//!
//! [jitter]
//! amplitude = 0.1
//! ```
//!
//! Writing the file back is the control panel's job, not ours.

use crate::error::{SpoofError, SpoofResult};
use crate::jitter::Jitter;
use crate::state::{AxisPolicy, SpoofSettings};
use crate::transform::SpoofMode;
use coordveil_shared::{Vec3d, DEFAULT_CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Offset table. Missing axes default to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetConfig {
    /// X displacement
    pub x: f64,
    /// Y displacement (keep at zero unless you know why)
    pub y: f64,
    /// Z displacement
    pub z: f64,
}

impl From<OffsetConfig> for Vec3d {
    fn from(o: OffsetConfig) -> Self {
        Vec3d::new(o.x, o.y, o.z)
    }
}

impl From<Vec3d> for OffsetConfig {
    fn from(v: Vec3d) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// On-disk spoofer configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoofConfig {
    /// Passthrough or offset.
    pub mode: SpoofMode,
    /// Axes restored on the authoritative outbound position.
    pub axis_policy: AxisPolicy,
    /// Displacement subtracted from real coordinates.
    pub offset: OffsetConfig,
    /// Optional display drift.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter: Option<Jitter>,
}

impl SpoofConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// [`SpoofError::InvalidConfig`] for malformed TOML, or the validation
    /// error for out-of-range values.
    pub fn from_toml_str(text: &str) -> SpoofResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SpoofError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// [`SpoofError::Io`] if the file cannot be read, otherwise as
    /// [`SpoofConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SpoofResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SpoofError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), mode = config.mode.as_str(), "spoof config loaded");
        Ok(config)
    }

    /// Loads [`DEFAULT_CONFIG_FILE`] from `dir`, or returns the defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// As [`SpoofConfig::load`] when the file exists but is unreadable or
    /// invalid.
    pub fn load_or_default(dir: impl AsRef<Path>) -> SpoofResult<Self> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no spoof config; using defaults");
            Ok(Self::default())
        }
    }

    /// Renders the config as TOML.
    ///
    /// # Errors
    ///
    /// [`SpoofError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> SpoofResult<String> {
        toml::to_string(self).map_err(|e| SpoofError::InvalidConfig(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`SpoofError::NonFiniteOffset`] or [`SpoofError::InvalidJitter`].
    pub fn validate(&self) -> SpoofResult<()> {
        for (axis, value) in [('x', self.offset.x), ('y', self.offset.y), ('z', self.offset.z)] {
            if !value.is_finite() {
                return Err(SpoofError::NonFiniteOffset { axis, value });
            }
        }
        if let Some(jitter) = &self.jitter {
            jitter.validate()?;
        }
        Ok(())
    }

    /// Settings this config describes.
    #[must_use]
    pub fn settings(&self) -> SpoofSettings {
        SpoofSettings {
            mode: self.mode,
            offset: self.offset.into(),
            axis_policy: self.axis_policy,
            jitter: self.jitter,
        }
    }
}

impl From<SpoofSettings> for SpoofConfig {
    fn from(s: SpoofSettings) -> Self {
        Self {
            mode: s.mode,
            axis_policy: s.axis_policy,
            offset: s.offset.into(),
            jitter: s.jitter,
        }
    }
}
