//! Snapshot of the spoofer configuration.

use crate::jitter::Jitter;
use crate::transform::{self, Axes, SpoofMode};
use coordveil_shared::{BlockPos, DisplayedPosition, RealPosition, Vec3d};
use serde::{Deserialize, Serialize};

/// Which axes the authoritative outbound position is restored on.
///
/// Vertical displacement interacts with gravity and collision, so the
/// default never touches y on the authoritative path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPolicy {
    /// x and z only.
    #[default]
    Horizontal,
    /// x, y and z. Unverified against fall physics.
    Full,
}

impl AxisPolicy {
    /// Axes the authoritative rewrite uses under this policy.
    #[must_use]
    pub const fn authoritative_axes(self) -> Axes {
        match self {
            Self::Horizontal => Axes::Horizontal,
            Self::Full => Axes::All,
        }
    }

    /// Lowercase name, as used in config and status payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Full => "full",
        }
    }
}

/// Copy of everything a hook needs to transform one message or one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpoofSettings {
    /// Passthrough or offset.
    pub mode: SpoofMode,
    /// Displacement subtracted from real coordinates.
    pub offset: Vec3d,
    /// Axes restored on the authoritative outbound position.
    pub axis_policy: AxisPolicy,
    /// Cosmetic display drift, off when `None`.
    pub jitter: Option<Jitter>,
}

impl SpoofSettings {
    /// Startup defaults: passthrough, zero offset, horizontal policy, no
    /// jitter.
    pub const DEFAULT: Self = Self {
        mode: SpoofMode::Passthrough,
        offset: Vec3d::ZERO,
        axis_policy: AxisPolicy::Horizontal,
        jitter: None,
    };

    /// Offset mode with the given displacement and default policy.
    #[must_use]
    pub const fn with_offset(offset: Vec3d) -> Self {
        Self {
            mode: SpoofMode::Offset,
            offset,
            ..Self::DEFAULT
        }
    }

    /// True when the transform is not the identity.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    /// Real -> displayed with these settings, on every axis.
    #[inline]
    #[must_use]
    pub fn to_displayed(&self, real: RealPosition) -> DisplayedPosition {
        transform::to_displayed(real, self.offset, self.mode)
    }

    /// Displayed -> real with these settings, on every axis.
    #[inline]
    #[must_use]
    pub fn to_real(&self, displayed: DisplayedPosition) -> RealPosition {
        transform::to_real(displayed, self.offset, self.mode)
    }

    /// Real block -> displayed block with these settings.
    #[inline]
    #[must_use]
    pub fn block_to_displayed(&self, real: BlockPos) -> BlockPos {
        transform::block_to_displayed(real, self.offset, self.mode, Axes::All)
    }

    /// Displayed block -> real block with these settings.
    #[inline]
    #[must_use]
    pub fn block_to_real(&self, displayed: BlockPos) -> BlockPos {
        transform::block_to_real(displayed, self.offset, self.mode, Axes::All)
    }
}

impl Default for SpoofSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_passthrough_at_origin() {
        let settings = SpoofSettings::default();
        assert!(!settings.is_active());
        assert!(settings.offset.is_zero());
        assert_eq!(settings.axis_policy, AxisPolicy::Horizontal);
        assert!(settings.jitter.is_none());
    }

    #[test]
    fn test_settings_transform_round_trip() {
        let settings = SpoofSettings::with_offset(Vec3d::new(100.0, 0.0, 100.0));
        let real = RealPosition::new(150.0, 64.0, 150.0);
        let shown = settings.to_displayed(real);
        assert_eq!(shown, DisplayedPosition::new(50.0, 64.0, 50.0));
        assert_eq!(settings.to_real(shown), real);
    }

    #[test]
    fn test_policy_axes() {
        assert_eq!(AxisPolicy::Horizontal.authoritative_axes(), Axes::Horizontal);
        assert_eq!(AxisPolicy::Full.authoritative_axes(), Axes::All);
    }
}
