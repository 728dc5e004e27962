//! Optional cosmetic animation of the displayed position.
//!
//! Adds a slow sine drift to displayed x and z so a stream viewer cannot
//! read a stable number off the screen. Only the read-side accessor applies
//! it; packets never see jitter.

use crate::error::{SpoofError, SpoofResult};
use coordveil_shared::{DisplayedPosition, Vec3d};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sine drift parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jitter {
    /// Peak displacement in blocks.
    pub amplitude: f64,
    /// Angular rate in radians per millisecond.
    pub rate: f64,
}

impl Jitter {
    /// Subtle drift: 0.1 blocks peak, roughly a 6 second period.
    pub const SUBTLE: Self = Self { amplitude: 0.1, rate: 0.001 };

    /// Rejects negative or non-finite parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SpoofError::InvalidJitter`] when either parameter is
    /// negative, NaN or infinite.
    pub fn validate(&self) -> SpoofResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.amplitude) && ok(self.rate) {
            Ok(())
        } else {
            Err(SpoofError::InvalidJitter(format!(
                "amplitude={} rate={}",
                self.amplitude, self.rate
            )))
        }
    }

    /// Displacement after `elapsed` since the animation started.
    #[must_use]
    pub fn displacement(&self, elapsed: Duration) -> f64 {
        let millis = elapsed.as_secs_f64() * 1000.0;
        (millis * self.rate).sin() * self.amplitude
    }

    /// Applies the drift to x and z of a displayed sample. A component
    /// that would end up non-finite keeps its undrifted value.
    #[must_use]
    pub fn apply(&self, shown: DisplayedPosition, elapsed: Duration) -> DisplayedPosition {
        let d = self.displacement(elapsed);
        let drift = |v: f64| if (v + d).is_finite() { v + d } else { v };
        DisplayedPosition::from_vec(Vec3d::new(drift(shown.x()), shown.y(), drift(shown.z())))
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::SUBTLE
    }
}
