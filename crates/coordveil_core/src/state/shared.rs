//! The shared, read-mostly spoofer state.

use super::settings::{AxisPolicy, SpoofSettings};
use crate::error::{SpoofError, SpoofResult};
use crate::jitter::Jitter;
use crate::transform::SpoofMode;
use coordveil_shared::Vec3d;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide spoofer state, owned by the controller and shared by `Arc`.
///
/// ## Usage
///
/// ```rust
/// use coordveil_core::{SpoofMode, SpoofSettings, SpoofState};
///
/// let state = SpoofState::new(SpoofSettings::default());
/// state.set_offset(100.0, 0.0, 100.0).expect("finite offset");
/// state.set_mode(SpoofMode::Offset);
///
/// // Hooks snapshot once per message / frame.
/// let settings = state.snapshot();
/// assert!(settings.is_active());
/// ```
#[derive(Debug)]
pub struct SpoofState {
    /// Current settings. Writers are rare; readers copy out.
    settings: RwLock<SpoofSettings>,

    /// Bumped on every observable change.
    generation: AtomicU64,
}

impl SpoofState {
    /// Creates shared state seeded with `initial`.
    #[must_use]
    pub fn new(initial: SpoofSettings) -> Arc<Self> {
        Arc::new(Self {
            settings: RwLock::new(initial),
            generation: AtomicU64::new(0),
        })
    }

    /// Copy of the current settings.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> SpoofSettings {
        *self.settings.read()
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> SpoofMode {
        self.settings.read().mode
    }

    /// Current offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec3d {
        self.settings.read().offset
    }

    /// Number of observable changes since creation.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Sets the mode. Returns `true` if it changed.
    ///
    /// Setting the current mode again is a no-op: nothing observable
    /// changes and the generation stays put.
    pub fn set_mode(&self, mode: SpoofMode) -> bool {
        let changed = self.update(|s| s.mode = mode);
        if changed {
            tracing::info!(mode = mode.as_str(), "spoof mode changed");
        }
        changed
    }

    /// Flips between passthrough and offset. Returns the new mode.
    pub fn toggle_mode(&self) -> SpoofMode {
        let mut next = SpoofMode::Passthrough;
        self.update(|s| {
            s.mode = s.mode.toggled();
            next = s.mode;
        });
        tracing::info!(mode = next.as_str(), "spoof mode toggled");
        next
    }

    /// Sets the offset. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`SpoofError::NonFiniteOffset`] if any component is NaN or
    /// infinite; the previous offset stays in place.
    pub fn set_offset(&self, x: f64, y: f64, z: f64) -> SpoofResult<bool> {
        let offset = validate_offset(Vec3d::new(x, y, z))?;
        let changed = self.update(|s| s.offset = offset);
        if changed {
            tracing::info!(offset = %offset, "spoof offset changed");
            warn_on_unusual_offset(offset);
        }
        Ok(changed)
    }

    /// Sets the authoritative axis policy. Returns `true` if it changed.
    pub fn set_axis_policy(&self, policy: AxisPolicy) -> bool {
        let changed = self.update(|s| s.axis_policy = policy);
        if changed {
            match policy {
                AxisPolicy::Full => tracing::warn!(
                    "full-axis spoofing enabled; \
                     vertical rewrite of the player position is unverified"
                ),
                AxisPolicy::Horizontal => tracing::info!("horizontal-axis spoofing restored"),
            }
        }
        changed
    }

    /// Sets or clears the display jitter. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`SpoofError::InvalidJitter`] for negative or non-finite
    /// parameters.
    pub fn set_jitter(&self, jitter: Option<Jitter>) -> SpoofResult<bool> {
        if let Some(j) = &jitter {
            j.validate()?;
        }
        let changed = self.update(|s| s.jitter = jitter);
        if changed {
            tracing::info!(enabled = jitter.is_some(), "display jitter changed");
        }
        Ok(changed)
    }

    /// Replaces every setting at once. Returns `true` if anything changed.
    ///
    /// # Errors
    ///
    /// Fails without touching the state if the offset or jitter is invalid.
    pub fn replace(&self, settings: SpoofSettings) -> SpoofResult<bool> {
        validate_offset(settings.offset)?;
        if let Some(j) = &settings.jitter {
            j.validate()?;
        }
        let changed = self.update(|s| *s = settings);
        if changed {
            tracing::info!(
                mode = settings.mode.as_str(),
                offset = %settings.offset,
                axis_policy = settings.axis_policy.as_str(),
                "spoof settings replaced"
            );
            warn_on_unusual_offset(settings.offset);
        }
        Ok(changed)
    }

    /// Applies `f` under the write lock and bumps the generation if the
    /// settings ended up different.
    fn update(&self, f: impl FnOnce(&mut SpoofSettings)) -> bool {
        let mut guard = self.settings.write();
        let before = *guard;
        f(&mut *guard);
        let changed = *guard != before;
        if changed {
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        changed
    }
}

fn validate_offset(offset: Vec3d) -> SpoofResult<Vec3d> {
    for (axis, value) in [('x', offset.x), ('y', offset.y), ('z', offset.z)] {
        if !value.is_finite() {
            return Err(SpoofError::NonFiniteOffset { axis, value });
        }
    }
    Ok(offset)
}

fn warn_on_unusual_offset(offset: Vec3d) {
    if offset.y != 0.0 {
        tracing::warn!(
            y = offset.y,
            "non-zero vertical offset; only ancillary messages and the display shift y"
        );
    }
    if !offset.is_whole() {
        tracing::warn!(
            offset = %offset,
            "fractional offset; block positions shift by the whole-block part only"
        );
    }
}
