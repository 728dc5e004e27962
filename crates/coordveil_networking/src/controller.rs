//! # Spoof Controller
//!
//! The top-level context object. Owns the spoof state, hands the host its
//! interceptor and accessors, and is the only mutation path the control
//! surface has.
//!
//! ```text
//!   control ──► SpoofController ──► SpoofState ◄── SpoofInterceptor ◄── host network
//!                      │                 ▲
//!                      └─► accessor() ───┴──── PositionAccessor   ◄── host overlays
//! ```

use crate::integration::{
    InterceptStatsSnapshot, PositionAccessor, PositionSource, SpoofInterceptor,
};
use coordveil_core::{
    AxisPolicy, Jitter, SpoofConfig, SpoofMode, SpoofResult, SpoofSettings, SpoofState,
};
use coordveil_shared::Vec3d;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Status payload for the control surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpoofStatus {
    /// Passthrough or offset.
    pub mode: SpoofMode,
    /// Current displacement.
    pub offset: Vec3d,
    /// Authoritative axis policy.
    pub axis_policy: AxisPolicy,
    /// Display jitter, if on.
    pub jitter: Option<Jitter>,
    /// Settings generation.
    pub generation: u64,
    /// Interceptor counters.
    pub stats: InterceptStatsSnapshot,
}

/// Owns the spoofer for one game session.
#[derive(Debug)]
pub struct SpoofController {
    state: Arc<SpoofState>,
    interceptor: Arc<SpoofInterceptor>,
}

impl SpoofController {
    /// Creates a controller seeded with `settings`.
    ///
    /// # Errors
    ///
    /// Fails if the offset or jitter is invalid.
    pub fn new(settings: SpoofSettings) -> SpoofResult<Self> {
        let state = SpoofState::new(SpoofSettings::DEFAULT);
        state.replace(settings)?;
        let interceptor = Arc::new(SpoofInterceptor::new(Arc::clone(&state)));
        tracing::info!(
            mode = settings.mode.as_str(),
            offset = %settings.offset,
            "coordinate spoofer initialized"
        );
        Ok(Self { state, interceptor })
    }

    /// Creates a controller from a parsed config.
    ///
    /// # Errors
    ///
    /// As [`SpoofController::new`].
    pub fn from_config(config: &SpoofConfig) -> SpoofResult<Self> {
        config.validate()?;
        Self::new(config.settings())
    }

    /// Loads the config file in `dir` (defaults if absent) and creates a
    /// controller from it.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is invalid.
    pub fn load(dir: impl AsRef<Path>) -> SpoofResult<Self> {
        Self::from_config(&SpoofConfig::load_or_default(dir)?)
    }

    /// Shared state, for hosts that snapshot settings themselves.
    #[must_use]
    pub fn state(&self) -> &Arc<SpoofState> {
        &self.state
    }

    /// The interceptor to register with the host network layer.
    #[must_use]
    pub fn interceptor(&self) -> Arc<SpoofInterceptor> {
        Arc::clone(&self.interceptor)
    }

    /// A read-side accessor over `source`.
    #[must_use]
    pub fn accessor<P: PositionSource>(&self, source: P) -> PositionAccessor<P> {
        PositionAccessor::new(Arc::clone(&self.state), source)
    }

    /// Sets the mode. Returns `true` if it changed.
    pub fn set_mode(&self, mode: SpoofMode) -> bool {
        self.state.set_mode(mode)
    }

    /// Flips the mode (the key binding). Returns the new mode.
    pub fn toggle_mode(&self) -> SpoofMode {
        self.state.toggle_mode()
    }

    /// Sets the offset. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Rejects non-finite components.
    pub fn set_offset(&self, x: f64, y: f64, z: f64) -> SpoofResult<bool> {
        self.state.set_offset(x, y, z)
    }

    /// Sets the authoritative axis policy.
    pub fn set_axis_policy(&self, policy: AxisPolicy) -> bool {
        self.state.set_axis_policy(policy)
    }

    /// Sets or clears the display jitter.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite parameters.
    pub fn set_jitter(&self, jitter: Option<Jitter>) -> SpoofResult<bool> {
        self.state.set_jitter(jitter)
    }

    /// Applies a whole config at once.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the config is invalid.
    pub fn apply_config(&self, config: &SpoofConfig) -> SpoofResult<bool> {
        config.validate()?;
        self.state.replace(config.settings())
    }

    /// Current settings as a config, for the control panel to persist.
    #[must_use]
    pub fn current_config(&self) -> SpoofConfig {
        SpoofConfig::from(self.state.snapshot())
    }

    /// Status payload.
    #[must_use]
    pub fn status(&self) -> SpoofStatus {
        let generation = self.state.generation();
        let settings = self.state.snapshot();
        SpoofStatus {
            mode: settings.mode,
            offset: settings.offset,
            axis_policy: settings.axis_policy,
            jitter: settings.jitter,
            generation,
            stats: self.interceptor.stats(),
        }
    }
}

impl Default for SpoofController {
    fn default() -> Self {
        let state = SpoofState::new(SpoofSettings::DEFAULT);
        let interceptor = Arc::new(SpoofInterceptor::new(Arc::clone(&state)));
        Self { state, interceptor }
    }
}
