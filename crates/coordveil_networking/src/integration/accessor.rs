//! Read-side position interception.
//!
//! Overlays, HUD elements and other mods ask the accessor, never the
//! engine, for the player's position. Every read is computed fresh from
//! the host's real position and the current settings; nothing here reads
//! back a value a packet rewrite produced.

use super::traits::{DisplaySurface, PositionSource};
use coordveil_core::{SpoofSettings, SpoofState};
use coordveil_shared::{BlockPos, ChunkPos, DisplayedPosition, RealPosition};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything an overlay shows about the player's location.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DisplayFrame {
    /// Precise position, with jitter if enabled.
    pub position: DisplayedVec,
    /// Block the player stands in.
    pub block: BlockPos,
    /// Chunk column of that block.
    pub chunk: ChunkPos,
    /// Block position inside that chunk column, x and z in `0..=15`.
    pub local: (i32, i32, i32),
}

/// Serialisable mirror of a [`DisplayedPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DisplayedVec {
    /// X
    pub x: f64,
    /// Y
    pub y: f64,
    /// Z
    pub z: f64,
}

impl From<DisplayedPosition> for DisplayedVec {
    fn from(p: DisplayedPosition) -> Self {
        Self { x: p.x(), y: p.y(), z: p.z() }
    }
}

impl From<DisplayedVec> for DisplayedPosition {
    fn from(v: DisplayedVec) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Wraps the host position source with the spoof transform.
#[derive(Debug)]
pub struct PositionAccessor<P> {
    state: Arc<SpoofState>,
    source: P,
    started: Instant,
}

impl<P: PositionSource> PositionAccessor<P> {
    /// Creates an accessor over `source`.
    #[must_use]
    pub fn new(state: Arc<SpoofState>, source: P) -> Self {
        Self { state, source, started: Instant::now() }
    }

    /// The wrapped source.
    #[must_use]
    pub const fn source(&self) -> &P {
        &self.source
    }

    /// Displayed position right now.
    #[must_use]
    pub fn displayed_position(&self) -> DisplayedPosition {
        self.displayed_position_at(self.started.elapsed())
    }

    /// Displayed position `elapsed` after the accessor was created. Only
    /// the jitter depends on `elapsed`.
    #[must_use]
    pub fn displayed_position_at(&self, elapsed: Duration) -> DisplayedPosition {
        let settings = self.state.snapshot();
        let shown = settings.to_displayed(self.real_or_origin());
        match settings.jitter {
            Some(jitter) if settings.is_active() => jitter.apply(shown, elapsed),
            _ => shown,
        }
    }

    /// Displayed block position.
    ///
    /// Shifted the same way block messages are, so a block the overlay
    /// names is the block the world shows at that place.
    #[must_use]
    pub fn displayed_block_pos(&self) -> BlockPos {
        let settings = self.state.snapshot();
        displayed_block(&settings, self.real_or_origin())
    }

    /// Displayed chunk column.
    #[must_use]
    pub fn displayed_chunk(&self) -> ChunkPos {
        self.displayed_block_pos().chunk()
    }

    /// One consistent frame: position, block and chunk from a single
    /// settings snapshot and a single source read.
    #[must_use]
    pub fn frame(&self) -> DisplayFrame {
        self.frame_at(self.started.elapsed())
    }

    /// [`PositionAccessor::frame`] at a fixed animation time.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> DisplayFrame {
        let settings = self.state.snapshot();
        let real = self.real_or_origin();
        let mut shown = settings.to_displayed(real);
        if let Some(jitter) = settings.jitter.filter(|_| settings.is_active()) {
            shown = jitter.apply(shown, elapsed);
        }
        let block = displayed_block(&settings, real);
        DisplayFrame { position: shown.into(), block, chunk: block.chunk(), local: block.local() }
    }

    /// Hands the current frame to `surface`.
    pub fn present_to(&self, surface: &mut dyn DisplaySurface) {
        surface.present(self.frame());
    }

    /// No world loaded: report the transform of the origin so an overlay
    /// still never shows a real value.
    fn real_or_origin(&self) -> RealPosition {
        self.source.real_position().unwrap_or_default()
    }
}

fn displayed_block(settings: &SpoofSettings, real: RealPosition) -> BlockPos {
    settings.block_to_displayed(real.block())
}
