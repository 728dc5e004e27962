//! # Integration Traits
//!
//! The seams between the spoofer and the host engine.
//!
//! ```text
//! coordveil defines:          host implements:
//! ┌────────────────────┐      ┌────────────────────┐
//! │ trait PositionSource│ ←── │ impl PositionSource│
//! │ trait DisplaySurface│ ←── │ impl DisplaySurface│
//! └────────────────────┘      └────────────────────┘
//! ```

use crate::integration::accessor::DisplayFrame;
use crate::protocol::RewritableMessage;
use coordveil_shared::RealPosition;

// ============================================================================
// NETWORK LAYER - message interception
// ============================================================================

/// What an interceptor did to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterceptOutcome {
    /// Delivered as it arrived.
    Untouched,
    /// Coordinates rewritten in place.
    Rewritten,
    /// Rewrite failed or a host accessor panicked; delivered as it arrived.
    FailedOpen,
}

/// Called by the host on every message crossing the connection.
///
/// Neither method can fail. Whatever happens, the host must deliver the
/// message afterwards.
pub trait MessageInterceptor: Send + Sync {
    /// Server -> client, before the engine handles the message.
    fn on_receive(&self, msg: &mut dyn RewritableMessage) -> InterceptOutcome;

    /// Client -> server, before the message is encoded.
    fn on_send(&self, msg: &mut dyn RewritableMessage) -> InterceptOutcome;
}

// ============================================================================
// HOST ENGINE - position source
// ============================================================================

/// The host's authoritative position of the local player.
pub trait PositionSource: Send + Sync {
    /// Real position, or `None` while no world is loaded.
    fn real_position(&self) -> Option<RealPosition>;
}

impl<F> PositionSource for F
where
    F: Fn() -> Option<RealPosition> + Send + Sync,
{
    fn real_position(&self) -> Option<RealPosition> {
        self()
    }
}

// ============================================================================
// DISPLAY - overlays, HUD, other mods
// ============================================================================

/// Something that shows the player's position once per frame.
pub trait DisplaySurface {
    /// Presents one frame's worth of displayed coordinates.
    fn present(&mut self, frame: DisplayFrame);
}
