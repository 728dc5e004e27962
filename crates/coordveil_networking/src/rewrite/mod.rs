//! # Classifier & Rewriter
//!
//! Decides, per message, whether its coordinates are shifted and which
//! way, then writes the shifted value back in place.
//!
//! ```text
//!                   ┌─ Passthrough ──────────────────────► untouched
//! message ─► mode ──┤
//!                   └─ Offset ─► layout(kind) ─┬─ None ──► untouched
//!                                              └─ Some ─► direction ok?
//!                                                           │
//!        inbound  authoritative ───────────────────────────► untouched
//!        inbound  ancillary ──── to_displayed ─────────────► rewritten
//!        outbound authoritative ─ to_real (policy axes) ───► rewritten
//!        outbound ancillary ──── to_real ──────────────────► rewritten
//! ```
//!
//! The inbound authoritative position is never rewritten. Shifting it
//! makes the client confirm a teleport to the wrong place and the server
//! snaps the player back. The player's own displayed position comes from
//! the read-side accessor instead.

use crate::error::{RewriteError, RewriteResult};
use crate::protocol::{Coordinates, RewritableMessage};
use coordveil_core::transform::{self, Axes};
use coordveil_core::SpoofSettings;
use coordveil_shared::{
    Direction, DisplayedPosition, MessageClass, MessageKind, PositionLayout, RealPosition,
};

/// Why a message was left as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UntouchedReason {
    /// Spoofing is off.
    Passthrough,
    /// Kind carries no coordinates we handle.
    NotPositional,
    /// Positional kind seen travelling the other way.
    WrongDirection,
    /// The server's authoritative position for the local player.
    AuthoritativeInbound,
    /// Positional kind, but this instance has no coordinates.
    NoCoordinates,
    /// The transform produced the same value (zero offset, non-finite
    /// sample).
    Unchanged,
}

impl UntouchedReason {
    /// Short label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::NotPositional => "not_positional",
            Self::WrongDirection => "wrong_direction",
            Self::AuthoritativeInbound => "authoritative_inbound",
            Self::NoCoordinates => "no_coordinates",
            Self::Unchanged => "unchanged",
        }
    }
}

/// What the rewriter did to one message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RewriteOutcome {
    /// Message left as it was.
    Untouched(UntouchedReason),
    /// Coordinates replaced.
    Rewritten {
        /// Value before the rewrite.
        from: Coordinates,
        /// Value written back.
        to: Coordinates,
    },
}

impl RewriteOutcome {
    /// True if the message was modified.
    #[inline]
    #[must_use]
    pub const fn is_rewritten(&self) -> bool {
        matches!(self, Self::Rewritten { .. })
    }
}

/// Class of `kind`. Unknown kinds are [`MessageClass::NotPositional`].
#[inline]
#[must_use]
pub const fn classify(kind: MessageKind) -> MessageClass {
    kind.class()
}

/// Rewrites a server -> client message.
///
/// # Errors
///
/// Returns the message's read/write error, or
/// [`RewriteError::ShapeMismatch`] if it carries coordinates of the wrong
/// shape. The message is unmodified on error.
pub fn rewrite_inbound(
    msg: &mut dyn RewritableMessage,
    settings: &SpoofSettings,
) -> RewriteResult<RewriteOutcome> {
    rewrite(msg, Direction::Inbound, settings)
}

/// Rewrites a client -> server message.
///
/// # Errors
///
/// As [`rewrite_inbound`].
pub fn rewrite_outbound(
    msg: &mut dyn RewritableMessage,
    settings: &SpoofSettings,
) -> RewriteResult<RewriteOutcome> {
    rewrite(msg, Direction::Outbound, settings)
}

/// Rewrites `msg` travelling in `direction`.
///
/// # Errors
///
/// As [`rewrite_inbound`].
pub fn rewrite(
    msg: &mut dyn RewritableMessage,
    direction: Direction,
    settings: &SpoofSettings,
) -> RewriteResult<RewriteOutcome> {
    let outcome = plan(&*msg, direction, settings)?;
    if let RewriteOutcome::Rewritten { to, .. } = outcome {
        msg.set_coordinates(to)?;
        trace_rewrite(msg.kind(), direction, outcome);
    }
    Ok(outcome)
}

/// Works out what [`rewrite`] would do to `msg` without writing anything.
///
/// A [`RewriteOutcome::Rewritten`] here is the write still to be made.
///
/// # Errors
///
/// The message's read error, or [`RewriteError::ShapeMismatch`].
pub fn plan(
    msg: &dyn RewritableMessage,
    direction: Direction,
    settings: &SpoofSettings,
) -> RewriteResult<RewriteOutcome> {
    if !settings.is_active() {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::Passthrough));
    }

    let kind = msg.kind();
    let Some(layout) = kind.layout() else {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::NotPositional));
    };
    if layout.direction != direction {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::WrongDirection));
    }
    if direction == Direction::Inbound && layout.class == MessageClass::AuthoritativePosition {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::AuthoritativeInbound));
    }

    let Some(from) = msg.coordinates()? else {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::NoCoordinates));
    };
    if from.shape() != layout.shape {
        return Err(RewriteError::ShapeMismatch {
            kind,
            expected: layout.shape,
            found: from.shape(),
        });
    }

    let to = shift(from, layout, settings);
    if to.same_bits(&from) {
        return Ok(RewriteOutcome::Untouched(UntouchedReason::Unchanged));
    }
    Ok(RewriteOutcome::Rewritten { from, to })
}

pub(crate) fn trace_rewrite(kind: MessageKind, direction: Direction, outcome: RewriteOutcome) {
    if let RewriteOutcome::Rewritten { from, to } = outcome {
        tracing::trace!(
            kind = %kind,
            direction = direction.as_str(),
            from = %from,
            to = %to,
            "coordinates rewritten"
        );
    }
}

fn shift(from: Coordinates, layout: PositionLayout, settings: &SpoofSettings) -> Coordinates {
    let axes = match layout.class {
        MessageClass::AuthoritativePosition => settings.axis_policy.authoritative_axes(),
        _ => Axes::All,
    };
    let (offset, mode) = (settings.offset, settings.mode);

    match (layout.direction, from) {
        (Direction::Inbound, Coordinates::Precise(v)) => Coordinates::Precise(
            transform::to_displayed_on(RealPosition::from_vec(v), offset, mode, axes).vec(),
        ),
        (Direction::Outbound, Coordinates::Precise(v)) => Coordinates::Precise(
            transform::to_real_on(DisplayedPosition::from_vec(v), offset, mode, axes).vec(),
        ),
        (Direction::Inbound, Coordinates::Block(b)) => {
            Coordinates::Block(transform::block_to_displayed(b, offset, mode, axes))
        }
        (Direction::Outbound, Coordinates::Block(b)) => {
            Coordinates::Block(transform::block_to_real(b, offset, mode, axes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        BlockUpdate, ChatMessage, EntityPosition, KeepAlive, Message, Particle, PlayerAction,
        PlayerActionKind, PlayerInteractBlock, PlayerMove, PlayerPositionLook, UnknownMessage,
    };
    use coordveil_core::{AxisPolicy, SpoofMode};
    use coordveil_shared::{BlockPos, Vec3d};

    fn active() -> SpoofSettings {
        SpoofSettings::with_offset(Vec3d::new(100.0, 0.0, 100.0))
    }

    fn teleport(x: f64, y: f64, z: f64) -> Message {
        PlayerPositionLook { position: Vec3d::new(x, y, z), yaw: 0.0, pitch: 0.0, teleport_id: 1 }
            .into()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(MessageKind::PlayerMove), MessageClass::AuthoritativePosition);
        assert_eq!(classify(MessageKind::Particle), MessageClass::AncillaryPosition);
        assert_eq!(classify(MessageKind::KeepAlive), MessageClass::NotPositional);
        assert_eq!(classify(MessageKind::Unknown(0xFEED)), MessageClass::NotPositional);
    }

    #[test]
    fn test_inbound_ancillary_is_shifted() {
        let mut msg: Message = BlockUpdate { pos: BlockPos::new(200, 70, 200), state_id: 1 }.into();
        let outcome = rewrite_inbound(&mut msg, &active()).expect("rewrites");
        assert!(outcome.is_rewritten());
        assert_eq!(msg, BlockUpdate { pos: BlockPos::new(100, 70, 100), state_id: 1 }.into());
    }

    #[test]
    fn test_inbound_authoritative_is_never_rewritten() {
        let mut msg = teleport(150.0, 64.0, 150.0);
        let before = msg.clone();
        for policy in [AxisPolicy::Horizontal, AxisPolicy::Full] {
            let settings = SpoofSettings { axis_policy: policy, ..active() };
            let outcome = rewrite_inbound(&mut msg, &settings).expect("no error");
            assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::AuthoritativeInbound));
            assert_eq!(msg, before);
        }
    }

    #[test]
    fn test_outbound_authoritative_is_restored() {
        let mut msg: Message =
            PlayerMove::full(Vec3d::new(50.0, 64.0, 50.0), 10.0, 5.0, true).into();
        rewrite_outbound(&mut msg, &active()).expect("rewrites");
        assert_eq!(msg, PlayerMove::full(Vec3d::new(150.0, 64.0, 150.0), 10.0, 5.0, true).into());
    }

    #[test]
    fn test_outbound_authoritative_keeps_y_unless_full_policy() {
        let settings = SpoofSettings::with_offset(Vec3d::new(100.0, 20.0, 100.0));
        let mut msg: Message = PlayerMove::position(Vec3d::new(50.0, 64.0, 50.0), true).into();
        rewrite_outbound(&mut msg, &settings).expect("rewrites");
        assert_eq!(msg, PlayerMove::position(Vec3d::new(150.0, 64.0, 150.0), true).into());

        let full = SpoofSettings { axis_policy: AxisPolicy::Full, ..settings };
        let mut msg: Message = PlayerMove::position(Vec3d::new(50.0, 64.0, 50.0), true).into();
        rewrite_outbound(&mut msg, &full).expect("rewrites");
        assert_eq!(msg, PlayerMove::position(Vec3d::new(150.0, 84.0, 150.0), true).into());
    }

    #[test]
    fn test_outbound_block_interaction_is_restored() {
        let mut msg: Message =
            PlayerInteractBlock { pos: BlockPos::new(100, 70, 100), face: 1, sequence: 4 }.into();
        rewrite_outbound(&mut msg, &active()).expect("rewrites");
        assert_eq!(
            msg,
            PlayerInteractBlock { pos: BlockPos::new(200, 70, 200), face: 1, sequence: 4 }.into()
        );

        let mut msg: Message = PlayerAction {
            pos: BlockPos::new(-5, 10, 5),
            action: PlayerActionKind::FinishDigging,
            face: 0,
        }
        .into();
        rewrite_outbound(&mut msg, &active()).expect("rewrites");
        assert!(matches!(msg, Message::PlayerAction(a) if a.pos == BlockPos::new(95, 10, 105)));
    }

    #[test]
    fn test_wrong_direction_is_untouched() {
        let mut msg: Message =
            Particle { particle_id: 1, position: Vec3d::new(1.0, 2.0, 3.0), count: 1 }.into();
        let before = msg.clone();
        let outcome = rewrite_outbound(&mut msg, &active()).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::WrongDirection));
        assert_eq!(msg, before);

        let mut msg: Message = PlayerMove::position(Vec3d::new(1.0, 2.0, 3.0), false).into();
        let outcome = rewrite_inbound(&mut msg, &active()).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::WrongDirection));
    }

    #[test]
    fn test_look_only_move_is_untouched() {
        let mut msg: Message = PlayerMove::look(45.0, 0.0, true).into();
        let outcome = rewrite_outbound(&mut msg, &active()).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::NoCoordinates));
    }

    #[test]
    fn test_non_positional_is_untouched() {
        for mut msg in [
            Message::from(KeepAlive { id: 1 }),
            ChatMessage { text: "x: 150 z: 150".into() }.into(),
            UnknownMessage { id: 77, payload: vec![0; 24] }.into(),
        ] {
            let before = msg.clone();
            for direction in [Direction::Inbound, Direction::Outbound] {
                let outcome = rewrite(&mut msg, direction, &active()).expect("no error");
                assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::NotPositional));
            }
            assert_eq!(msg, before);
        }
    }

    #[test]
    fn test_passthrough_short_circuits() {
        let settings = SpoofSettings { mode: SpoofMode::Passthrough, ..active() };
        let mut msg: Message = EntityPosition {
            entity_id: 3,
            position: Vec3d::new(150.0, 64.0, 150.0),
            on_ground: true,
        }
        .into();
        let before = msg.clone();
        let outcome = rewrite_inbound(&mut msg, &settings).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::Passthrough));
        assert_eq!(msg, before);
    }

    #[test]
    fn test_zero_offset_is_unchanged() {
        let settings = SpoofSettings::with_offset(Vec3d::ZERO);
        let mut msg: Message = EntityPosition {
            entity_id: 3,
            position: Vec3d::new(150.0, 64.0, 150.0),
            on_ground: true,
        }
        .into();
        let outcome = rewrite_inbound(&mut msg, &settings).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::Unchanged));
    }

    #[test]
    fn test_non_finite_component_leaves_siblings_shifted() {
        let mut msg: Message =
            Particle { particle_id: 1, position: Vec3d::new(f64::NAN, 64.0, 150.0), count: 1 }
                .into();
        let outcome = rewrite_inbound(&mut msg, &active()).expect("no error");
        assert!(outcome.is_rewritten());
        let Message::Particle(p) = msg else { unreachable!() };
        assert!(p.position.x.is_nan());
        assert_eq!((p.position.y, p.position.z), (64.0, 50.0));
    }

    #[test]
    fn test_outbound_move_with_nan_height_is_still_restored() {
        let mut msg: Message = PlayerMove::position(Vec3d::new(50.0, f64::NAN, 50.0), true).into();
        let outcome = rewrite_outbound(&mut msg, &active()).expect("no error");
        assert!(outcome.is_rewritten());
        let Message::PlayerMove(m) = msg else { unreachable!() };
        let position = m.position.expect("position kept");
        assert_eq!((position.x, position.z), (150.0, 150.0));
        assert!(position.y.is_nan());
    }

    #[test]
    fn test_fully_non_finite_coordinates_are_unchanged() {
        let position = Vec3d::new(f64::NAN, f64::INFINITY, f64::NAN);
        let mut msg: Message = Particle { particle_id: 1, position, count: 1 }.into();
        let outcome = rewrite_inbound(&mut msg, &active()).expect("no error");
        assert_eq!(outcome, RewriteOutcome::Untouched(UntouchedReason::Unchanged));
    }

    #[test]
    fn test_plan_does_not_write() {
        let msg: Message = BlockUpdate { pos: BlockPos::new(200, 70, 200), state_id: 1 }.into();
        let outcome = plan(&msg, Direction::Inbound, &active()).expect("plans");
        assert_eq!(
            outcome,
            RewriteOutcome::Rewritten {
                from: Coordinates::Block(BlockPos::new(200, 70, 200)),
                to: Coordinates::Block(BlockPos::new(100, 70, 100)),
            }
        );
        assert_eq!(msg, BlockUpdate { pos: BlockPos::new(200, 70, 200), state_id: 1 }.into());
    }
}
