//! Message kinds and the positional layout table.
//!
//! This is the closed allow-list that decides which messages carry
//! coordinates. A kind that is not in the table never gets rewritten, no
//! matter what its fields are called.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a message is travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Server -> client ("on receive")
    Inbound,
    /// Client -> server ("on send")
    Outbound,
}

impl Direction {
    /// Short label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

/// How a message relates to the local player's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageClass {
    /// Carries no coordinates the spoofer cares about.
    NotPositional,
    /// The local player's own absolute position. The server reads it back
    /// as session truth; rewriting it wrong desyncs the player.
    AuthoritativePosition,
    /// Coordinates of a block, particle, sound or other entity. Cosmetic.
    AncillaryPosition,
}

/// Shape of the coordinates a positional message carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateShape {
    /// Double-precision world position.
    Precise,
    /// Integer block position.
    Block,
}

/// Entry of the layout table for one positional message kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionLayout {
    /// Direction this kind travels in.
    pub direction: Direction,
    /// Authoritative or ancillary.
    pub class: MessageClass,
    /// Coordinate shape carried.
    pub shape: CoordinateShape,
}

impl PositionLayout {
    const fn new(direction: Direction, class: MessageClass, shape: CoordinateShape) -> Self {
        Self { direction, class, shape }
    }
}

/// Message kinds the host integration layer can report.
///
/// The host maps its own packet classes onto these. Anything it does not
/// recognise is reported as [`MessageKind::Unknown`] with the host's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Server -> Client: teleport / position correction for the local player.
    PlayerPositionLook,
    /// Server -> Client: single block changed.
    BlockUpdate,
    /// Server -> Client: particle effect at a point.
    Particle,
    /// Server -> Client: positioned sound.
    PlaySound,
    /// Server -> Client: explosion centre.
    Explosion,
    /// Server -> Client: another entity spawned.
    EntitySpawn,
    /// Server -> Client: another entity moved/teleported.
    EntityPosition,
    /// Client -> Server: local player movement report.
    PlayerMove,
    /// Client -> Server: use item on a block.
    PlayerInteractBlock,
    /// Client -> Server: dig / break a block.
    PlayerAction,
    /// Bidirectional: keep-alive.
    KeepAlive,
    /// Bidirectional: chat line.
    ChatMessage,
    /// Anything the host did not map. Never rewritten.
    Unknown(u32),
}

impl MessageKind {
    /// Every named kind, for exhaustive table checks.
    pub const KNOWN: [Self; 12] = [
        Self::PlayerPositionLook,
        Self::BlockUpdate,
        Self::Particle,
        Self::PlaySound,
        Self::Explosion,
        Self::EntitySpawn,
        Self::EntityPosition,
        Self::PlayerMove,
        Self::PlayerInteractBlock,
        Self::PlayerAction,
        Self::KeepAlive,
        Self::ChatMessage,
    ];

    /// Positional layout of this kind, `None` for non-positional kinds.
    #[must_use]
    pub const fn layout(self) -> Option<PositionLayout> {
        use CoordinateShape::{Block, Precise};
        use Direction::{Inbound, Outbound};
        use MessageClass::{AncillaryPosition, AuthoritativePosition};

        let layout = match self {
            Self::PlayerPositionLook => {
                PositionLayout::new(Inbound, AuthoritativePosition, Precise)
            }
            Self::BlockUpdate => PositionLayout::new(Inbound, AncillaryPosition, Block),
            Self::Particle
            | Self::PlaySound
            | Self::Explosion
            | Self::EntitySpawn
            | Self::EntityPosition => PositionLayout::new(Inbound, AncillaryPosition, Precise),
            Self::PlayerMove => PositionLayout::new(Outbound, AuthoritativePosition, Precise),
            Self::PlayerInteractBlock | Self::PlayerAction => {
                PositionLayout::new(Outbound, AncillaryPosition, Block)
            }
            Self::KeepAlive | Self::ChatMessage | Self::Unknown(_) => return None,
        };
        Some(layout)
    }

    /// Class of this kind, ignoring direction.
    #[must_use]
    pub const fn class(self) -> MessageClass {
        match self.layout() {
            Some(layout) => layout.class,
            None => MessageClass::NotPositional,
        }
    }

    /// Name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlayerPositionLook => "player_position_look",
            Self::BlockUpdate => "block_update",
            Self::Particle => "particle",
            Self::PlaySound => "play_sound",
            Self::Explosion => "explosion",
            Self::EntitySpawn => "entity_spawn",
            Self::EntityPosition => "entity_position",
            Self::PlayerMove => "player_move",
            Self::PlayerInteractBlock => "player_interact_block",
            Self::PlayerAction => "player_action",
            Self::KeepAlive => "keep_alive",
            Self::ChatMessage => "chat_message",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown#{id}"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_authoritative_kind_per_direction() {
        for direction in [Direction::Inbound, Direction::Outbound] {
            let count = MessageKind::KNOWN
                .iter()
                .filter_map(|k| k.layout())
                .filter(|l| l.direction == direction)
                .filter(|l| l.class == MessageClass::AuthoritativePosition)
                .count();
            assert_eq!(count, 1, "{direction:?}");
        }
    }

    #[test]
    fn test_unknown_kinds_are_not_positional() {
        for id in [0, 1, 0x2A, u32::MAX] {
            assert_eq!(MessageKind::Unknown(id).layout(), None);
            assert_eq!(MessageKind::Unknown(id).class(), MessageClass::NotPositional);
        }
    }

    #[test]
    fn test_block_kinds_use_block_shape() {
        let kinds =
            [MessageKind::BlockUpdate, MessageKind::PlayerInteractBlock, MessageKind::PlayerAction];
        for kind in kinds {
            assert_eq!(kind.layout().map(|l| l.shape), Some(CoordinateShape::Block));
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(MessageKind::PlayerMove.to_string(), "player_move");
        assert_eq!(MessageKind::Unknown(7).to_string(), "unknown#7");
    }
}
