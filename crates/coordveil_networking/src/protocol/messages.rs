//! # Message Definitions
//!
//! Plain-struct model of every message kind in the layout table. Only the
//! positional field of each message is ever touched by the rewriter; the
//! rest is carried so tests can check it survives untouched.

use super::{Coordinates, RewritableMessage};
use crate::error::{RewriteError, RewriteResult};
use coordveil_shared::{BlockPos, MessageKind, Vec3d};

/// Server -> Client: position correction / teleport of the local player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPositionLook {
    /// Absolute real position.
    pub position: Vec3d,
    /// Yaw in degrees.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// Id the client must confirm.
    pub teleport_id: u32,
}

/// Server -> Client: one block changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockUpdate {
    /// Block position.
    pub pos: BlockPos,
    /// New block state id.
    pub state_id: u32,
}

/// Server -> Client: particle effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Particle type id.
    pub particle_id: u32,
    /// Emission point.
    pub position: Vec3d,
    /// Number of particles.
    pub count: u32,
}

/// Server -> Client: positioned sound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaySound {
    /// Sound id.
    pub sound_id: u32,
    /// Source position.
    pub position: Vec3d,
    /// Volume multiplier.
    pub volume: f32,
    /// Pitch multiplier.
    pub pitch: f32,
}

/// Server -> Client: explosion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    /// Centre.
    pub position: Vec3d,
    /// Blast power.
    pub power: f32,
}

/// Server -> Client: another entity spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySpawn {
    /// Network entity id.
    pub entity_id: i32,
    /// Entity type id.
    pub entity_type: u32,
    /// Spawn position.
    pub position: Vec3d,
}

/// Server -> Client: another entity moved or teleported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityPosition {
    /// Network entity id.
    pub entity_id: i32,
    /// New absolute position.
    pub position: Vec3d,
    /// Whether the entity is on the ground.
    pub on_ground: bool,
}

/// Client -> Server: local player movement report.
///
/// Look-only reports carry no position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerMove {
    /// Position, if this report carries one.
    pub position: Option<Vec3d>,
    /// Yaw in degrees.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// Whether the player is on the ground.
    pub on_ground: bool,
}

impl PlayerMove {
    /// Position-only report.
    #[must_use]
    pub const fn position(position: Vec3d, on_ground: bool) -> Self {
        Self { position: Some(position), yaw: 0.0, pitch: 0.0, on_ground }
    }

    /// Look-only report.
    #[must_use]
    pub const fn look(yaw: f32, pitch: f32, on_ground: bool) -> Self {
        Self { position: None, yaw, pitch, on_ground }
    }

    /// Position and look.
    #[must_use]
    pub const fn full(position: Vec3d, yaw: f32, pitch: f32, on_ground: bool) -> Self {
        Self { position: Some(position), yaw, pitch, on_ground }
    }
}

/// Client -> Server: use the held item on a block face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerInteractBlock {
    /// Target block.
    pub pos: BlockPos,
    /// Face index (0..6).
    pub face: u8,
    /// Client sequence number.
    pub sequence: u32,
}

/// What a [`PlayerAction`] does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerActionKind {
    /// Start breaking a block.
    StartDigging,
    /// Stop breaking before completion.
    AbortDigging,
    /// Block broken.
    FinishDigging,
    /// Drop the held item.
    DropItem,
}

/// Client -> Server: dig / break a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerAction {
    /// Target block.
    pub pos: BlockPos,
    /// Action.
    pub action: PlayerActionKind,
    /// Face index (0..6).
    pub face: u8,
}

/// Keep-alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeepAlive {
    /// Echoed id.
    pub id: u64,
}

/// Chat line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Text as typed or received.
    pub text: String,
}

/// A packet the host could not map onto a known kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMessage {
    /// Host packet id.
    pub id: u32,
    /// Opaque payload.
    pub payload: Vec<u8>,
}

/// Any message in the reference model.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Message {
    PlayerPositionLook(PlayerPositionLook),
    BlockUpdate(BlockUpdate),
    Particle(Particle),
    PlaySound(PlaySound),
    Explosion(Explosion),
    EntitySpawn(EntitySpawn),
    EntityPosition(EntityPosition),
    PlayerMove(PlayerMove),
    PlayerInteractBlock(PlayerInteractBlock),
    PlayerAction(PlayerAction),
    KeepAlive(KeepAlive),
    ChatMessage(ChatMessage),
    Unknown(UnknownMessage),
}

macro_rules! impl_from_message {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Message {
                fn from(m: $variant) -> Self {
                    Self::$variant(m)
                }
            }
        )*
    };
}

impl_from_message!(
    PlayerPositionLook,
    BlockUpdate,
    Particle,
    PlaySound,
    Explosion,
    EntitySpawn,
    EntityPosition,
    PlayerMove,
    PlayerInteractBlock,
    PlayerAction,
    KeepAlive,
    ChatMessage,
);

impl From<UnknownMessage> for Message {
    fn from(m: UnknownMessage) -> Self {
        Self::Unknown(m)
    }
}

impl RewritableMessage for Message {
    fn kind(&self) -> MessageKind {
        match self {
            Self::PlayerPositionLook(_) => MessageKind::PlayerPositionLook,
            Self::BlockUpdate(_) => MessageKind::BlockUpdate,
            Self::Particle(_) => MessageKind::Particle,
            Self::PlaySound(_) => MessageKind::PlaySound,
            Self::Explosion(_) => MessageKind::Explosion,
            Self::EntitySpawn(_) => MessageKind::EntitySpawn,
            Self::EntityPosition(_) => MessageKind::EntityPosition,
            Self::PlayerMove(_) => MessageKind::PlayerMove,
            Self::PlayerInteractBlock(_) => MessageKind::PlayerInteractBlock,
            Self::PlayerAction(_) => MessageKind::PlayerAction,
            Self::KeepAlive(_) => MessageKind::KeepAlive,
            Self::ChatMessage(_) => MessageKind::ChatMessage,
            Self::Unknown(m) => MessageKind::Unknown(m.id),
        }
    }

    fn coordinates(&self) -> RewriteResult<Option<Coordinates>> {
        use Coordinates::{Block, Precise};

        Ok(match self {
            Self::PlayerPositionLook(m) => Some(Precise(m.position)),
            Self::Particle(m) => Some(Precise(m.position)),
            Self::PlaySound(m) => Some(Precise(m.position)),
            Self::Explosion(m) => Some(Precise(m.position)),
            Self::EntitySpawn(m) => Some(Precise(m.position)),
            Self::EntityPosition(m) => Some(Precise(m.position)),
            Self::PlayerMove(m) => m.position.map(Precise),
            Self::BlockUpdate(m) => Some(Block(m.pos)),
            Self::PlayerInteractBlock(m) => Some(Block(m.pos)),
            Self::PlayerAction(m) => Some(Block(m.pos)),
            Self::KeepAlive(_) | Self::ChatMessage(_) | Self::Unknown(_) => None,
        })
    }

    fn set_coordinates(&mut self, coords: Coordinates) -> RewriteResult<()> {
        use Coordinates::{Block, Precise};

        let kind = self.kind();
        let Some(layout) = kind.layout() else {
            return Err(RewriteError::MissingField { kind, field: "position" });
        };

        match (self, coords) {
            (Self::PlayerPositionLook(m), Precise(v)) => m.position = v,
            (Self::Particle(m), Precise(v)) => m.position = v,
            (Self::PlaySound(m), Precise(v)) => m.position = v,
            (Self::Explosion(m), Precise(v)) => m.position = v,
            (Self::EntitySpawn(m), Precise(v)) => m.position = v,
            (Self::EntityPosition(m), Precise(v)) => m.position = v,
            (Self::PlayerMove(m), Precise(v)) => match m.position.as_mut() {
                Some(position) => *position = v,
                None => return Err(RewriteError::MissingField { kind, field: "position" }),
            },
            (Self::BlockUpdate(m), Block(b)) => m.pos = b,
            (Self::PlayerInteractBlock(m), Block(b)) => m.pos = b,
            (Self::PlayerAction(m), Block(b)) => m.pos = b,
            (_, coords) => {
                return Err(RewriteError::ShapeMismatch {
                    kind,
                    expected: layout.shape,
                    found: coords.shape(),
                })
            }
        }
        Ok(())
    }
}
