//! # Message Model
//!
//! The rewriter never sees host packet classes. The host integration layer
//! wraps each packet in something that implements [`RewritableMessage`]:
//! a kind from the closed table, plus get/set access to the one coordinate
//! the table says it carries.
//!
//! ```text
//! host packet ──► RewritableMessage ──► kind()            ──► layout table
//!                                   ├─► coordinates()     ──► transform
//!                                   └─► set_coordinates() ◄──┘
//! ```
//!
//! [`Message`] is the in-crate reference model used by tests, benches and
//! hosts that decode packets into plain structs.

mod messages;

pub use messages::{
    BlockUpdate, ChatMessage, EntityPosition, EntitySpawn, Explosion, KeepAlive, Message,
    Particle, PlaySound, PlayerAction, PlayerActionKind, PlayerInteractBlock, PlayerMove,
    PlayerPositionLook, UnknownMessage,
};

use crate::error::RewriteResult;
use coordveil_shared::{BlockPos, CoordinateShape, MessageKind, Vec3d};
use std::fmt;

/// Coordinates carried by a positional message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coordinates {
    /// Double-precision world position.
    Precise(Vec3d),
    /// Integer block position.
    Block(BlockPos),
}

impl Coordinates {
    /// Shape of these coordinates.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> CoordinateShape {
        match self {
            Self::Precise(_) => CoordinateShape::Precise,
            Self::Block(_) => CoordinateShape::Block,
        }
    }

    /// Bitwise equality. Unlike `==`, a NaN component equals itself.
    #[must_use]
    pub fn same_bits(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Precise(a), Self::Precise(b)) => a
                .to_array()
                .iter()
                .zip(b.to_array().iter())
                .all(|(l, r)| l.to_bits() == r.to_bits()),
            (Self::Block(a), Self::Block(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precise(v) => fmt::Display::fmt(v, f),
            Self::Block(b) => fmt::Display::fmt(b, f),
        }
    }
}

/// A message the rewriter can inspect and rewrite in place.
///
/// Implemented by the host integration layer over its own packet types.
pub trait RewritableMessage {
    /// Kind in the closed table. Unmapped packets report
    /// [`MessageKind::Unknown`].
    fn kind(&self) -> MessageKind;

    /// The positional field, or `None` if this instance carries none (a
    /// look-only move report, for example).
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot read the field.
    fn coordinates(&self) -> RewriteResult<Option<Coordinates>>;

    /// Writes the positional field back.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is wrong for this message or the host
    /// cannot write the field. The message must be left unmodified when
    /// this fails.
    fn set_coordinates(&mut self, coords: Coordinates) -> RewriteResult<()>;
}
