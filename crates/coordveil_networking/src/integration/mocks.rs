//! Test doubles for the host side of the integration traits.
//!
//! Public so integration tests and host crates can drive the spoofer
//! without an engine.

use super::accessor::DisplayFrame;
use super::traits::{DisplaySurface, PositionSource};
use crate::error::{RewriteError, RewriteResult};
use crate::protocol::{Coordinates, RewritableMessage};
use coordveil_shared::{BlockPos, CoordinateShape, MessageKind, RealPosition, Vec3d};
use parking_lot::RwLock;

/// Position source the test moves by hand.
#[derive(Debug, Default)]
pub struct MockPositionSource {
    position: RwLock<Option<RealPosition>>,
}

impl MockPositionSource {
    /// Source with the player at `position`.
    #[must_use]
    pub fn at(position: RealPosition) -> Self {
        Self { position: RwLock::new(Some(position)) }
    }

    /// Source with no world loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Moves the player.
    pub fn set(&self, position: Option<RealPosition>) {
        *self.position.write() = position;
    }
}

impl PositionSource for MockPositionSource {
    fn real_position(&self) -> Option<RealPosition> {
        *self.position.read()
    }
}

/// Display surface that records every frame it is shown.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Frames in presentation order.
    pub frames: Vec<DisplayFrame>,
}

impl RecordingSurface {
    /// Most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&DisplayFrame> {
        self.frames.last()
    }
}

impl DisplaySurface for RecordingSurface {
    fn present(&mut self, frame: DisplayFrame) {
        self.frames.push(frame);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fault {
    Unreadable,
    WrongShape,
    Unwritable,
    PanicOnRead,
    TornWrite,
    Recovered,
}

/// A host message whose accessors misbehave.
#[derive(Debug)]
pub struct FaultyMessage {
    kind: MessageKind,
    fault: Fault,
    current: Coordinates,
    writes: usize,
}

impl FaultyMessage {
    fn with_fault(kind: MessageKind, fault: Fault) -> Self {
        let expected = kind.layout().map_or(CoordinateShape::Precise, |l| l.shape);
        let shape = match (fault, expected) {
            (Fault::WrongShape, CoordinateShape::Precise) => CoordinateShape::Block,
            (Fault::WrongShape, CoordinateShape::Block) => CoordinateShape::Precise,
            (_, shape) => shape,
        };
        Self { kind, fault, current: sample(shape), writes: 0 }
    }

    /// Reading the coordinates fails.
    #[must_use]
    pub fn unreadable(kind: MessageKind) -> Self {
        Self::with_fault(kind, Fault::Unreadable)
    }

    /// Reports coordinates of the shape the layout table does not expect.
    #[must_use]
    pub fn wrong_shape(kind: MessageKind) -> Self {
        Self::with_fault(kind, Fault::WrongShape)
    }

    /// Reads fine; writing back fails.
    #[must_use]
    pub fn unwritable(kind: MessageKind) -> Self {
        Self::with_fault(kind, Fault::Unwritable)
    }

    /// Reading the coordinates panics.
    #[must_use]
    pub fn panicking(kind: MessageKind) -> Self {
        Self::with_fault(kind, Fault::PanicOnRead)
    }

    /// The first write stores the new value and then panics. Later writes
    /// succeed.
    #[must_use]
    pub fn torn_write(kind: MessageKind) -> Self {
        Self::with_fault(kind, Fault::TornWrite)
    }

    /// Successful writes so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// The value a reader would see now.
    #[must_use]
    pub const fn current(&self) -> Coordinates {
        self.current
    }
}

fn sample(shape: CoordinateShape) -> Coordinates {
    match shape {
        CoordinateShape::Precise => Coordinates::Precise(Vec3d::new(150.0, 64.0, 150.0)),
        CoordinateShape::Block => Coordinates::Block(BlockPos::new(150, 64, 150)),
    }
}

impl RewritableMessage for FaultyMessage {
    fn kind(&self) -> MessageKind {
        self.kind
    }

    fn coordinates(&self) -> RewriteResult<Option<Coordinates>> {
        match self.fault {
            Fault::Unreadable => Err(RewriteError::ReadFailed {
                kind: self.kind,
                reason: "field not accessible".into(),
            }),
            Fault::PanicOnRead => panic!("host accessor panicked reading {}", self.kind),
            Fault::WrongShape | Fault::Unwritable | Fault::TornWrite | Fault::Recovered => {
                Ok(Some(self.current))
            }
        }
    }

    fn set_coordinates(&mut self, coords: Coordinates) -> RewriteResult<()> {
        match self.fault {
            Fault::Unwritable => Err(RewriteError::WriteFailed {
                kind: self.kind,
                reason: "field is final".into(),
            }),
            Fault::TornWrite => {
                self.current = coords;
                self.fault = Fault::Recovered;
                panic!("host accessor panicked writing {}", self.kind)
            }
            Fault::Unreadable | Fault::WrongShape | Fault::PanicOnRead | Fault::Recovered => {
                self.current = coords;
                self.writes += 1;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_reports_a_write_failure() {
        let mut msg = FaultyMessage::unwritable(MessageKind::PlayerMove);
        let err = msg.set_coordinates(msg.current()).expect_err("write fails");
        assert!(matches!(err, RewriteError::WriteFailed { kind: MessageKind::PlayerMove, .. }));
        assert_eq!(err.to_string(), "player_move: write failed: field is final");
    }

    #[test]
    fn test_wrong_shape_reports_the_other_shape() {
        let msg = FaultyMessage::wrong_shape(MessageKind::BlockUpdate);
        assert_eq!(msg.current().shape(), CoordinateShape::Precise);
        let msg = FaultyMessage::wrong_shape(MessageKind::Particle);
        assert_eq!(msg.current().shape(), CoordinateShape::Block);
    }
}
