//! Rewrite error types.

use coordveil_shared::{CoordinateShape, MessageKind};
use thiserror::Error;

/// Result alias for rewrite operations.
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Reasons a message's coordinates could not be read or written.
///
/// None of these are fatal. The interceptor logs them and lets the
/// original message through.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RewriteError {
    /// The message carried (or was handed) coordinates of the wrong shape.
    #[error("{kind}: expected {expected:?} coordinates, found {found:?}")]
    ShapeMismatch {
        /// Message kind
        kind: MessageKind,
        /// Shape the layout table promises
        expected: CoordinateShape,
        /// Shape actually seen
        found: CoordinateShape,
    },

    /// A field the layout table promises is absent.
    #[error("{kind}: missing field `{field}`")]
    MissingField {
        /// Message kind
        kind: MessageKind,
        /// Field name
        field: &'static str,
    },

    /// The host could not extract the coordinates.
    #[error("{kind}: read failed: {reason}")]
    ReadFailed {
        /// Message kind
        kind: MessageKind,
        /// Host-supplied reason
        reason: String,
    },

    /// The host could not write the coordinates back.
    #[error("{kind}: write failed: {reason}")]
    WriteFailed {
        /// Message kind
        kind: MessageKind,
        /// Host-supplied reason
        reason: String,
    },
}

impl RewriteError {
    /// Kind of the message that failed.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::ShapeMismatch { kind, .. }
            | Self::MissingField { kind, .. }
            | Self::ReadFailed { kind, .. }
            | Self::WriteFailed { kind, .. } => *kind,
        }
    }
}
