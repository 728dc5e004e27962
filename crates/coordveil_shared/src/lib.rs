//! # COORDVEIL Shared
//!
//! Common types used by the transform engine, the packet rewriter and the
//! host integration layer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on host engine types. A host packet is
//! only ever seen through a [`MessageKind`] and the coordinates it carries.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod position;
pub mod protocol;

pub use constants::{CHUNK_MASK, CHUNK_SHIFT, DEFAULT_CONFIG_FILE};
pub use math::{BlockPos, ChunkPos, Vec3d};
pub use position::{Displayed, DisplayedPosition, PositionSample, Real, RealPosition, Space};
pub use protocol::{CoordinateShape, Direction, MessageClass, MessageKind, PositionLayout};
