//! # Grid & File Constants
//!
//! Values baked into every layer. Changing the chunk geometry means the
//! host world changed, not the spoofer.

/// Bits to shift a block coordinate by to get its chunk coordinate.
pub const CHUNK_SHIFT: u32 = 4;

/// Mask extracting the block coordinate local to its chunk (0..=15).
pub const CHUNK_MASK: i32 = (1 << CHUNK_SHIFT) - 1;

/// File name the controller looks for when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "coordveil.toml";
