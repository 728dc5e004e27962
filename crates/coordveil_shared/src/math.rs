//! Coordinate types shared by every layer.
//!
//! These are the raw shapes host messages carry. They say nothing about
//! whether a value is real or displayed; see [`crate::position`] for that.

use crate::constants::{CHUNK_MASK, CHUNK_SHIFT};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Double-precision 3D vector - world positions and offsets.
///
/// Layout matches the engine's `double[3]` so host plumbing can cast raw
/// buffers with [`bytemuck::cast`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3d {
    /// X component
    pub x: f64,
    /// Y component (vertical)
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3d {
    /// Creates a new Vec3d
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True when no component is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// True when every component is exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Same vector with the vertical component dropped to zero.
    #[inline]
    #[must_use]
    pub const fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// True when every component is a whole number.
    #[must_use]
    pub fn is_whole(self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0 && self.z.fract() == 0.0
    }

    /// The block containing this point (floor on every axis).
    ///
    /// Components outside the `i32` range saturate.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn floor_block(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// Whole-block part of this vector, each component truncated toward
    /// zero. Used to shift grid positions by an offset.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn trunc_block(self) -> BlockPos {
        BlockPos::new(self.x.trunc() as i32, self.y.trunc() as i32, self.z.trunc() as i32)
    }
}

impl std::ops::Add for Vec3d {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3d {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::fmt::Display for Vec3d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Integer block position - block updates and block interactions.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct BlockPos {
    /// X component
    pub x: i32,
    /// Y component (vertical)
    pub y: i32,
    /// Z component
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World origin
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Component-wise wrapping addition.
    ///
    /// Wrapping keeps `a.wrapping_add(b).wrapping_sub(b) == a` for every
    /// input, which the grid transform relies on.
    #[inline]
    #[must_use]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }

    /// Component-wise wrapping subtraction.
    #[inline]
    #[must_use]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }

    /// Chunk column containing this block.
    #[inline]
    #[must_use]
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::new(self.x >> CHUNK_SHIFT, self.z >> CHUNK_SHIFT)
    }

    /// Position of this block inside its chunk column: `(x, y, z)` with
    /// x and z in `0..=15`.
    #[inline]
    #[must_use]
    pub const fn local(self) -> (i32, i32, i32) {
        (self.x & CHUNK_MASK, self.y, self.z & CHUNK_MASK)
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Chunk column coordinates (16x16 blocks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    /// Chunk X
    pub x: i32,
    /// Chunk Z
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk position
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3d_operations() {
        let a = Vec3d::new(150.0, 64.0, 150.0);
        let b = Vec3d::new(100.0, 0.0, 100.0);

        assert_eq!(a - b, Vec3d::new(50.0, 64.0, 50.0));
        assert_eq!(a - b + b, a);
        assert_eq!(a.horizontal(), Vec3d::new(150.0, 0.0, 150.0));
    }

    #[test]
    fn test_vec3d_finiteness() {
        assert!(Vec3d::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3d::new(f64::NAN, 2.0, 3.0).is_finite());
        assert!(!Vec3d::new(1.0, f64::INFINITY, 3.0).is_finite());
        assert!(Vec3d::ZERO.is_zero());
    }

    #[test]
    fn test_vec3d_bytemuck() {
        let raw = [1.5f64, 64.0, -2.25];
        let v: Vec3d = bytemuck::cast(raw);
        assert_eq!(v, Vec3d::new(1.5, 64.0, -2.25));
        assert_eq!(bytemuck::bytes_of(&v).len(), 24);
    }

    #[test]
    fn test_floor_and_trunc_block() {
        let v = Vec3d::new(-0.5, 64.9, 15.99);
        assert_eq!(v.floor_block(), BlockPos::new(-1, 64, 15));
        assert_eq!(v.trunc_block(), BlockPos::new(0, 64, 15));
        assert_eq!(Vec3d::new(100.7, 0.0, -100.7).trunc_block(), BlockPos::new(100, 0, -100));
    }

    #[test]
    fn test_block_chunk_and_local() {
        let pos = BlockPos::new(-1, 70, 33);
        assert_eq!(pos.chunk(), ChunkPos::new(-1, 2));
        assert_eq!(pos.local(), (15, 70, 1));
    }

    #[test]
    fn test_block_wrapping_round_trip() {
        let pos = BlockPos::new(i32::MAX, 0, i32::MIN);
        let shift = BlockPos::new(100, 0, 100);
        assert_eq!(pos.wrapping_sub(shift).wrapping_add(shift), pos);
    }
}
