//! Real and displayed position samples.
//!
//! A [`PositionSample`] is tagged with the coordinate space it lives in.
//! Real (server-truth) and displayed (shifted) positions are different
//! types, so passing one where the other is expected does not compile.

use crate::math::{BlockPos, Vec3d};
use std::fmt;
use std::marker::PhantomData;

/// Coordinate space marker.
pub trait Space: Copy + fmt::Debug + PartialEq + sealed::Sealed {
    /// Short label used in logs.
    const LABEL: &'static str;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Real {}
    impl Sealed for super::Displayed {}
}

/// Server-truth coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Real {}

/// Shifted coordinates shown to the player and to other observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displayed {}

impl Space for Real {
    const LABEL: &'static str = "real";
}

impl Space for Displayed {
    const LABEL: &'static str = "displayed";
}

/// An immutable (x, y, z) sample in coordinate space `S`.
#[derive(Clone, Copy, PartialEq)]
pub struct PositionSample<S: Space> {
    vec: Vec3d,
    _space: PhantomData<S>,
}

/// A server-truth position.
pub type RealPosition = PositionSample<Real>;

/// A shifted position, as shown on screen.
pub type DisplayedPosition = PositionSample<Displayed>;

impl<S: Space> PositionSample<S> {
    /// Creates a sample from components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_vec(Vec3d::new(x, y, z))
    }

    /// Tags a raw vector as living in space `S`.
    #[must_use]
    pub const fn from_vec(vec: Vec3d) -> Self {
        Self { vec, _space: PhantomData }
    }

    /// The untagged vector.
    #[inline]
    #[must_use]
    pub const fn vec(self) -> Vec3d {
        self.vec
    }

    /// X component
    #[inline]
    #[must_use]
    pub const fn x(self) -> f64 {
        self.vec.x
    }

    /// Y component
    #[inline]
    #[must_use]
    pub const fn y(self) -> f64 {
        self.vec.y
    }

    /// Z component
    #[inline]
    #[must_use]
    pub const fn z(self) -> f64 {
        self.vec.z
    }

    /// True when no component is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.vec.is_finite()
    }

    /// Block containing this sample, in the same space.
    #[must_use]
    pub fn block(self) -> BlockPos {
        self.vec.floor_block()
    }
}

impl<S: Space> Default for PositionSample<S> {
    fn default() -> Self {
        Self::from_vec(Vec3d::ZERO)
    }
}

impl<S: Space> fmt::Debug for PositionSample<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", S::LABEL, self.vec)
    }
}

impl<S: Space> fmt::Display for PositionSample<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.vec, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_accessors() {
        let real = RealPosition::new(150.5, 64.0, -3.25);
        assert_eq!(real.x(), 150.5);
        assert_eq!(real.y(), 64.0);
        assert_eq!(real.z(), -3.25);
        assert_eq!(real.block(), BlockPos::new(150, 64, -4));
    }

    #[test]
    fn test_debug_carries_space_label() {
        let shown = DisplayedPosition::new(1.0, 2.0, 3.0);
        assert_eq!(format!("{shown:?}"), "displayed(1.000, 2.000, 3.000)");
        assert_eq!(format!("{:?}", RealPosition::default()), "real(0.000, 0.000, 0.000)");
    }
}
