//! # Transform Engine
//!
//! Pure conversion between real and displayed positions.
//!
//! - `to_displayed`: `real - offset` (server -> client)
//! - `to_real`: `displayed + offset` (client -> server)
//!
//! Both are the identity in [`SpoofMode::Passthrough`]. No state, no I/O:
//! the caller passes the mode and offset it snapshotted.
//!
//! ## Non-finite input
//!
//! Each component is shifted on its own. A NaN or infinite component comes
//! back unchanged, and so does a component whose shifted value would
//! overflow to infinity; its finite siblings are still shifted. A
//! non-finite offset leaves the whole sample unchanged. Never fresh NaN.
//!
//! ## Exactness
//!
//! `to_real(to_displayed(p))` is bit-exact whenever `p - offset` is
//! representable, which holds for every game-range coordinate on a fine
//! grid and whole-block offsets. Grid positions use the whole-block part
//! of the offset and wrapping integer arithmetic, so their round trip is
//! exact for every input.

use coordveil_shared::{BlockPos, DisplayedPosition, RealPosition, Vec3d};
use serde::{Deserialize, Serialize};

/// Spoofing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoofMode {
    /// Identity transform. Displayed == real.
    #[default]
    #[serde(alias = "vanilla", alias = "VANILLA", alias = "PASSTHROUGH")]
    Passthrough,
    /// Shift by the configured offset.
    #[serde(alias = "OFFSET")]
    Offset,
}

impl SpoofMode {
    /// True when the transform is not the identity.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Offset)
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Passthrough => Self::Offset,
            Self::Offset => Self::Passthrough,
        }
    }

    /// Lowercase name, as used in config and status payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Offset => "offset",
        }
    }
}

/// Axes an offset is applied on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axes {
    /// x, y and z.
    #[default]
    All,
    /// x and z only; y passes through untouched.
    Horizontal,
}

impl Axes {
    /// The part of `offset` that applies on these axes.
    #[inline]
    #[must_use]
    pub const fn mask(self, offset: Vec3d) -> Vec3d {
        match self {
            Self::All => offset,
            Self::Horizontal => offset.horizontal(),
        }
    }
}

/// Real -> displayed on every axis.
#[inline]
#[must_use]
pub fn to_displayed(real: RealPosition, offset: Vec3d, mode: SpoofMode) -> DisplayedPosition {
    to_displayed_on(real, offset, mode, Axes::All)
}

/// Displayed -> real on every axis.
#[inline]
#[must_use]
pub fn to_real(displayed: DisplayedPosition, offset: Vec3d, mode: SpoofMode) -> RealPosition {
    to_real_on(displayed, offset, mode, Axes::All)
}

/// Real -> displayed on the given axes.
#[must_use]
pub fn to_displayed_on(
    real: RealPosition,
    offset: Vec3d,
    mode: SpoofMode,
    axes: Axes,
) -> DisplayedPosition {
    DisplayedPosition::from_vec(shift_each(real.vec(), offset, mode, axes, |v, o| v - o))
}

/// Displayed -> real on the given axes.
#[must_use]
pub fn to_real_on(
    displayed: DisplayedPosition,
    offset: Vec3d,
    mode: SpoofMode,
    axes: Axes,
) -> RealPosition {
    RealPosition::from_vec(shift_each(displayed.vec(), offset, mode, axes, |v, o| v + o))
}

/// Real block -> displayed block, shifted by the whole-block part of the
/// offset.
#[must_use]
pub fn block_to_displayed(real: BlockPos, offset: Vec3d, mode: SpoofMode, axes: Axes) -> BlockPos {
    match block_shift(offset, mode, axes) {
        Some(shift) => real.wrapping_sub(shift),
        None => real,
    }
}

/// Displayed block -> real block.
#[must_use]
pub fn block_to_real(displayed: BlockPos, offset: Vec3d, mode: SpoofMode, axes: Axes) -> BlockPos {
    match block_shift(offset, mode, axes) {
        Some(shift) => displayed.wrapping_add(shift),
        None => displayed,
    }
}

/// Applies `op` to every component of `sample` that can take it.
#[inline]
fn shift_each(
    sample: Vec3d,
    offset: Vec3d,
    mode: SpoofMode,
    axes: Axes,
    op: fn(f64, f64) -> f64,
) -> Vec3d {
    if !mode.is_active() || !offset.is_finite() {
        return sample;
    }
    let delta = axes.mask(offset);
    Vec3d::new(
        component(sample.x, delta.x, op),
        component(sample.y, delta.y, op),
        component(sample.z, delta.z, op),
    )
}

#[inline]
fn component(value: f64, delta: f64, op: fn(f64, f64) -> f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let shifted = op(value, delta);
    if shifted.is_finite() {
        shifted
    } else {
        value
    }
}

#[inline]
fn block_shift(offset: Vec3d, mode: SpoofMode, axes: Axes) -> Option<BlockPos> {
    if mode.is_active() && offset.is_finite() {
        Some(axes.mask(offset).trunc_block())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const OFFSET: Vec3d = Vec3d::new(100.0, 0.0, 100.0);

    #[test]
    fn test_server_position_is_shown_shifted() {
        let real = RealPosition::new(150.0, 64.0, 150.0);
        let shown = to_displayed(real, OFFSET, SpoofMode::Offset);
        assert_eq!(shown, DisplayedPosition::new(50.0, 64.0, 50.0));
    }

    #[test]
    fn test_client_report_is_restored() {
        let shown = DisplayedPosition::new(50.0, 64.0, 50.0);
        let real = to_real(shown, OFFSET, SpoofMode::Offset);
        assert_eq!(real, RealPosition::new(150.0, 64.0, 150.0));
    }

    #[test]
    fn test_zero_offset_is_invisible() {
        let real = RealPosition::new(-1234.5, 12.0, 98765.25);
        let shown = to_displayed(real, Vec3d::ZERO, SpoofMode::Offset);
        assert_eq!(shown.vec(), real.vec());
    }

    #[test]
    fn test_passthrough_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let v = Vec3d::new(
                rng.gen_range(-3.0e7..3.0e7),
                rng.gen_range(-64.0..320.0),
                rng.gen_range(-3.0e7..3.0e7),
            );
            let o = Vec3d::new(
                rng.gen_range(-1.0e6..1.0e6),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-1.0e6..1.0e6),
            );
            let shown = to_displayed(RealPosition::from_vec(v), o, SpoofMode::Passthrough);
            assert_eq!(shown.vec(), v);
            let real = to_real(DisplayedPosition::from_vec(v), o, SpoofMode::Passthrough);
            assert_eq!(real.vec(), v);
        }
    }

    #[test]
    fn test_round_trip_is_exact_on_game_grid() {
        // Coordinates on a 1/1024 grid inside the world border, whole-block
        // offsets: every intermediate is representable.
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let grid = |rng: &mut StdRng, span: i32| f64::from(rng.gen_range(-span..span)) / 1024.0;
            let real = RealPosition::new(
                grid(&mut rng, 1 << 30),
                grid(&mut rng, 1 << 18),
                grid(&mut rng, 1 << 30),
            );
            let offset = Vec3d::new(
                f64::from(rng.gen_range(-1_000_000i32..1_000_000)),
                0.0,
                f64::from(rng.gen_range(-1_000_000i32..1_000_000)),
            );
            let shown = to_displayed(real, offset, SpoofMode::Offset);
            assert_eq!(to_real(shown, offset, SpoofMode::Offset), real);
        }
    }

    #[test]
    fn test_round_trip_with_fractional_offset() {
        let offset = Vec3d::new(0.5, 0.25, -0.75);
        let real = RealPosition::new(10.0, 64.5, -3.25);
        let shown = to_displayed(real, offset, SpoofMode::Offset);
        assert_eq!(to_real(shown, offset, SpoofMode::Offset), real);
    }

    #[test]
    fn test_non_finite_components_pass_through_alone() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let real = RealPosition::new(bad, 64.0, 150.0);
            let shown = to_displayed(real, OFFSET, SpoofMode::Offset);
            if bad.is_nan() {
                assert!(shown.x().is_nan());
            } else {
                assert_eq!(shown.x(), bad);
            }
            assert_eq!(shown.y(), 64.0);
            assert_eq!(shown.z(), 50.0);

            let back = to_real(DisplayedPosition::new(50.0, bad, 50.0), OFFSET, SpoofMode::Offset);
            assert_eq!(back.x(), 150.0);
            assert_eq!(back.z(), 150.0);
        }
    }

    #[test]
    fn test_nan_height_does_not_leak_real_horizontal() {
        let real = RealPosition::new(150.0, f64::NAN, 150.0);
        let shown = to_displayed(real, OFFSET, SpoofMode::Offset);
        assert_eq!(shown.x(), 50.0);
        assert!(shown.y().is_nan());
        assert_eq!(shown.z(), 50.0);

        let restored = to_real_on(
            DisplayedPosition::new(50.0, f64::NAN, 50.0),
            OFFSET,
            SpoofMode::Offset,
            Axes::Horizontal,
        );
        assert_eq!(restored.x(), 150.0);
        assert!(restored.y().is_nan());
        assert_eq!(restored.z(), 150.0);
    }

    #[test]
    fn test_non_finite_offset_is_ignored() {
        let real = RealPosition::new(150.0, 64.0, 150.0);
        let shown = to_displayed(real, Vec3d::new(f64::NAN, 0.0, 100.0), SpoofMode::Offset);
        assert_eq!(shown.vec(), real.vec());
    }

    #[test]
    fn test_overflow_does_not_produce_infinity() {
        let real = RealPosition::new(f64::MAX, 64.0, 150.0);
        let shown = to_displayed(real, Vec3d::new(-f64::MAX, 0.0, 100.0), SpoofMode::Offset);
        assert_eq!(shown.vec(), Vec3d::new(f64::MAX, 64.0, 50.0));
    }

    #[test]
    fn test_horizontal_axes_leave_y_alone() {
        let offset = Vec3d::new(100.0, 30.0, 100.0);
        let shown = DisplayedPosition::new(50.0, 64.0, 50.0);
        let real = to_real_on(shown, offset, SpoofMode::Offset, Axes::Horizontal);
        assert_eq!(real, RealPosition::new(150.0, 64.0, 150.0));

        let full = to_real_on(shown, offset, SpoofMode::Offset, Axes::All);
        assert_eq!(full, RealPosition::new(150.0, 94.0, 150.0));
    }

    #[test]
    fn test_block_transform_scenario() {
        let real = BlockPos::new(200, 70, 200);
        let shown = block_to_displayed(real, OFFSET, SpoofMode::Offset, Axes::All);
        assert_eq!(shown, BlockPos::new(100, 70, 100));
        assert_eq!(block_to_real(shown, OFFSET, SpoofMode::Offset, Axes::All), real);
    }

    #[test]
    fn test_block_round_trip_with_fractional_offset() {
        let offset = Vec3d::new(100.9, 0.0, -100.9);
        let real = BlockPos::new(-5, 12, 7);
        let shown = block_to_displayed(real, offset, SpoofMode::Offset, Axes::All);
        assert_eq!(shown, BlockPos::new(-105, 12, 107));
        assert_eq!(block_to_real(shown, offset, SpoofMode::Offset, Axes::All), real);
    }

    #[test]
    fn test_block_passthrough() {
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(block_to_displayed(pos, OFFSET, SpoofMode::Passthrough, Axes::All), pos);
        assert_eq!(block_to_real(pos, OFFSET, SpoofMode::Passthrough, Axes::All), pos);
    }

    #[test]
    fn test_mode_helpers() {
        assert!(!SpoofMode::Passthrough.is_active());
        assert!(SpoofMode::Offset.is_active());
        assert_eq!(SpoofMode::Offset.toggled(), SpoofMode::Passthrough);
        assert_eq!(SpoofMode::default(), SpoofMode::Passthrough);
    }
}
