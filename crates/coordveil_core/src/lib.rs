//! # COORDVEIL Core
//!
//! The coordinate-offset transform and the state it reads.
//!
//! ## The Invariant
//!
//! ```text
//! SERVER                     CLIENT
//!   R  ---- inbound ---->  D = R - O      (what the player sees)
//!   R  <--- outbound ----  D + O = R      (what the server receives)
//! ```
//!
//! Applied exactly once per message per direction. Everything that shows
//! a position to the player goes through [`transform::to_displayed`];
//! everything that hands a position back to the server goes through
//! [`transform::to_real`].
//!
//! ## Example
//!
//! ```rust
//! use coordveil_core::{transform, SpoofMode};
//! use coordveil_shared::{RealPosition, Vec3d};
//!
//! let offset = Vec3d::new(100.0, 0.0, 100.0);
//! let real = RealPosition::new(150.0, 64.0, 150.0);
//! let shown = transform::to_displayed(real, offset, SpoofMode::Offset);
//! assert_eq!(shown.vec(), Vec3d::new(50.0, 64.0, 50.0));
//! assert_eq!(transform::to_real(shown, offset, SpoofMode::Offset), real);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod jitter;
pub mod state;
pub mod transform;

pub use config::{OffsetConfig, SpoofConfig};
pub use error::{SpoofError, SpoofResult};
pub use jitter::Jitter;
pub use state::{AxisPolicy, SpoofSettings, SpoofState};
pub use transform::{Axes, SpoofMode};
