//! # Spoof State
//!
//! The one piece of mutable state every hook reads.
//!
//! ## Access Pattern
//!
//! ```text
//! Network thread:  read  (every packet)
//! Render thread:   read  (every frame)
//! Control panel:   write (on user action)
//! ```
//!
//! Readers take a [`SpoofSettings`] copy and work from it, so one message
//! is always rewritten against one consistent (mode, offset) pair. A write
//! that lands between two messages is a benign transient.
//!
//! There is no global instance. The top-level controller owns an
//! `Arc<SpoofState>` and hands clones to the hooks.

mod settings;
mod shared;

pub use settings::{AxisPolicy, SpoofSettings};
pub use shared::SpoofState;
