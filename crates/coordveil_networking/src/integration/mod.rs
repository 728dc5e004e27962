//! # Injection Points
//!
//! What the host integration layer calls, and what it implements.
//!
//! ```text
//! host network thread ──► MessageInterceptor::on_receive / on_send
//!                              │
//!                              └─► SpoofInterceptor ─► rewrite::* ─► message
//!
//! host render thread  ──► PositionAccessor::displayed_position()
//!                              │
//!                              └─► PositionSource (host) ─► to_displayed
//! ```
//!
//! The host implements [`PositionSource`] (and optionally
//! [`DisplaySurface`]); this crate implements [`MessageInterceptor`] once,
//! as [`SpoofInterceptor`]. Nothing here knows a host type.

pub mod accessor;
pub mod interceptor;
pub mod mocks;
pub mod traits;

pub use accessor::{DisplayFrame, DisplayedVec, PositionAccessor};
pub use interceptor::{DirectionCounts, InterceptStats, InterceptStatsSnapshot, SpoofInterceptor};
pub use traits::{DisplaySurface, InterceptOutcome, MessageInterceptor, PositionSource};
