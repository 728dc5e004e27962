//! # COORDVEIL Networking
//!
//! Classifies and rewrites game messages so the server keeps seeing real
//! coordinates while the client sees shifted ones.
//!
//! ## Architecture
//!
//! - **Protocol**: the [`RewritableMessage`] capability and a plain-struct
//!   reference model of every message kind
//! - **Rewrite**: closed allow-list classification and in-place rewriting
//! - **Integration**: the interceptor the host network layer calls, and
//!   the accessor its overlays read
//! - **Controller**: owns the state and is the only mutation path
//!
//! ## Direction Rules
//!
//! ```text
//! SERVER                                     CLIENT
//!   |--- block / particle / sound / entity --->|   shifted by -offset
//!   |--- player position (authoritative) ----->|   NOT rewritten
//!   |<-- player move (authoritative) ----------|   restored by +offset (x, z)
//!   |<-- block interact / dig -----------------|   restored by +offset
//! ```
//!
//! Every failure is fail-open: the message goes through unmodified.
//!
//! ## Example
//!
//! ```rust
//! use coordveil_networking::{
//!     protocol::{BlockUpdate, Message},
//!     MessageInterceptor, SpoofController,
//! };
//! use coordveil_core::SpoofMode;
//! use coordveil_shared::BlockPos;
//!
//! let controller = SpoofController::default();
//! controller.set_offset(100.0, 0.0, 100.0).expect("finite offset");
//! controller.set_mode(SpoofMode::Offset);
//!
//! let interceptor = controller.interceptor();
//! let mut msg: Message = BlockUpdate { pos: BlockPos::new(200, 70, 200), state_id: 1 }.into();
//! interceptor.on_receive(&mut msg);
//! assert_eq!(msg, BlockUpdate { pos: BlockPos::new(100, 70, 100), state_id: 1 }.into());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod controller;
pub mod error;
pub mod integration;
pub mod protocol;
pub mod rewrite;

pub use controller::{SpoofController, SpoofStatus};
pub use error::{RewriteError, RewriteResult};
pub use integration::{
    DisplayFrame, DisplaySurface, InterceptOutcome, MessageInterceptor, PositionAccessor,
    PositionSource, SpoofInterceptor,
};
pub use protocol::{Coordinates, Message, RewritableMessage};
pub use rewrite::{
    classify, plan, rewrite_inbound, rewrite_outbound, RewriteOutcome, UntouchedReason,
};
