//! The one message interceptor.

use super::traits::{InterceptOutcome, MessageInterceptor};
use crate::error::RewriteResult;
use crate::protocol::RewritableMessage;
use crate::rewrite::{self, RewriteOutcome};
use coordveil_core::SpoofState;
use coordveil_shared::{Direction, MessageKind};
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-direction counters.
#[derive(Debug, Default)]
struct DirectionStats {
    rewritten: AtomicU64,
    untouched: AtomicU64,
    failed: AtomicU64,
}

impl DirectionStats {
    fn record(&self, outcome: InterceptOutcome) {
        let counter = match outcome {
            InterceptOutcome::Rewritten => &self.rewritten,
            InterceptOutcome::Untouched => &self.untouched,
            InterceptOutcome::FailedOpen => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DirectionCounts {
        DirectionCounts {
            rewritten: self.rewritten.load(Ordering::Relaxed),
            untouched: self.untouched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Lock-free interception counters.
#[derive(Debug, Default)]
pub struct InterceptStats {
    inbound: DirectionStats,
    outbound: DirectionStats,
}

impl InterceptStats {
    fn record(&self, direction: Direction, outcome: InterceptOutcome) {
        match direction {
            Direction::Inbound => self.inbound.record(outcome),
            Direction::Outbound => self.outbound.record(outcome),
        }
    }

    /// Current counts. Each counter is read independently.
    #[must_use]
    pub fn snapshot(&self) -> InterceptStatsSnapshot {
        InterceptStatsSnapshot {
            inbound: self.inbound.snapshot(),
            outbound: self.outbound.snapshot(),
        }
    }
}

/// Counts for one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectionCounts {
    /// Messages whose coordinates were rewritten.
    pub rewritten: u64,
    /// Messages delivered unchanged by policy.
    pub untouched: u64,
    /// Messages delivered unchanged after a rewrite error.
    pub failed: u64,
}

impl DirectionCounts {
    /// Every message seen.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.rewritten + self.untouched + self.failed
    }
}

/// Point-in-time copy of [`InterceptStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InterceptStatsSnapshot {
    /// Server -> client.
    pub inbound: DirectionCounts,
    /// Client -> server.
    pub outbound: DirectionCounts,
}

/// Rewrites messages against the shared spoof state.
///
/// Settings are snapshotted once per message, so a message is never
/// rewritten with a half-applied offset change. Rewrite errors and panics
/// in host accessors are logged and counted; the message then goes through
/// exactly as it arrived.
#[derive(Debug)]
pub struct SpoofInterceptor {
    state: Arc<SpoofState>,
    stats: InterceptStats,
}

impl SpoofInterceptor {
    /// Creates an interceptor reading `state`.
    #[must_use]
    pub fn new(state: Arc<SpoofState>) -> Self {
        Self { state, stats: InterceptStats::default() }
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> InterceptStatsSnapshot {
        self.stats.snapshot()
    }

    fn intercept(&self, msg: &mut dyn RewritableMessage, direction: Direction) -> InterceptOutcome {
        let settings = self.state.snapshot();
        let kind = msg.kind();

        let planned =
            panic::catch_unwind(AssertUnwindSafe(|| rewrite::plan(&*msg, direction, &settings)));
        let outcome = match planned {
            Ok(Ok(RewriteOutcome::Untouched(_))) => InterceptOutcome::Untouched,
            Ok(Ok(intent @ RewriteOutcome::Rewritten { from, to })) => {
                match panic::catch_unwind(AssertUnwindSafe(|| msg.set_coordinates(to))) {
                    Ok(written) => Self::settle(kind, direction, written.map(|()| intent)),
                    Err(payload) => {
                        // The host may have stored part of the write before unwinding.
                        let restored =
                            panic::catch_unwind(AssertUnwindSafe(|| msg.set_coordinates(from)));
                        if !matches!(restored, Ok(Ok(()))) {
                            tracing::error!(
                                kind = %kind,
                                direction = direction.as_str(),
                                "could not restore coordinates after a failed write"
                            );
                        }
                        Self::panicked(kind, direction, payload.as_ref())
                    }
                }
            }
            Ok(Err(err)) => Self::settle(kind, direction, Err(err)),
            Err(payload) => Self::panicked(kind, direction, payload.as_ref()),
        };
        self.stats.record(direction, outcome);
        outcome
    }

    fn settle(
        kind: MessageKind,
        direction: Direction,
        result: RewriteResult<RewriteOutcome>,
    ) -> InterceptOutcome {
        match result {
            Ok(outcome @ RewriteOutcome::Rewritten { .. }) => {
                rewrite::trace_rewrite(kind, direction, outcome);
                InterceptOutcome::Rewritten
            }
            Ok(RewriteOutcome::Untouched(_)) => InterceptOutcome::Untouched,
            Err(err) => {
                tracing::warn!(
                    kind = %err.kind(),
                    direction = direction.as_str(),
                    error = %err,
                    "coordinate rewrite failed; delivering original message"
                );
                InterceptOutcome::FailedOpen
            }
        }
    }

    fn panicked(
        kind: MessageKind,
        direction: Direction,
        payload: &(dyn Any + Send),
    ) -> InterceptOutcome {
        let reason = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        tracing::warn!(
            kind = %kind,
            direction = direction.as_str(),
            panic = reason,
            "message accessor panicked; delivering original message"
        );
        InterceptOutcome::FailedOpen
    }
}

impl MessageInterceptor for SpoofInterceptor {
    fn on_receive(&self, msg: &mut dyn RewritableMessage) -> InterceptOutcome {
        self.intercept(msg, Direction::Inbound)
    }

    fn on_send(&self, msg: &mut dyn RewritableMessage) -> InterceptOutcome {
        self.intercept(msg, Direction::Outbound)
    }
}
