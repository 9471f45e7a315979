//! Counting sinks and the process-wide sink registry
//!
//! A sink owns a [`FlopCounts`] tally and a pause depth. The registry holds the
//! one global sink plus every scoped context that is currently open, in the
//! order they were opened.
//!
//! ## Locking
//!
//! Everything lives behind `parking_lot` mutexes. When both are needed the
//! registry lock is taken before a context lock, never the other way round.
//!
//! ## Delivery
//!
//! An increment reaches the global sink and every open, unpaused context, but
//! only while the global sink itself is active. Pausing the global sink (which
//! is what [`PauseFlopCounting`](crate::PauseFlopCounting) does) therefore
//! silences every context, including ones opened during the pause.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::flop_counts::FlopCounts;
use crate::flop_type::FlopType;

// ================================================================================================
// Sink
// ================================================================================================

/// Tally plus reentrant pause depth
#[derive(Debug, Clone, Default)]
pub(crate) struct Sink {
    counts: FlopCounts,
    pause_depth: u32,
}

impl Sink {
    pub(crate) fn is_active(&self) -> bool {
        self.pause_depth == 0
    }

    pub(crate) fn pause(&mut self) {
        self.pause_depth += 1;
    }

    /// Resuming at depth 0 is a no-op
    pub(crate) fn resume(&mut self) {
        self.pause_depth = self.pause_depth.saturating_sub(1);
    }

    pub(crate) fn pause_depth(&self) -> u32 {
        self.pause_depth
    }

    #[inline]
    pub(crate) fn record(&mut self, flop_type: FlopType) {
        if self.is_active() {
            self.counts.incr(flop_type);
        }
    }

    pub(crate) fn counts(&self) -> FlopCounts {
        self.counts
    }

    /// Zero the tally and clear any pause depth
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

// ================================================================================================
// Scoped context sink
// ================================================================================================

/// Lifecycle of a scoped context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextState {
    Pending,
    Open,
    Closed,
}

/// Sink owned by one [`FlopCountingContext`](crate::FlopCountingContext)
#[derive(Debug)]
pub(crate) struct ContextSink {
    pub(crate) sink: Sink,
    pub(crate) state: ContextState,
}

impl ContextSink {
    pub(crate) fn new() -> Self {
        Self {
            sink: Sink::default(),
            state: ContextState::Pending,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state == ContextState::Open && self.sink.is_active()
    }
}

/// Shared handle to a context sink
pub(crate) type SharedContextSink = Arc<Mutex<ContextSink>>;

/// Identity of an open context within the registry
pub(crate) type ContextId = u64;

static CONTEXT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique id for a newly created context
pub(crate) fn generate_context_id() -> ContextId {
    CONTEXT_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// ================================================================================================
// Registry
// ================================================================================================

/// The global sink and the ordered set of open contexts
#[derive(Debug, Default)]
pub(crate) struct SinkRegistry {
    pub(crate) global: Sink,
    pub(crate) open: Vec<(ContextId, SharedContextSink)>,
}

lazy_static::lazy_static! {
    static ref SINK_REGISTRY: Mutex<SinkRegistry> = Mutex::new(SinkRegistry::default());
}

pub(crate) fn lock_registry() -> MutexGuard<'static, SinkRegistry> {
    SINK_REGISTRY.lock()
}

impl SinkRegistry {
    /// Deliver one increment to every active sink
    #[inline]
    pub(crate) fn broadcast(&mut self, flop_type: FlopType) {
        if !self.global.is_active() {
            return;
        }
        self.global.record(flop_type);
        for (_, context) in &self.open {
            let mut context = context.lock();
            if context.is_active() {
                context.sink.record(flop_type);
            }
        }
    }

    pub(crate) fn register(&mut self, id: ContextId, sink: SharedContextSink) {
        self.open.push((id, sink));
    }

    /// Remove a context by identity; returns whether it was open
    pub(crate) fn unregister(&mut self, id: ContextId) -> bool {
        let before = self.open.len();
        self.open.retain(|(open_id, _)| *open_id != id);
        self.open.len() != before
    }

    pub(crate) fn open_contexts(&self) -> Vec<SharedContextSink> {
        self.open.iter().map(|(_, sink)| Arc::clone(sink)).collect()
    }
}

/// Charge one operation to every active sink
#[inline]
pub(crate) fn record_flop(flop_type: FlopType) {
    lock_registry().broadcast(flop_type);
}
