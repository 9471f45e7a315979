//! Scoped counting contexts
//!
//! A [`FlopCountingContext`] records the operations performed while it is
//! entered. Contexts nest: every open context sees every operation, not only
//! the innermost one. Leaving a context (dropping its [`ContextGuard`], also
//! during unwinding) freezes its tally for good.
//!
//! [`PauseFlopCounting`] suspends the global counter and every open context at
//! once, and restores exactly those sinks when dropped.
//!
//! ## Example
//!
//! ```rust
//! use counted_float_core::{CountedFloat, FlopCountingContext, PauseFlopCounting};
//!
//! let a = CountedFloat::new(1.0);
//! let b = CountedFloat::new(2.0);
//!
//! let outer = FlopCountingContext::new();
//! {
//!     let _outer = outer.enter().unwrap();
//!     let _ = a + b;
//!     {
//!         let _pause = PauseFlopCounting::new();
//!         let _ = a * b; // not counted anywhere
//!     }
//! }
//! assert_eq!(outer.flop_counts().add, 1);
//! assert_eq!(outer.flop_counts().total_count(), 1);
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CountingError, Result};
use crate::flop_counts::FlopCounts;
use crate::sinks::{generate_context_id, lock_registry, ContextId, ContextSink, ContextState, SharedContextSink};

// ================================================================================================
// FlopCountingContext
// ================================================================================================

/// Independent tally of the operations performed while entered
pub struct FlopCountingContext {
    id: ContextId,
    sink: SharedContextSink,
}

impl Default for FlopCountingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FlopCountingContext {
    /// A context that has not been entered yet (inactive, zero tally)
    pub fn new() -> Self {
        Self {
            id: generate_context_id(),
            sink: Arc::new(Mutex::new(ContextSink::new())),
        }
    }

    /// Start counting; counting stops when the returned guard is dropped
    ///
    /// A context can be entered only once.
    pub fn enter(&self) -> Result<ContextGuard<'_>> {
        if self.sink.lock().state != ContextState::Pending {
            return Err(CountingError::ContextAlreadyEntered);
        }
        Ok(ContextGuard::open(self))
    }

    /// Entered, not yet left and not paused
    pub fn is_active(&self) -> bool {
        self.sink.lock().is_active()
    }

    /// Entered and not yet left, paused or not
    pub fn is_open(&self) -> bool {
        self.sink.lock().state == ContextState::Open
    }

    /// Suspend counting in this context only; reentrant
    pub fn pause(&self) {
        let mut sink = self.sink.lock();
        sink.sink.pause();
        tracing::trace!(context = self.id, depth = sink.sink.pause_depth(), "flop_context_paused");
    }

    /// Undo one [`pause`](Self::pause); a no-op when not paused
    pub fn resume(&self) {
        let mut sink = self.sink.lock();
        sink.sink.resume();
        tracing::trace!(context = self.id, depth = sink.sink.pause_depth(), "flop_context_resumed");
    }

    /// Snapshot of the tally so far, or the final tally once left
    pub fn flop_counts(&self) -> FlopCounts {
        self.sink.lock().sink.counts()
    }

    /// Run `f` inside a fresh context and return its result with the operations it performed
    pub fn count_flops<T>(f: impl FnOnce() -> T) -> (T, FlopCounts) {
        let context = Self::new();
        let value = {
            let _guard = ContextGuard::open(&context);
            f()
        };
        (value, context.flop_counts())
    }

    fn close(&self) {
        let removed = lock_registry().unregister(self.id);
        let mut sink = self.sink.lock();
        sink.state = ContextState::Closed;
        tracing::debug!(
            context = self.id,
            was_registered = removed,
            total_count = sink.sink.counts().total_count(),
            "flop_context_closed"
        );
    }
}

impl fmt::Debug for FlopCountingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = self.sink.lock();
        f.debug_struct("FlopCountingContext")
            .field("id", &self.id)
            .field("state", &sink.state)
            .field("pause_depth", &sink.sink.pause_depth())
            .field("counts", &sink.sink.counts())
            .finish()
    }
}

/// Shorthand for [`FlopCountingContext::count_flops`]
pub fn count_flops<T>(f: impl FnOnce() -> T) -> (T, FlopCounts) {
    FlopCountingContext::count_flops(f)
}

// ================================================================================================
// ContextGuard
// ================================================================================================

/// Keeps a [`FlopCountingContext`] open; closes it on drop
#[must_use = "the context is closed as soon as the guard is dropped"]
pub struct ContextGuard<'a> {
    context: &'a FlopCountingContext,
}

impl<'a> ContextGuard<'a> {
    fn open(context: &'a FlopCountingContext) -> Self {
        // Mark open before registering so no broadcast sees a pending sink.
        context.sink.lock().state = ContextState::Open;
        lock_registry().register(context.id, Arc::clone(&context.sink));
        tracing::debug!(context = context.id, "flop_context_opened");
        Self { context }
    }
}

impl Deref for ContextGuard<'_> {
    type Target = FlopCountingContext;

    fn deref(&self) -> &FlopCountingContext {
        self.context
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.close();
    }
}

// ================================================================================================
// PauseFlopCounting
// ================================================================================================

/// Suspends the global counter and all currently open contexts until dropped
///
/// Contexts opened while the pause is in effect are not paused themselves, but
/// receive nothing either: delivery to any context requires the global counter
/// to be active.
#[must_use = "counting resumes as soon as the pause guard is dropped"]
pub struct PauseFlopCounting {
    paused: Vec<SharedContextSink>,
}

impl PauseFlopCounting {
    pub fn new() -> Self {
        let mut registry = lock_registry();
        registry.global.pause();
        let paused = registry.open_contexts();
        for sink in &paused {
            sink.lock().sink.pause();
        }
        tracing::debug!(
            contexts = paused.len(),
            global_depth = registry.global.pause_depth(),
            "flop_counting_paused"
        );
        Self { paused }
    }
}

impl Default for PauseFlopCounting {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PauseFlopCounting {
    fn drop(&mut self) {
        let mut registry = lock_registry();
        registry.global.resume();
        for sink in &self.paused {
            sink.lock().sink.resume();
        }
        tracing::debug!(
            contexts = self.paused.len(),
            global_depth = registry.global.pause_depth(),
            "flop_counting_resumed"
        );
    }
}

/// Run `f` with counting suspended everywhere
pub fn pause_flop_counting<T>(f: impl FnOnce() -> T) -> T {
    let _pause = PauseFlopCounting::new();
    f()
}
