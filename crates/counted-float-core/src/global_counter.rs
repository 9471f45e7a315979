//! The process-wide flop counter
//!
//! Every counted operation lands here (unless paused), regardless of which
//! scoped contexts are open. The counter starts active with a zero tally and
//! lives for the whole process; [`GlobalFlopCounter::reset`] is the only way to
//! start over.
//!
//! ## Example
//!
//! ```rust
//! use counted_float_core::{global_counter, CountedFloat};
//!
//! let counter = global_counter();
//! counter.reset();
//!
//! let _ = CountedFloat::new(1.5) * 2.0;
//! assert_eq!(counter.flop_counts().mul, 1);
//! ```

use crate::flop_counts::FlopCounts;
use crate::flop_type::FlopType;
use crate::sinks::{lock_registry, record_flop};

/// Handle to the global sink
///
/// Increments made through this handle are delivered exactly like those made by
/// [`CountedFloat`](crate::CountedFloat) operations: to the global tally and to
/// every open, unpaused scoped context.
#[derive(Debug)]
pub struct GlobalFlopCounter {
    _private: (),
}

static GLOBAL_COUNTER: GlobalFlopCounter = GlobalFlopCounter { _private: () };

/// The process-wide counter
pub fn global_counter() -> &'static GlobalFlopCounter {
    &GLOBAL_COUNTER
}

macro_rules! incr_methods {
    ($($method:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Count one [`FlopType::", stringify!($variant), "`] operation")]
            #[inline]
            pub fn $method(&self) {
                self.incr(FlopType::$variant);
            }
        )*
    };
}

impl GlobalFlopCounter {
    /// Count one operation of the given category
    #[inline]
    pub fn incr(&self, flop_type: FlopType) {
        record_flop(flop_type);
    }

    incr_methods! {
        incr_abs => Abs,
        incr_minus => Minus,
        incr_equals => Equals,
        incr_gte => Gte,
        incr_lte => Lte,
        incr_cmp_zero => CmpZero,
        incr_rnd => Rnd,
        incr_add => Add,
        incr_sub => Sub,
        incr_mul => Mul,
        incr_div => Div,
        incr_sqrt => Sqrt,
        incr_pow2 => Pow2,
        incr_log2 => Log2,
        incr_pow => Pow,
    }

    /// Independent snapshot of the global tally
    pub fn flop_counts(&self) -> FlopCounts {
        lock_registry().global.counts()
    }

    pub fn total_count(&self) -> i64 {
        self.flop_counts().total_count()
    }

    /// Current count of one category
    pub fn get(&self, flop_type: FlopType) -> i64 {
        self.flop_counts().get(flop_type)
    }

    pub fn is_active(&self) -> bool {
        lock_registry().global.is_active()
    }

    /// Suspend counting; each pause needs a matching [`resume`](Self::resume)
    pub fn pause(&self) {
        let mut registry = lock_registry();
        registry.global.pause();
        tracing::trace!(depth = registry.global.pause_depth(), "global_counter_paused");
    }

    /// Undo one [`pause`](Self::pause); a no-op when not paused
    pub fn resume(&self) {
        let mut registry = lock_registry();
        registry.global.resume();
        tracing::trace!(depth = registry.global.pause_depth(), "global_counter_resumed");
    }

    /// Zero the tally and force the counter active again
    pub fn reset(&self) {
        let mut registry = lock_registry();
        let depth = registry.global.pause_depth();
        registry.global.reset();
        tracing::debug!(cleared_pause_depth = depth, "global_counter_reset");
    }
}
