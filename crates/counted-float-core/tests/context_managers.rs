//! Integration tests for counting contexts and the pause-everywhere scope
//!
//! Every test resets the global counter and runs serially: all counting state is
//! process-wide.

use counted_float_core::{global_counter, CountedFloat, FlopCountingContext, PauseFlopCounting};
use serial_test::serial;

fn operands() -> (CountedFloat, CountedFloat) {
    global_counter().reset();
    (CountedFloat::new(1.0), CountedFloat::new(2.0))
}

// ============================================================================
// FlopCountingContext
// ============================================================================

#[test]
#[serial]
fn test_context_is_active_only_while_entered() {
    global_counter().reset();
    let fcc = FlopCountingContext::new();

    let before = fcc.is_active();
    let during = {
        let _guard = fcc.enter().unwrap();
        fcc.is_active()
    };
    let after = fcc.is_active();

    assert!(!before);
    assert!(during);
    assert!(!after);
}

#[test]
#[serial]
fn test_context_counts_only_inside() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();

    let _ = cf1 / cf2;
    {
        let _guard = fcc.enter().unwrap();
        let _ = cf1 + cf2;
    }
    let _ = cf1 * cf2;

    let counts = fcc.flop_counts();
    assert_eq!(counts.total_count(), 1);
    assert_eq!(counts.add, 1);
}

#[test]
#[serial]
fn test_nested_contexts_both_observe() {
    let (cf1, cf2) = operands();
    let fcc1 = FlopCountingContext::new();
    let fcc2 = FlopCountingContext::new();

    let _ = cf1 / cf2;
    {
        let _outer = fcc1.enter().unwrap();
        let _ = cf1 + cf2;
        {
            let _inner = fcc2.enter().unwrap();
            let _ = cf1 * cf2;
        }
        let _ = cf1.pow(cf2);
    }

    let counts1 = fcc1.flop_counts();
    assert_eq!(counts1.total_count(), 3);
    assert_eq!(counts1.add, 1);
    assert_eq!(counts1.mul, 1);
    assert_eq!(counts1.pow, 1);

    let counts2 = fcc2.flop_counts();
    assert_eq!(counts2.total_count(), 1);
    assert_eq!(counts2.mul, 1);

    // The global counter saw everything, including the division outside any context.
    assert_eq!(global_counter().total_count(), 4);
}

#[test]
#[serial]
fn test_pause_resume_single_context() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();
    let mut active = Vec::new();

    {
        let _guard = fcc.enter().unwrap();
        active.push(fcc.is_active());
        let _ = cf1 + cf2;

        fcc.pause();
        active.push(fcc.is_active());
        let _ = cf1 * cf2;

        fcc.resume();
        active.push(fcc.is_active());
        let _ = cf1.pow(cf2);

        // leaving while paused is fine
        fcc.pause();
        active.push(fcc.is_active());
        let _ = cf1 - cf2;
    }
    active.push(fcc.is_active());

    let counts = fcc.flop_counts();
    assert_eq!(counts.total_count(), 2);
    assert_eq!(counts.add, 1);
    assert_eq!(counts.pow, 1);
    assert_eq!(active, vec![true, false, true, false, false]);
}

#[test]
#[serial]
fn test_pause_resume_nested_contexts_independently() {
    let (cf1, cf2) = operands();
    let fcc1 = FlopCountingContext::new();
    let fcc2 = FlopCountingContext::new();

    {
        let _outer = fcc1.enter().unwrap();
        let _inner = fcc2.enter().unwrap();

        let _ = cf1 + cf2; // both
        fcc2.pause();
        let _ = cf1 * cf2; // fcc1 only
        fcc2.resume();
        let _ = cf1.pow(cf2); // both
        fcc1.pause();
        let _ = cf1 - cf2; // fcc2 only
        fcc2.pause();
        let _ = cf1 / cf2; // neither
    }

    let counts1 = fcc1.flop_counts();
    assert_eq!(counts1.total_count(), 3);
    assert_eq!((counts1.add, counts1.mul, counts1.pow), (1, 1, 1));

    let counts2 = fcc2.flop_counts();
    assert_eq!(counts2.total_count(), 3);
    assert_eq!((counts2.add, counts2.pow, counts2.sub), (1, 1, 1));
}

#[test]
#[serial]
fn test_flop_counts_snapshots_and_final_tally() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();
    let mut totals = Vec::new();

    {
        let _guard = fcc.enter().unwrap();
        totals.push(fcc.flop_counts().total_count());
        let _ = cf1 + cf2;
        totals.push(fcc.flop_counts().total_count());
        let _ = cf1 * cf2;
        totals.push(fcc.flop_counts().total_count());
    }
    let _ = cf1 * cf2;
    totals.push(fcc.flop_counts().total_count());

    assert_eq!(totals, vec![0, 1, 2, 2]);
}

#[test]
#[serial]
fn test_guard_derefs_to_context() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();
    let guard = fcc.enter().unwrap();
    let _ = cf1 + cf2;
    assert_eq!(guard.flop_counts().add, 1);
    assert!(guard.is_open());
}

// ============================================================================
// PauseFlopCounting
// ============================================================================

#[test]
#[serial]
fn test_pause_flop_counting_everywhere() {
    let (cf1, cf2) = operands();
    let fcc1 = FlopCountingContext::new();
    let fcc2 = FlopCountingContext::new();
    let fcc3 = FlopCountingContext::new();

    {
        let _outer = fcc1.enter().unwrap();
        let _inner = fcc2.enter().unwrap();
        let _ = cf1 + cf2;
        {
            let _pause = PauseFlopCounting::new();
            let _ = cf1 / cf2;
            let _innermost = fcc3.enter().unwrap();
            assert!(fcc3.is_active());
            let _ = cf1 * cf2;
        }
    }

    assert_eq!(fcc1.flop_counts().total_count(), 1);
    assert_eq!(fcc2.flop_counts().total_count(), 1);
    assert_eq!(fcc3.flop_counts().total_count(), 0);
    assert_eq!(global_counter().total_count(), 1);
}

#[test]
#[serial]
fn test_pause_flop_counting_then_resume_counts_again() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();

    {
        let _guard = fcc.enter().unwrap();
        let _ = cf1 + cf2;
        {
            let _pause = PauseFlopCounting::new();
            let _ = cf1 * cf2;
        }
        let _ = cf1.pow(cf2);
    }

    let counts = fcc.flop_counts();
    assert_eq!(counts.add, 1);
    assert_eq!(counts.mul, 0);
    assert_eq!(counts.pow, 1);
    assert_eq!(counts.total_count(), 2);
}

#[test]
#[serial]
fn test_pause_keeps_explicitly_paused_context_paused() {
    let (cf1, cf2) = operands();
    let fcc = FlopCountingContext::new();

    {
        let _guard = fcc.enter().unwrap();
        fcc.pause();
        {
            let _pause = PauseFlopCounting::new();
        }
        assert!(!fcc.is_active());
        let _ = cf1 + cf2;
        fcc.resume();
        let _ = cf1 + cf2;
    }

    assert_eq!(fcc.flop_counts().add, 1);
}
