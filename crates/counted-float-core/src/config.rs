//! Process-wide weight configuration
//!
//! The configured [`FlopWeights`] are used whenever a weighted cost is requested
//! without an explicit table. Until [`set_flop_weights`] is called, the built-in
//! consensus weights apply.

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::defaults::consensus_flop_weights;
use crate::flop_weights::FlopWeights;

fn weights_store() -> &'static RwLock<Option<FlopWeights>> {
    static STORE: OnceLock<RwLock<Option<FlopWeights>>> = OnceLock::new();
    STORE.get_or_init(|| RwLock::new(None))
}

/// Currently configured weights
pub fn get_flop_weights() -> FlopWeights {
    if let Some(weights) = weights_store().read().as_ref() {
        return weights.clone();
    }
    consensus_flop_weights(false)
}

/// Replace the weights used from now on
pub fn set_flop_weights(weights: FlopWeights) {
    tracing::info!(
        weights = ?weights.weights(),
        "flop_weights_configured"
    );
    *weights_store().write() = Some(weights);
}

/// Go back to the built-in consensus weights
pub fn reset_flop_weights() {
    tracing::info!("flop_weights_reset");
    *weights_store().write() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flop_type::FlopType;
    use serial_test::serial;

    fn dummy(start: usize) -> FlopWeights {
        FlopWeights::from_map(FlopType::iter().enumerate().map(|(i, t)| (t, (i + start) as f64)).collect()).unwrap()
    }

    #[test]
    #[serial]
    fn test_set_and_get() {
        reset_flop_weights();
        let initial = get_flop_weights();

        set_flop_weights(dummy(1));
        let first = get_flop_weights();
        set_flop_weights(dummy(2));
        let second = get_flop_weights();

        assert_ne!(initial, first);
        assert_ne!(first, second);
        assert_eq!(first, dummy(1));
        assert_eq!(second, dummy(2));

        reset_flop_weights();
    }

    #[test]
    #[serial]
    fn test_default_is_consensus() {
        reset_flop_weights();
        assert_eq!(get_flop_weights(), consensus_flop_weights(false));
    }
}
