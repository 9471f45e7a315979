//! Default weight tables derived from the built-in reference data
//!
//! - theoretical: geometric mean over all latency tables, relative to ADD
//! - empirical: geometric mean over all benchmark results, relative to ADD
//! - consensus: per-category geometric mean of the two, so it always lies
//!   between them
//!
//! Rounded tables are the unrounded ones passed through [`FlopWeights::round`].

use std::collections::BTreeMap;

use crate::builtin_data::BuiltInData;
use crate::error::Result;
use crate::flop_type::FlopType;
use crate::flop_weights::FlopWeights;

/// Weights derived from published instruction latencies
pub fn theoretical_flop_weights(rounded: bool) -> FlopWeights {
    let tables = BuiltInData::specs().values().map(|spec| spec.flop_weights());
    finish(geometric_mean_of("specs", tables), rounded)
}

/// Weights derived from the built-in benchmark measurements
pub fn empirical_flop_weights(rounded: bool) -> FlopWeights {
    let tables = BuiltInData::benchmarks().values().map(|results| results.flop_weights());
    finish(geometric_mean_of("benchmarks", tables), rounded)
}

/// Per-category geometric mean of the theoretical and empirical weights
pub fn consensus_flop_weights(rounded: bool) -> FlopWeights {
    let tables = [Ok(theoretical_flop_weights(false)), Ok(empirical_flop_weights(false))];
    finish(geometric_mean_of("consensus", tables), rounded)
}

fn finish(weights: FlopWeights, rounded: bool) -> FlopWeights {
    if rounded {
        weights.round()
    } else {
        weights
    }
}

/// Per-category geometric mean; invalid tables are skipped and an empty input
/// yields uniform weights.
fn geometric_mean_of(source: &str, tables: impl IntoIterator<Item = Result<FlopWeights>>) -> FlopWeights {
    let mut log_sums: BTreeMap<FlopType, f64> = BTreeMap::new();
    let mut n_tables = 0usize;

    for table in tables {
        match table {
            Ok(weights) => {
                for (&t, &w) in weights.weights() {
                    *log_sums.entry(t).or_default() += w.ln();
                }
                n_tables += 1;
            }
            Err(err) => tracing::warn!(source, error = %err, "weight_table_skipped"),
        }
    }

    if n_tables == 0 {
        tracing::warn!(source, "no_weight_tables_available");
        return FlopWeights::uniform();
    }

    let n = n_tables as f64;
    FlopWeights::from_map(log_sums.into_iter().map(|(t, s)| (t, (s / n).exp())).collect())
        .unwrap_or_else(|_| FlopWeights::uniform())
}
