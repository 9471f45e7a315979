//! Reference data shipped with the crate
//!
//! Two embedded JSON documents seed the default weight tables:
//!
//! - `data/benchmarks.json` - [`FlopsBenchmarkResults`] keyed by platform
//! - `data/specs.json` - [`InstructionLatencies`] keyed by micro-architecture
//!
//! The benchmark entries carry an `illustrative-` key prefix: they are hand-tuned
//! placeholder timings, not a recorded run. Measured results written by
//! `flops-benchmark --results-json` can be added under their platform key.
//!
//! Each document is parsed on first access and cached for the lifetime of the
//! process.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{CountingError, Result};
use crate::models::{FlopsBenchmarkResults, InstructionLatencies};

const BENCHMARKS_JSON: &str = include_str!("../data/benchmarks.json");
const SPECS_JSON: &str = include_str!("../data/specs.json");

/// Accessor for the embedded reference data
pub struct BuiltInData;

impl BuiltInData {
    /// Benchmark results measured on reference platforms
    pub fn benchmarks() -> &'static BTreeMap<String, FlopsBenchmarkResults> {
        static BENCHMARKS: OnceLock<BTreeMap<String, FlopsBenchmarkResults>> = OnceLock::new();
        BENCHMARKS.get_or_init(|| load_or_empty("benchmarks.json", BENCHMARKS_JSON))
    }

    /// Instruction latency tables for reference micro-architectures
    pub fn specs() -> &'static BTreeMap<String, InstructionLatencies> {
        static SPECS: OnceLock<BTreeMap<String, InstructionLatencies>> = OnceLock::new();
        SPECS.get_or_init(|| load_or_empty("specs.json", SPECS_JSON))
    }
}

/// Parse a JSON object mapping identifiers to `T`
pub fn parse_keyed<T: serde::de::DeserializeOwned>(source_name: &str, json: &str) -> Result<BTreeMap<String, T>> {
    serde_json::from_str(json).map_err(|e| CountingError::invalid_data(source_name, e))
}

fn load_or_empty<T: serde::de::DeserializeOwned>(source_name: &str, json: &str) -> BTreeMap<String, T> {
    match parse_keyed(source_name, json) {
        Ok(entries) => {
            tracing::debug!(source = source_name, entries = entries.len(), "builtin_data_loaded");
            entries
        }
        Err(err) => {
            tracing::error!(source = source_name, error = %err, "builtin_data_invalid");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flop_type::FlopType;

    #[test]
    fn test_embedded_documents_parse() {
        let benchmarks: BTreeMap<String, FlopsBenchmarkResults> =
            parse_keyed("benchmarks.json", BENCHMARKS_JSON).unwrap();
        let specs: BTreeMap<String, InstructionLatencies> = parse_keyed("specs.json", SPECS_JSON).unwrap();
        assert_eq!(&benchmarks, BuiltInData::benchmarks());
        assert_eq!(&specs, BuiltInData::specs());
    }

    #[test]
    fn test_benchmarks() {
        let benchmarks = BuiltInData::benchmarks();
        assert!(!benchmarks.is_empty());
        // Shipped timings are placeholders, not a recorded run.
        assert!(benchmarks.keys().all(|k| k.starts_with("illustrative-")));
        for results in benchmarks.values() {
            assert_eq!(results.results_ns.flops.len(), FlopType::COUNT);
            assert!(results.flop_weights().is_ok());
        }
    }

    #[test]
    fn test_specs() {
        let specs = BuiltInData::specs();
        assert!(!specs.is_empty());
        for spec in specs.values() {
            let weights = spec.flop_weights().unwrap();
            assert_eq!(weights.get(FlopType::Add), 1.0);
        }
    }

    #[test]
    fn test_parse_keyed_reports_source() {
        let err = parse_keyed::<InstructionLatencies>("broken.json", "{ not json").unwrap_err();
        assert!(matches!(err, CountingError::InvalidData { source_name, .. } if source_name == "broken.json"));
    }
}
