//! Per-category cost weights
//!
//! A [`FlopWeights`] table assigns a relative cost to every [`FlopType`]. Tables
//! are always complete: construction fails unless each of the 15 categories has
//! exactly one weight.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CountingError, Result};
use crate::flop_counts::FlopCounts;
use crate::flop_type::FlopType;

/// Complete mapping from [`FlopType`] to a relative cost
///
/// Serializes as `{ "weights": { "<code>": weight, ... } }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawFlopWeights")]
pub struct FlopWeights {
    weights: BTreeMap<FlopType, f64>,
}

#[derive(serde::Deserialize)]
struct RawFlopWeights {
    weights: BTreeMap<String, f64>,
}

impl TryFrom<RawFlopWeights> for FlopWeights {
    type Error = CountingError;

    fn try_from(raw: RawFlopWeights) -> Result<Self> {
        FlopWeights::from_named(raw.weights)
    }
}

impl FlopWeights {
    /// Build from a mapping keyed by [`FlopType`]
    pub fn from_map(weights: BTreeMap<FlopType, f64>) -> Result<Self> {
        let missing: Vec<FlopType> = FlopType::iter().filter(|t| !weights.contains_key(t)).collect();
        if !missing.is_empty() {
            return Err(CountingError::InvalidWeights {
                missing,
                unexpected: Vec::new(),
            });
        }
        for (&flop_type, &value) in &weights {
            if !value.is_finite() || value < 0.0 {
                return Err(CountingError::InvalidWeightValue { flop_type, value });
            }
        }
        Ok(Self { weights })
    }

    /// Build from a mapping keyed by short code or member name
    ///
    /// Keys are matched case-insensitively. Keys naming no category are reported
    /// as unexpected. When two keys name the same category the first one is kept
    /// and the later one is reported as unexpected.
    pub fn from_named<K: AsRef<str>>(weights: impl IntoIterator<Item = (K, f64)>) -> Result<Self> {
        let mut parsed = BTreeMap::new();
        let mut unexpected = Vec::new();
        for (key, value) in weights {
            let key = key.as_ref();
            match key.parse::<FlopType>() {
                Ok(t) if !parsed.contains_key(&t) => {
                    parsed.insert(t, value);
                }
                _ => unexpected.push(key.to_string()),
            }
        }

        let missing: Vec<FlopType> = FlopType::iter().filter(|t| !parsed.contains_key(t)).collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(CountingError::InvalidWeights { missing, unexpected });
        }
        Self::from_map(parsed)
    }

    /// Every category weighs 1
    pub fn uniform() -> Self {
        Self {
            weights: FlopType::iter().map(|t| (t, 1.0)).collect(),
        }
    }

    /// Weight of one category
    pub fn get(&self, flop_type: FlopType) -> f64 {
        // Completeness is checked on construction.
        self.weights.get(&flop_type).copied().unwrap_or_default()
    }

    /// The underlying mapping, always with 15 entries
    pub fn weights(&self) -> &BTreeMap<FlopType, f64> {
        &self.weights
    }

    /// Copy with every weight rounded to the nearest integer
    pub fn round(&self) -> Self {
        self.map_values(f64::round)
    }

    /// Copy with `f` applied to every weight
    pub(crate) fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            weights: self.weights.iter().map(|(&t, &w)| (t, f(w))).collect(),
        }
    }

    /// `Σ count[t] * weight[t]`
    pub fn weighted_cost(&self, counts: &FlopCounts) -> f64 {
        counts.iter().map(|(t, count)| count as f64 * self.get(t)).sum()
    }

    /// Is every weight a whole number?
    pub fn is_integral(&self) -> bool {
        self.weights.values().all(|w| w.fract() == 0.0)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CountingError::invalid_data("FlopWeights", e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CountingError::invalid_data("FlopWeights", e))
    }
}

impl fmt::Display for FlopWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>10}", "flop_type", "weight")?;
        for (t, w) in &self.weights {
            writeln!(f, "{:<10} {:>10.3}", t.name(), w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_enum() -> BTreeMap<FlopType, f64> {
        FlopType::iter().enumerate().map(|(i, t)| (t, (i + 1) as f64)).collect()
    }

    fn by_code() -> BTreeMap<String, f64> {
        by_enum().into_iter().map(|(t, w)| (t.as_str().to_string(), w)).collect()
    }

    #[test]
    fn test_construction_by_enum_and_by_code() {
        let a = FlopWeights::from_map(by_enum()).unwrap();
        let b = FlopWeights::from_named(by_code()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.weights().len(), FlopType::COUNT);
        assert_eq!(a.get(FlopType::Pow), 15.0);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let mut weights = by_enum();
        weights.remove(&FlopType::Abs);
        match FlopWeights::from_map(weights) {
            Err(CountingError::InvalidWeights { missing, unexpected }) => {
                assert_eq!(missing, vec![FlopType::Abs]);
                assert!(unexpected.is_empty());
            }
            other => panic!("expected InvalidWeights, got {other:?}"),
        }

        let mut named = by_code();
        named.remove("abs");
        assert!(matches!(
            FlopWeights::from_named(named),
            Err(CountingError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_unexpected_key_is_rejected() {
        let mut named = by_code();
        named.insert("fma".to_string(), 4.0);
        match FlopWeights::from_named(named) {
            Err(CountingError::InvalidWeights { missing, unexpected }) => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["fma".to_string()]);
            }
            other => panic!("expected InvalidWeights, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let mut weights = by_enum();
        weights.insert(FlopType::Div, f64::NAN);
        assert!(matches!(
            FlopWeights::from_map(weights),
            Err(CountingError::InvalidWeightValue {
                flop_type: FlopType::Div,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let mut weights = by_enum();
        weights.insert(FlopType::Sqrt, -1.0);
        assert!(matches!(
            FlopWeights::from_map(weights),
            Err(CountingError::InvalidWeightValue {
                flop_type: FlopType::Sqrt,
                ..
            })
        ));

        let all_negative = FlopType::iter().map(|t| (t, -1.0)).collect();
        assert!(FlopWeights::from_map(all_negative).is_err());

        let mut zero = by_enum();
        zero.insert(FlopType::Minus, 0.0);
        assert_eq!(FlopWeights::from_map(zero).unwrap().get(FlopType::Minus), 0.0);
    }

    #[test]
    fn test_duplicate_key_keeps_first_and_reports_second() {
        let mut named: Vec<(String, f64)> = by_code().into_iter().collect();
        named.push(("ADD".to_string(), 7.0));
        match FlopWeights::from_named(named) {
            Err(CountingError::InvalidWeights { missing, unexpected }) => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["ADD".to_string()]);
            }
            other => panic!("expected InvalidWeights, got {other:?}"),
        }
    }

    #[test]
    fn test_serialization_uses_codes() {
        let weights = FlopWeights::from_named(by_code()).unwrap();
        let value = serde_json::to_value(&weights).unwrap();
        let expected = serde_json::json!({ "weights": by_code() });
        assert_eq!(value, expected);

        let back = FlopWeights::from_json(&weights.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn test_deserialization_validates() {
        let json = r#"{ "weights": { "add": 1.0 } }"#;
        assert!(FlopWeights::from_json(json).is_err());
    }

    #[test]
    fn test_round_and_weighted_cost() {
        let weights = FlopWeights::from_map(FlopType::iter().map(|t| (t, 1.4)).collect()).unwrap();
        let rounded = weights.round();
        assert!(rounded.is_integral());
        assert!(!weights.is_integral());
        assert_eq!(rounded.get(FlopType::Mul), 1.0);

        let counts: FlopCounts = [FlopType::Add, FlopType::Mul, FlopType::Mul].into_iter().collect();
        assert!((weights.weighted_cost(&counts) - 4.2).abs() < 1e-12);
        assert_eq!(rounded.weighted_cost(&counts), 3.0);
    }

    #[test]
    fn test_uniform() {
        let counts: FlopCounts = [FlopType::Pow, FlopType::Abs].into_iter().collect();
        assert_eq!(FlopWeights::uniform().weighted_cost(&counts), 2.0);
    }

    #[test]
    fn test_display_lists_all_categories() {
        let text = FlopWeights::from_map(by_enum()).unwrap().to_string();
        for t in FlopType::iter() {
            assert!(text.contains(t.name()));
        }
    }
}
