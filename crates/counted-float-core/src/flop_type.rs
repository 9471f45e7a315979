//! The closed taxonomy of countable floating-point operations
//!
//! Every operation performed on a [`CountedFloat`](crate::CountedFloat) is charged
//! to exactly one [`FlopType`]. The declaration order below is the canonical
//! iteration and serialization order used by counts, weights and benchmarks.

use std::fmt;
use std::str::FromStr;

use crate::error::CountingError;

/// Category of an elementary floating-point operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlopType {
    // Unary and comparisons
    Abs,
    Minus,
    Equals,
    Gte,
    Lte,
    CmpZero,
    Rnd,

    // Binary arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Roots, powers and logarithms
    Sqrt,
    Pow2,
    Log2,
    Pow,
}

impl FlopType {
    /// Number of categories
    pub const COUNT: usize = 15;

    /// All categories in canonical order
    pub const ALL: [FlopType; FlopType::COUNT] = [
        FlopType::Abs,
        FlopType::Minus,
        FlopType::Equals,
        FlopType::Gte,
        FlopType::Lte,
        FlopType::CmpZero,
        FlopType::Rnd,
        FlopType::Add,
        FlopType::Sub,
        FlopType::Mul,
        FlopType::Div,
        FlopType::Sqrt,
        FlopType::Pow2,
        FlopType::Log2,
        FlopType::Pow,
    ];

    /// Iterate over all categories in canonical order
    pub fn iter() -> impl Iterator<Item = FlopType> + Clone {
        Self::ALL.into_iter()
    }

    /// Position of this category in [`FlopType::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical short code, used as the serialized form (e.g. `"cmp_zero"`)
    pub const fn as_str(self) -> &'static str {
        match self {
            FlopType::Abs => "abs",
            FlopType::Minus => "minus",
            FlopType::Equals => "equals",
            FlopType::Gte => "gte",
            FlopType::Lte => "lte",
            FlopType::CmpZero => "cmp_zero",
            FlopType::Rnd => "rnd",
            FlopType::Add => "add",
            FlopType::Sub => "sub",
            FlopType::Mul => "mul",
            FlopType::Div => "div",
            FlopType::Sqrt => "sqrt",
            FlopType::Pow2 => "pow2",
            FlopType::Log2 => "log2",
            FlopType::Pow => "pow",
        }
    }

    /// Upper-case member name (e.g. `"CMP_ZERO"`), also the field label in [`FlopCounts`](crate::FlopCounts)
    pub const fn name(self) -> &'static str {
        match self {
            FlopType::Abs => "ABS",
            FlopType::Minus => "MINUS",
            FlopType::Equals => "EQUALS",
            FlopType::Gte => "GTE",
            FlopType::Lte => "LTE",
            FlopType::CmpZero => "CMP_ZERO",
            FlopType::Rnd => "RND",
            FlopType::Add => "ADD",
            FlopType::Sub => "SUB",
            FlopType::Mul => "MUL",
            FlopType::Div => "DIV",
            FlopType::Sqrt => "SQRT",
            FlopType::Pow2 => "POW2",
            FlopType::Log2 => "LOG2",
            FlopType::Pow => "POW",
        }
    }

    /// Human-readable description
    pub const fn long_name(self) -> &'static str {
        match self {
            FlopType::Abs => "absolute value",
            FlopType::Minus => "negation",
            FlopType::Equals => "equality comparison",
            FlopType::Gte => "greater-or-equal comparison",
            FlopType::Lte => "less-or-equal comparison",
            FlopType::CmpZero => "comparison with zero",
            FlopType::Rnd => "rounding",
            FlopType::Add => "addition",
            FlopType::Sub => "subtraction",
            FlopType::Mul => "multiplication",
            FlopType::Div => "division",
            FlopType::Sqrt => "square root",
            FlopType::Pow2 => "power of two",
            FlopType::Log2 => "base-2 logarithm",
            FlopType::Pow => "general power",
        }
    }

    /// Does this category describe a comparison?
    pub const fn is_comparison(self) -> bool {
        matches!(self, FlopType::Equals | FlopType::Gte | FlopType::Lte | FlopType::CmpZero)
    }
}

impl fmt::Display for FlopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlopType {
    type Err = CountingError;

    /// Accepts the short code or the member name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FlopType::iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted) || t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CountingError::UnknownFlopType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = FlopType::iter().map(FlopType::name).collect();
        assert_eq!(
            names,
            [
                "ABS", "MINUS", "EQUALS", "GTE", "LTE", "CMP_ZERO", "RND", "ADD", "SUB", "MUL", "DIV", "SQRT", "POW2",
                "LOG2", "POW"
            ]
        );
        for (i, t) in FlopType::iter().enumerate() {
            assert_eq!(t.index(), i);
        }
        assert!(FlopType::Abs < FlopType::Pow);
    }

    #[test]
    fn test_names_are_unique() {
        let codes: HashSet<_> = FlopType::iter().map(FlopType::as_str).collect();
        let long_names: HashSet<_> = FlopType::iter().map(FlopType::long_name).collect();
        assert_eq!(codes.len(), FlopType::COUNT);
        assert_eq!(long_names.len(), FlopType::COUNT);
    }

    #[test]
    fn test_from_str() {
        for t in FlopType::iter() {
            assert_eq!(t.as_str().parse::<FlopType>().unwrap(), t);
            assert_eq!(t.name().parse::<FlopType>().unwrap(), t);
        }
        assert_eq!("Cmp_Zero".parse::<FlopType>().unwrap(), FlopType::CmpZero);
        assert!(matches!(
            "fma".parse::<FlopType>(),
            Err(CountingError::UnknownFlopType(s)) if s == "fma"
        ));
    }

    #[test]
    fn test_serde_uses_short_code() {
        for t in FlopType::iter() {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
            let back: FlopType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn test_comparison_categories() {
        let comparisons: Vec<_> = FlopType::iter().filter(|t| t.is_comparison()).collect();
        assert_eq!(
            comparisons,
            vec![FlopType::Equals, FlopType::Gte, FlopType::Lte, FlopType::CmpZero]
        );
    }
}
