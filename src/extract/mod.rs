//! Price extraction from unstructured page text
//!
//! Every pattern rule runs over the same text and contributes candidates.
//! Candidates outside the plausibility bounds are discarded, the rest are
//! deduplicated and reduced to a single value:
//! - one distinct value → that value
//! - several → the element at index `n / 2` of the ascending set
//!
//! # Example
//!
//! ```
//! use price_scout::extract::PriceExtractor;
//!
//! let extractor = PriceExtractor::default();
//! assert_eq!(extractor.extract("Deal of the day: ₹24,999"), Some(24999.0));
//! assert_eq!(extractor.extract("call 1800 123 456"), None);
//! ```

mod rules;

pub use rules::{builtin_rules, PatternRule, SiteHint};

use crate::config::ExtractionConfig;
use crate::ConfigError;

/// Closed interval of prices considered plausible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::new(1000.0, 200_000.0)
    }
}

/// Applies the pattern rules and the selection policy
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    rules: Vec<PatternRule>,
    bounds: PriceBounds,
}

impl PriceExtractor {
    /// Creates an extractor with the built-in rules
    pub fn new(bounds: PriceBounds) -> Self {
        Self {
            rules: builtin_rules(),
            bounds,
        }
    }

    /// Creates an extractor from configuration: built-in rules followed by
    /// any configured ones
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let mut extractor = Self::new(PriceBounds::new(config.min_price, config.max_price));
        for entry in &config.rules {
            extractor.rules.push(PatternRule::custom(&entry.name, &entry.pattern)?);
        }
        Ok(extractor)
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Collects every in-bounds value matched by any rule, in rule order
    pub fn candidates(&self, text: &str) -> Vec<f64> {
        let mut values = Vec::new();

        for rule in &self.rules {
            for raw in rule.candidates(text) {
                let Ok(value) = raw.replace(',', "").parse::<f64>() else {
                    continue;
                };

                if self.bounds.contains(value) {
                    values.push(value);
                }
            }
        }

        values
    }

    /// Extracts the best-guess price from `text`
    pub fn extract(&self, text: &str) -> Option<f64> {
        let price = select_price(self.candidates(text));
        tracing::trace!(?price, "Extracted price");
        price
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(PriceBounds::default())
    }
}

/// Reduces candidate values to one: dedup, sort ascending, take index `n / 2`
pub fn select_price(mut values: Vec<f64>) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values.get(values.len() / 2).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleEntry;

    #[test]
    fn test_no_matches_returns_none() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract(""), None);
        assert_eq!(extractor.extract("no prices here, just 25999 plain digits"), None);
    }

    #[test]
    fn test_single_match_returned_exactly() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("Buy now for ₹25,999"), Some(25999.0));
        assert_eq!(extractor.extract("₹1,234.50"), Some(1234.5));
    }

    #[test]
    fn test_non_ascii_digits_are_not_prices() {
        let extractor = PriceExtractor::default();
        assert!(extractor.candidates("₹२५,९९९").is_empty());
        assert_eq!(extractor.extract("₹२५,९९९"), None);
        assert_eq!(extractor.extract("₹२५,९९९ (₹25,999)"), Some(25999.0));
    }

    #[test]
    fn test_same_value_from_many_rules_is_one_candidate() {
        let extractor = PriceExtractor::default();
        let text = r#"<div class="_30jeq3 _16Jk6d">₹25,999</div> price ₹25,999 only"#;
        assert!(extractor.candidates(text).len() > 1);
        assert_eq!(extractor.extract(text), Some(25999.0));
    }

    #[test]
    fn test_median_of_three_distinct_values() {
        let extractor = PriceExtractor::default();
        let text = "₹999,999 ₹1,500 ₹2,500 ₹3,500";
        assert_eq!(extractor.extract(text), Some(2500.0));
    }

    #[test]
    fn test_upper_middle_of_two_values() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("₹1,500 and ₹2,500"), Some(2500.0));
    }

    #[test]
    fn test_out_of_range_values_excluded() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("₹50"), None);
        assert_eq!(extractor.extract("₹999,999"), None);
        assert!(extractor.candidates("₹50 ₹999,999 ₹999.99").is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("₹1,000"), Some(1000.0));
        assert_eq!(extractor.extract("₹2,00,000"), Some(200_000.0));
    }

    #[test]
    fn test_unparseable_token_dropped() {
        let extractor = PriceExtractor::default();
        // A bare comma matches the digit class but cannot be parsed
        assert_eq!(extractor.extract("₹, ₹5,000"), Some(5000.0));
    }

    #[test]
    fn test_custom_bounds() {
        let extractor = PriceExtractor::new(PriceBounds::new(10.0, 100.0));
        assert_eq!(extractor.extract("₹50"), Some(50.0));
        assert_eq!(extractor.extract("₹5,000"), None);
    }

    #[test]
    fn test_from_config_appends_rules() {
        let config = ExtractionConfig {
            min_price: 1000.0,
            max_price: 200_000.0,
            rules: vec![RuleEntry {
                name: "inr-code".to_string(),
                pattern: r"INR\s*([\d,]+)".to_string(),
            }],
        };
        let extractor = PriceExtractor::from_config(&config).unwrap();

        assert_eq!(extractor.rules().len(), builtin_rules().len() + 1);
        assert_eq!(extractor.extract("INR 45,000"), Some(45000.0));
    }

    #[test]
    fn test_select_price() {
        assert_eq!(select_price(vec![]), None);
        assert_eq!(select_price(vec![7.0]), Some(7.0));
        assert_eq!(select_price(vec![3.0, 1.0, 2.0, 2.0]), Some(2.0));
        assert_eq!(select_price(vec![4.0, 1.0, 3.0, 2.0]), Some(3.0));
    }
}
