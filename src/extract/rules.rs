//! Pattern rules for locating price tokens in page text
//!
//! Each rule is an independent matcher tuned to one shape of embedded price
//! data. A rule only yields raw numeric strings; parsing and filtering happen
//! in the extractor.

use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Which kind of page a rule was written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteHint {
    Amazon,
    Flipkart,
    Generic,
    /// Supplied through configuration
    Custom,
}

/// Built-in rules as (name, site, pattern). The first capture group holds the
/// numeric token. Digits are ASCII only; other scripts' digits never parse.
const BUILTIN_RULES: &[(&str, SiteHint, &str)] = &[
    ("symbol-amount", SiteHint::Generic, r"₹\s*([0-9,]+(?:\.[0-9]{1,2})?)"),
    (
        "json-price-field",
        SiteHint::Amazon,
        r#""price":\s*"₹([0-9,]+(?:\.[0-9]{1,2})?)""#,
    ),
    (
        "deal-price-block",
        SiteHint::Amazon,
        r"priceblock_dealprice[^>]*>₹\s*([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "our-price-block",
        SiteHint::Amazon,
        r"priceblock_ourprice[^>]*>₹\s*([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    ("price-whole", SiteHint::Amazon, r"a-price-whole[^>]*>([0-9,]+)"),
    ("price-div", SiteHint::Flipkart, r"₹([0-9,]+)\s*</div>"),
    (
        "selling-price-json",
        SiteHint::Flipkart,
        r#""sellingPrice":\s*\{\s*"amount":\s*([0-9,]+)"#,
    ),
    ("price-class", SiteHint::Flipkart, r"_30jeq3[^>]*>₹([0-9,]+)"),
    (
        "labelled-amount",
        SiteHint::Generic,
        r"(?:price|cost|amount)[^₹]*₹\s*([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "amount-only-suffix",
        SiteHint::Generic,
        r"₹\s*([0-9,]+(?:\.[0-9]{1,2})?)\s*(?:only|/-)",
    ),
];

/// A single named price matcher
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    site: SiteHint,
    regex: Regex,
}

impl PatternRule {
    /// Compiles a rule; matching is case-insensitive and the pattern must
    /// have at least one capture group
    fn compile(name: &str, site: SiteHint, pattern: &str) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidPattern(
                "rule name cannot be empty".to_string(),
            ));
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", name, e)))?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(ConfigError::InvalidPattern(format!(
                "{}: pattern needs a capture group around the amount",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            site,
            regex,
        })
    }

    /// Builds a rule from configuration
    pub fn custom(name: &str, pattern: &str) -> Result<Self, ConfigError> {
        Self::compile(name, SiteHint::Custom, pattern)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn site(&self) -> SiteHint {
        self.site
    }

    /// Yields the raw numeric token of every match in `text`
    pub fn candidates<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Compiles the built-in rule list
pub fn builtin_rules() -> Vec<PatternRule> {
    BUILTIN_RULES
        .iter()
        .filter_map(|(name, site, pattern)| match PatternRule::compile(name, *site, pattern) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::error!("Skipping built-in rule: {}", e);
                None
            }
        })
        .collect()
}
