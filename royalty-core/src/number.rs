//! Locale-aware amount parsing.
//!
//! Separators are declared per distributor, never guessed from the data:
//! "1.000,50" is one thousand for Altafonte and a parse failure for FUGA.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal: char,
    pub thousands: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal: '.',
            thousands: None,
        }
    }
}

impl NumberFormat {
    /// Comma decimals with period grouping, e.g. `1.000,50`.
    pub const fn european() -> Self {
        Self {
            decimal: ',',
            thousands: Some('.'),
        }
    }

    /// Compile a reusable parser for this format.
    pub fn parser(&self) -> Result<AmountParser, regex::Error> {
        let d = regex::escape(&self.decimal.to_string());
        let int_part = match self.thousands {
            Some(t) => {
                let t = regex::escape(&t.to_string());
                format!(r"(?:\d{{1,3}}(?:{t}\d{{3}})+|\d*)")
            }
            None => r"\d*".to_string(),
        };
        let pattern = format!(r"^[+-]?{int_part}(?:{d}\d*)?(?:[eE][+-]?\d+)?$");
        Ok(AmountParser {
            format: *self,
            shape: Regex::new(&pattern)?,
        })
    }

    /// One-off parse; prefer [`parser`](Self::parser) for whole columns.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        self.parser().ok()?.parse(raw)
    }
}

/// A [`NumberFormat`] with its validation pattern compiled.
#[derive(Debug, Clone)]
pub struct AmountParser {
    format: NumberFormat,
    shape: Regex,
}

impl AmountParser {
    /// Returns `None` for anything that is not a finite number under this format,
    /// including blank text and misplaced separators.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let s = raw.trim();
        if !s.chars().any(|c| c.is_ascii_digit()) || !self.shape.is_match(s) {
            return None;
        }

        let normalized: String = s
            .chars()
            .filter(|c| Some(*c) != self.format.thousands)
            .map(|c| if c == self.format.decimal { '.' } else { c })
            .collect();

        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let f = NumberFormat::default();
        assert_eq!(f.parse("12.34"), Some(12.34));
        assert_eq!(f.parse(" -0.5 "), Some(-0.5));
        assert_eq!(f.parse("7"), Some(7.0));
        assert_eq!(f.parse(".5"), Some(0.5));
        assert_eq!(f.parse("1,000.50"), None);
        assert_eq!(f.parse(""), None);
        assert_eq!(f.parse("NaN"), None);
        assert_eq!(f.parse("-"), None);
    }

    #[test]
    fn test_european_format() {
        let f = NumberFormat::european();
        assert_eq!(f.parse("1.000,50"), Some(1000.50));
        assert_eq!(f.parse("12,5"), Some(12.5));
        assert_eq!(f.parse("1000,5"), Some(1000.5));
        assert_eq!(f.parse("1.234.567,89"), Some(1234567.89));
        assert_eq!(f.parse("0,000123"), Some(0.000123));
        assert_eq!(f.parse("abc"), None);
    }

    #[test]
    fn test_european_rejects_misplaced_grouping() {
        let f = NumberFormat::european();
        assert_eq!(f.parse("1,000.50"), None);
        assert_eq!(f.parse("10.00"), None);
        assert_eq!(f.parse("1,2,3"), None);
    }

    #[test]
    fn test_exponent_notation() {
        let f = NumberFormat::default();
        assert_eq!(f.parse("1.5E-05"), Some(1.5e-5));
        assert_eq!(f.parse("2e3"), Some(2000.0));
        assert_eq!(f.parse("-4.2e+1"), Some(-42.0));
        assert_eq!(f.parse("e5"), None);
        assert_eq!(f.parse("1.5E"), None);

        let eu = NumberFormat::european();
        assert_eq!(eu.parse("1,5E-05"), Some(1.5e-5));
        assert_eq!(eu.parse("1.000,5e1"), Some(10005.0));
    }

    #[test]
    fn test_parser_is_reusable() {
        let p = NumberFormat::european().parser().unwrap();
        let total: f64 = ["1,5", "2,5", "1.000"].iter().filter_map(|s| p.parse(s)).sum();
        assert_eq!(total, 1004.0);
    }
}
