//! Money normalization
//!
//! Catalog data is denormalized: a product's price may arrive as a plain
//! number or as currency-formatted text such as `"Rs.13,500"`. [`normalize`]
//! folds both shapes into a canonical [`Decimal`] amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price exactly as captured from catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// A plain numeric amount.
    Number(f64),

    /// Currency-formatted text, e.g. `"Rs.13,500"`.
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_owned())
    }
}

impl From<String> for RawPrice {
    fn from(value: String) -> Self {
        RawPrice::Text(value)
    }
}

/// Convert a raw price into a canonical decimal amount.
///
/// Total function: it never fails, defaulting to zero on unparsable or
/// non-finite input.
///
/// Text input keeps only ASCII digits and `.`, then drops any leading `.`
/// left behind by a currency prefix, so `"Rs.13,500"` normalizes to `13500`
/// rather than `0.135`.
pub fn normalize(price: &RawPrice) -> Decimal {
    match price {
        RawPrice::Number(amount) => Decimal::from_f64_retain(*amount).unwrap_or(Decimal::ZERO),
        RawPrice::Text(text) => {
            let kept: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();

            kept.trim_start_matches('.')
                .parse::<Decimal>()
                .unwrap_or(Decimal::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn numeric_price_passes_through() {
        assert_eq!(normalize(&RawPrice::from(9750.0)), Decimal::new(9750, 0));
    }

    #[test]
    fn non_finite_number_normalizes_to_zero() {
        assert_eq!(normalize(&RawPrice::from(f64::NAN)), Decimal::ZERO);
        assert_eq!(normalize(&RawPrice::from(f64::INFINITY)), Decimal::ZERO);
    }

    #[test]
    fn formatted_text_with_currency_prefix() {
        assert_eq!(normalize(&RawPrice::from("Rs.13,500")), Decimal::new(13_500, 0));
    }

    #[test]
    fn text_with_decimal_point() {
        assert_eq!(normalize(&RawPrice::from("1,299.99")), Decimal::new(129_999, 2));
    }

    #[test]
    fn unparsable_text_normalizes_to_zero() {
        assert_eq!(normalize(&RawPrice::from("free")), Decimal::ZERO);
        assert_eq!(normalize(&RawPrice::from("")), Decimal::ZERO);
    }

    #[test]
    fn json_number_and_string_both_deserialize() -> testresult::TestResult {
        let number: RawPrice = serde_json::from_str("9750")?;
        let text: RawPrice = serde_json::from_str("\"Rs.13,500\"")?;

        assert_eq!(normalize(&number), Decimal::new(9750, 0));
        assert_eq!(normalize(&text), Decimal::new(13_500, 0));

        Ok(())
    }
}
