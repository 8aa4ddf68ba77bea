//! Amount parsing and formatting for exported ledger text.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Characters dropped before numeric parsing.
const STRIPPED: &[char] = &[',', '$', '€', '£', '¥', '"'];

/// Parses an exported amount cell.
///
/// Thousands separators, currency symbols and quotes are dropped and
/// parenthesized values are negative: `"(1,234.56)"` is `-1234.56`.
/// An empty cell or a lone dash is zero.
///
/// # Errors
///
/// Returns an error if the cleaned text is not a decimal number.
pub fn parse_amount(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !STRIPPED.contains(c))
        .filter(|c| *c != ')')
        .map(|c| if c == '(' { '-' } else { c })
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(&cleaned)
}

/// Formats an amount the way ledger exports print it.
///
/// Thousands are grouped with commas, at least two decimal places are kept,
/// and negatives are parenthesized. [`parse_amount`] reads the output back
/// to the same value.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let magnitude = amount.abs();
    let text = if magnitude.scale() < 2 {
        format!("{magnitude:.2}")
    } else {
        magnitude.to_string()
    };

    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut grouped = group_thousands(whole);
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if amount < Decimal::ZERO {
        format!("({grouped})")
    } else {
        grouped
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("(1,234.50)", dec!(-1234.50))]
    #[case("(1,234.56)", dec!(-1234.56))]
    #[case("", dec!(0))]
    #[case("-", dec!(0))]
    #[case("  ", dec!(0))]
    #[case("$1,000", dec!(1000))]
    #[case("-$855.94", dec!(-855.94))]
    #[case("\"2,500.10\"", dec!(2500.10))]
    #[case("-700026.36", dec!(-700026.36))]
    #[case("€ 12.5", dec!(12.5))]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw).expect("should parse"), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("12..5")]
    #[case("N/A")]
    fn test_parse_amount_rejects_text(#[case] raw: &str) {
        assert!(parse_amount(raw).is_err());
    }

    #[rstest]
    #[case(dec!(0), "0.00")]
    #[case(dec!(12.5), "12.50")]
    #[case(dec!(1234.5), "1,234.50")]
    #[case(dec!(-1234.5), "(1,234.50)")]
    #[case(dec!(1234567.891), "1,234,567.891")]
    #[case(dec!(-100), "(100.00)")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    proptest! {
        #[test]
        fn prop_parse_reads_back_formatted(cents in -1_000_000_000_000i64..1_000_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let text = format_amount(amount);
            prop_assert_eq!(parse_amount(&text).expect("formatted text parses"), amount);
        }

        #[test]
        fn prop_parse_reads_back_any_scale(mantissa in any::<i64>(), scale in 0u32..8) {
            let amount = Decimal::new(mantissa, scale);
            let text = format_amount(amount);
            prop_assert_eq!(parse_amount(&text).expect("formatted text parses"), amount);
        }
    }
}
