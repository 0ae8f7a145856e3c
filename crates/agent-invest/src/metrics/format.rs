//! Display formatting for report values

/// Sentinel shown for any value that could not be read or derived
pub const NOT_AVAILABLE: &str = "N/A";

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Thousands-separated number with no decimals, e.g. `1,234,567`
pub fn format_number(value: Option<f64>) -> String {
    present(value).map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| group_thousands(&format!("{v:.0}")),
    )
}

/// Percentage with two decimals, e.g. `12.35%`
pub fn format_percent(value: Option<f64>) -> String {
    present(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}%"))
}

/// Per-share amount in dollars, e.g. `$6.13`
pub fn format_eps(value: Option<f64>) -> String {
    present(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("${v:.2}"))
}

/// Insert `,` every three integer digits, keeping a leading sign
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
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

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(1_234_567.0)), "1,234,567");
        assert_eq!(format_number(Some(1_234_567.891)), "1,234,568");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1000.0)), "1,000");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(Some(-98_765_432.1)), "-98,765,432");
        assert_eq!(format_number(Some(391_035_000_000.0)), "391,035,000,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(12.345)), "12.35%");
        assert_eq!(format_percent(Some(40.0)), "40.00%");
        assert_eq!(format_percent(Some(-3.5)), "-3.50%");
    }

    #[test]
    fn test_format_eps() {
        assert_eq!(format_eps(Some(6.08)), "$6.08");
        assert_eq!(format_eps(Some(-0.25)), "$-0.25");
    }

    #[test]
    fn test_missing_values_render_sentinel() {
        for value in [None, Some(f64::NAN)] {
            assert_eq!(format_number(value), "N/A");
            assert_eq!(format_percent(value), "N/A");
            assert_eq!(format_eps(value), "N/A");
        }
    }
}
