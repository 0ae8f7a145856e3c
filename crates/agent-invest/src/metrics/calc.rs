//! Growth and ratio arithmetic
//!
//! Every function returns `None` instead of a number when an input is missing
//! or NaN, or when the denominator is zero.

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Period-over-period change in percent, relative to `|previous|`
///
/// A zero in either period yields `None`, so a line item that dropped to
/// zero reads as unavailable rather than `-100%`.
pub fn growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (present(current)?, present(previous)?);
    if previous == 0.0 || current == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// `part / whole * 100`
pub fn percent_of(part: Option<f64>, whole: Option<f64>) -> Option<f64> {
    let (part, whole) = (present(part)?, present(whole)?);
    if whole == 0.0 {
        return None;
    }
    Some(part / whole * 100.0)
}

/// Income line as a share of revenue
pub fn margin(part: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    percent_of(part, revenue)
}

/// Total liabilities as a share of total assets
pub fn debt_ratio(total_liabilities: Option<f64>, total_assets: Option<f64>) -> Option<f64> {
    percent_of(total_liabilities, total_assets)
}
