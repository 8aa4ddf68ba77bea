//! Period and caption helpers.

use chrono::NaiveDate;

/// Orders ISO dates by calendar and everything else by text.
fn sort_key(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Earliest and latest of the distinct non-empty dates.
///
/// Returns empty bounds when no record carries a date.
#[must_use]
pub fn period_from_dates<'a>(dates: impl IntoIterator<Item = &'a str>) -> (String, String) {
    let mut distinct: Vec<&str> = dates
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    distinct.sort_by_cached_key(|d| sort_key(d));
    distinct.dedup();

    match (distinct.first(), distinct.last()) {
        (Some(first), Some(last)) => ((*first).to_string(), (*last).to_string()),
        _ => (String::new(), String::new()),
    }
}

/// Drops a leading account number: `"1010 - Accounts Receivable"` becomes
/// `"Accounts Receivable"`.
#[must_use]
pub fn strip_account_number(account: &str) -> &str {
    account
        .split_once(" - ")
        .map_or(account, |(_, name)| name)
        .trim()
}
