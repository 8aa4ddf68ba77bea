//! Comparative balance sheets: current, prior and variance per account.
//!
//! Each account's variance over the period becomes one [`LedgerRecord`]
//! dated at the end of the reporting period.

use rust_decimal::Decimal;
use tracing::debug;

use super::amount::parse_amount;
use super::error::IngestError;
use super::types::{BalanceSheetItem, LedgerRecord, Section};

/// Minimum rows a balance sheet export has (title block plus header).
const MIN_ROWS: usize = 12;

/// Rows (0-indexed) where the column header may appear.
const HEADER_WINDOW: std::ops::RangeInclusive<usize> = 5..=9;

/// Grouping labels that carry no amounts of their own.
const GROUP_LABELS: &[&str] = &[
    "current assets",
    "fixed assets",
    "other assets",
    "current liabilities",
    "long term liabilities",
    "equity",
    "bank",
    "accounts receivable",
    "other current asset",
    "accounts payable",
    "credit card",
    "other current liability",
];

const DESCRIPTION_PREFIX: &str = "Change in";
const REFERENCE: &str = "Balance Sheet Analysis";

/// Index of the column header row, if one sits in the header window.
///
/// The header has at least four cells and its first cell names the
/// financial row (e.g. "Financial Row").
pub(crate) fn find_header(table: &[Vec<String>]) -> Option<usize> {
    HEADER_WINDOW.clone().find(|&i| {
        table
            .get(i)
            .is_some_and(|row| row.len() >= 4 && row[0].to_lowercase().contains("financial"))
    })
}

/// Extracts account rows below the column header.
pub(crate) fn parse_items(table: &[Vec<String>]) -> Result<Vec<BalanceSheetItem>, IngestError> {
    if table.len() < MIN_ROWS {
        return Err(IngestError::format(format!(
            "balance sheet needs at least {MIN_ROWS} rows, got {}",
            table.len()
        )));
    }

    let header = find_header(table)
        .ok_or_else(|| IngestError::format("balance sheet header row not found"))?;
    debug!(header_row = header, "located balance sheet header");

    let mut section = Section::Unknown;
    let mut items = Vec::new();

    for row in &table[header + 1..] {
        if row.len() < 4 {
            continue;
        }
        let name = row[0].trim();
        if name.is_empty() {
            continue;
        }

        if let Some(marker) = section_marker(name) {
            section = marker;
            continue;
        }
        if GROUP_LABELS.contains(&name.to_lowercase().as_str()) {
            continue;
        }

        let current_amount = lenient_amount(&row[1]);
        let prior_amount = lenient_amount(&row[2]);
        let variance = lenient_amount(&row[3]);
        if current_amount.is_zero() && prior_amount.is_zero() && variance.is_zero() {
            continue;
        }

        items.push(BalanceSheetItem {
            account: name.to_string(),
            current_amount,
            prior_amount,
            variance,
            section,
            is_total: name.to_lowercase().contains("total"),
        });
    }

    Ok(items)
}

/// Section markers take precedence over every other row rule.
fn section_marker(name: &str) -> Option<Section> {
    let upper = name.to_uppercase();
    if upper.contains("ASSETS") {
        Some(Section::Assets)
    } else if upper.contains("LIABILITIES") {
        Some(Section::Liabilities)
    } else if upper.contains("EQUITY") {
        Some(Section::Equity)
    } else {
        None
    }
}

/// Balance sheet cells tolerate junk: anything unparseable counts as zero.
fn lenient_amount(cell: &str) -> Decimal {
    parse_amount(cell).unwrap_or_default()
}

/// Infers an account type from the account name and its section.
#[must_use]
pub(crate) fn infer_account_type(account: &str, section: Section) -> String {
    let name = account.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| name.contains(w));

    let inferred = if has_any(&["cash", "bank"]) {
        "Cash"
    } else if has_any(&["receivable", "prepaid", "inventory", "unbilled"]) {
        "Current Asset"
    } else if has_any(&[
        "equipment",
        "furniture",
        "computer",
        "leasehold",
        "software development",
        "domain",
    ]) {
        "Fixed Asset"
    } else if has_any(&[
        "payable",
        "accrued",
        "wages",
        "payroll",
        "deferred",
        "credit card",
    ]) {
        "Current Liability"
    } else if name.contains("lease liabilities") && name.contains("non-current") {
        "Long Term Liability"
    } else if section == Section::Equity || has_any(&["stock", "capital", "earnings", "income"]) {
        "Equity"
    } else {
        section.fallback_account_type()
    };

    inferred.to_string()
}

/// Converts account rows into records, one per non-total row that moved.
pub(crate) fn to_records(items: &[BalanceSheetItem], period_end: &str) -> Vec<LedgerRecord> {
    items
        .iter()
        .filter(|item| !item.is_total && !item.variance.is_zero())
        .map(|item| LedgerRecord {
            account: item.account.clone(),
            account_type: infer_account_type(&item.account, item.section),
            amount: item.variance,
            date: period_end.to_string(),
            description: format!("{DESCRIPTION_PREFIX} {}", item.account),
            reference: Some(REFERENCE.to_string()),
        })
        .collect()
}

/// Cash on hand at the start of the period.
///
/// Uses the prior balance of a "total bank" row when the export has one,
/// otherwise the sum of prior balances of cash accounts.
pub(crate) fn opening_cash(items: &[BalanceSheetItem]) -> Option<Decimal> {
    if let Some(total) = items
        .iter()
        .find(|item| item.is_total && item.account.to_lowercase().contains("total bank"))
    {
        return Some(total.prior_amount);
    }

    let cash: Vec<Decimal> = items
        .iter()
        .filter(|item| !item.is_total && infer_account_type(&item.account, item.section) == "Cash")
        .map(|item| item.prior_amount)
        .collect();

    if cash.is_empty() {
        None
    } else {
        Some(cash.into_iter().sum())
    }
}
