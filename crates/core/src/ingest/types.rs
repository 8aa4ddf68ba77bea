//! Ingestion data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized financial change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Account name, possibly prefixed with an account number ("1010 - Cash").
    pub account: String,
    /// Account type text as exported or inferred ("Current Asset", "Equity").
    pub account_type: String,
    /// Signed amount.
    pub amount: Decimal,
    /// ISO-8601 date or free text.
    pub date: String,
    /// Line description.
    pub description: String,
    /// Document or transaction reference.
    pub reference: Option<String>,
}

/// Balance sheet section a row belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Assets.
    Assets,
    /// Liabilities.
    Liabilities,
    /// Equity.
    Equity,
    /// Rows seen before any section marker.
    #[default]
    Unknown,
}

impl Section {
    /// Account type label used when no name rule matches.
    #[must_use]
    pub const fn fallback_account_type(self) -> &'static str {
        match self {
            Self::Assets => "Asset",
            Self::Liabilities => "Liability",
            Self::Equity => "Equity",
            Self::Unknown => "",
        }
    }
}

/// One account row of a comparative balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetItem {
    /// Account name.
    pub account: String,
    /// Current period balance.
    pub current_amount: Decimal,
    /// Prior period balance.
    pub prior_amount: Decimal,
    /// Current minus prior.
    pub variance: Decimal,
    /// Section context at the row.
    pub section: Section,
    /// Whether the row is a total line.
    pub is_total: bool,
}

/// Layout of the uploaded export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    /// Header row followed by one row per transaction.
    FlatLedger,
    /// Comparative balance sheet.
    BalanceSheet,
}

/// Reporting period bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// First day (or caption) of the period.
    pub start: String,
    /// Last day (or caption) of the period.
    pub end: String,
}

impl ReportingPeriod {
    /// Creates a period from its bounds.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl From<&cashflow_shared::ReportingConfig> for ReportingPeriod {
    fn from(config: &cashflow_shared::ReportingConfig) -> Self {
        Self::new(&config.period_start, &config.period_end)
    }
}

/// Result of ingesting one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestedLedger {
    /// Detected layout.
    pub shape: InputShape,
    /// Normalized records in file order.
    pub records: Vec<LedgerRecord>,
    /// Fixed period for balance-sheet conversions. `None` for flat ledgers,
    /// whose period comes from record dates.
    pub reporting_period: Option<ReportingPeriod>,
    /// Cash balance at the start of the period, when the export reports it.
    pub opening_cash: Option<Decimal>,
}
