//! Cash flow statement types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify::Bucket;

/// Whether a statement row is a detail line or a computed subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Detail line; counts toward totals.
    Line,
    /// Section subtotal; never summed.
    Subtotal,
}

/// One statement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowItem {
    /// Row caption.
    pub description: String,
    /// Cash effect.
    pub amount: Decimal,
    /// Line or subtotal.
    pub kind: ItemKind,
}

impl CashFlowItem {
    /// Creates a detail line.
    #[must_use]
    pub fn line(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
            kind: ItemKind::Line,
        }
    }

    /// Creates a subtotal row.
    #[must_use]
    pub fn subtotal(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
            kind: ItemKind::Subtotal,
        }
    }

    /// Returns true for subtotal rows.
    #[must_use]
    pub fn is_subtotal(&self) -> bool {
        self.kind == ItemKind::Subtotal
    }
}

/// Statement of cash flows for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Operating activities, subtotal last.
    pub operating: Vec<CashFlowItem>,
    /// Investing activities, subtotal last.
    pub investing: Vec<CashFlowItem>,
    /// Financing activities, subtotal last.
    pub financing: Vec<CashFlowItem>,
    /// Movements in cash accounts themselves.
    pub cash_changes: Vec<CashFlowItem>,
    /// Sum of operating, investing and financing lines.
    pub net_cash_flow: Decimal,
    /// Cash at the start of the period, zero when unknown.
    pub beginning_cash: Decimal,
    /// Cash at the end of the period, zero when beginning cash is unknown.
    pub ending_cash: Decimal,
    /// Period start.
    pub period_start: String,
    /// Period end.
    pub period_end: String,
}

impl CashFlowStatement {
    /// Activity sections in presentation order.
    #[must_use]
    pub fn sections(&self) -> [(Bucket, &[CashFlowItem]); 3] {
        [
            (Bucket::Operating, self.operating.as_slice()),
            (Bucket::Investing, self.investing.as_slice()),
            (Bucket::Financing, self.financing.as_slice()),
        ]
    }

    /// Sum of the detail lines of a section.
    #[must_use]
    pub fn lines_total(items: &[CashFlowItem]) -> Decimal {
        items
            .iter()
            .filter(|item| !item.is_subtotal())
            .map(|item| item.amount)
            .sum()
    }

    /// Whether the statement has a period caption.
    #[must_use]
    pub fn has_period(&self) -> bool {
        !self.period_start.is_empty() && !self.period_end.is_empty()
    }
}
