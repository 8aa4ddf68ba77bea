//! Statement assembly service.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::period::{period_from_dates, strip_account_number};
use super::types::{CashFlowItem, CashFlowStatement};
use crate::classify::{Bucket, Classifier};
use crate::ingest::{IngestedLedger, LedgerRecord};

const NET_INCOME: &str = "Net Income";

/// Builds cash flow statements from ingested records.
#[derive(Debug, Clone, Default)]
pub struct StatementAssembler {
    classifier: Classifier,
}

impl StatementAssembler {
    /// Creates an assembler around a classifier.
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Assembles a statement from an ingested ledger.
    ///
    /// Balance-sheet ledgers keep their fixed reporting period and opening
    /// cash; flat ledgers take their period from record dates.
    #[must_use]
    pub fn assemble(&self, ledger: &IngestedLedger) -> CashFlowStatement {
        let period = ledger
            .reporting_period
            .as_ref()
            .map(|p| (p.start.clone(), p.end.clone()));
        self.build(&ledger.records, period, ledger.opening_cash)
    }

    /// Assembles a statement from bare records.
    #[must_use]
    pub fn assemble_records(&self, records: &[LedgerRecord]) -> CashFlowStatement {
        self.build(records, None, None)
    }

    fn build(
        &self,
        records: &[LedgerRecord],
        period: Option<(String, String)>,
        opening_cash: Option<Decimal>,
    ) -> CashFlowStatement {
        let mut operating = Vec::new();
        let mut investing = Vec::new();
        let mut financing = Vec::new();
        let mut cash_changes = Vec::new();

        // Only the first net income row seeds the operating section.
        if let Some(net_income) = records
            .iter()
            .find(|r| r.account.to_lowercase().contains("net income"))
            .filter(|r| !r.amount.is_zero())
        {
            operating.push(CashFlowItem::line(NET_INCOME, net_income.amount));
        }

        for record in records.iter().filter(|r| !r.amount.is_zero()) {
            let classification = self.classifier.classify(record);
            debug!(
                account = %record.account,
                bucket = %classification.bucket,
                rule = ?classification.rule_id,
                "classified record"
            );

            let item = CashFlowItem::line(
                strip_account_number(&record.account),
                classification.amount,
            );
            match classification.bucket {
                Bucket::Operating => operating.push(item),
                Bucket::Investing => investing.push(item),
                Bucket::Financing => financing.push(item),
                Bucket::Cash => cash_changes.push(item),
            }
        }

        let mut net_cash_flow = Decimal::ZERO;
        for (bucket, items) in [
            (Bucket::Operating, &mut operating),
            (Bucket::Investing, &mut investing),
            (Bucket::Financing, &mut financing),
        ] {
            let total = CashFlowStatement::lines_total(items.as_slice());
            net_cash_flow += total;
            items.push(CashFlowItem::subtotal(
                format!("Net Cash from {} Activities", bucket.label()),
                total,
            ));
        }

        let (period_start, period_end) = period.unwrap_or_else(|| {
            period_from_dates(records.iter().map(|r| r.date.as_str()))
        });

        let beginning_cash = opening_cash.unwrap_or_default();
        let ending_cash = opening_cash.map_or(Decimal::ZERO, |opening| opening + net_cash_flow);

        info!(
            net_cash_flow = %net_cash_flow,
            period_start = %period_start,
            period_end = %period_end,
            "assembled cash flow statement"
        );

        CashFlowStatement {
            operating,
            investing,
            financing,
            cash_changes,
            net_cash_flow,
            beginning_cash,
            ending_cash,
            period_start,
            period_end,
        }
    }
}
