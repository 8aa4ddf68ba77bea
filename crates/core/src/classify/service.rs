//! Record classification service.

use rust_decimal::Decimal;
use serde::Serialize;

use super::rules::{Bucket, ClassificationRules};
use crate::ingest::LedgerRecord;

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Assigned bucket.
    pub bucket: Bucket,
    /// Cash effect of the record.
    pub amount: Decimal,
    /// Matching rule, `None` when the default bucket applied.
    pub rule_id: Option<String>,
}

/// Signed cash effect of a balance change.
///
/// An increase in an asset consumes cash, so asset amounts flip sign.
/// Everything else passes through unchanged.
#[must_use]
pub fn cash_impact(record: &LedgerRecord) -> Decimal {
    if record.account_type.to_lowercase().contains("asset") {
        -record.amount
    } else {
        record.amount
    }
}

/// Assigns records to cash flow buckets.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: ClassificationRules,
}

impl Classifier {
    /// Creates a classifier over a rule set.
    #[must_use]
    pub fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    /// Classifies a record. The first matching rule wins.
    #[must_use]
    pub fn classify(&self, record: &LedgerRecord) -> Classification {
        let account = record.account.to_lowercase();
        let account_type = record.account_type.to_lowercase();

        let matched = self
            .rules
            .rules
            .iter()
            .find(|rule| rule.matches(&account, &account_type));

        Classification {
            bucket: matched.map_or(self.rules.default_bucket, |rule| rule.bucket),
            amount: cash_impact(record),
            rule_id: matched.map(|rule| rule.id.clone()),
        }
    }
}
