//! Classification rule set.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::RulesError;

/// Cash flow activity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Day-to-day business activity.
    Operating,
    /// Long-lived asset purchases and sales.
    Investing,
    /// Owner and lender funding.
    Financing,
    /// Movements of cash itself.
    Cash,
}

impl Bucket {
    /// Section label used in statement captions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operating => "Operating",
            Self::Investing => "Investing",
            Self::Financing => "Financing",
            Self::Cash => "Cash",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classification rule.
///
/// Matches when the account name contains any keyword or the account type
/// equals any listed type. Both comparisons ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Stable identifier, reported with each classification.
    pub id: String,
    /// Bucket assigned on match.
    pub bucket: Bucket,
    /// Substrings of the account name.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Exact account types.
    #[serde(default)]
    pub account_types: Vec<String>,
}

impl ClassificationRule {
    /// Creates a keyword rule.
    #[must_use]
    pub fn new(id: &str, bucket: Bucket, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            bucket,
            keywords: keywords.iter().map(ToString::to_string).collect(),
            account_types: Vec::new(),
        }
    }

    /// Adds exact account types to the rule.
    #[must_use]
    pub fn with_account_types(mut self, account_types: &[&str]) -> Self {
        self.account_types = account_types.iter().map(ToString::to_string).collect();
        self
    }

    /// Returns true if the rule applies to an account.
    ///
    /// `account` and `account_type` must already be lowercase.
    #[must_use]
    pub fn matches(&self, account: &str, account_type: &str) -> bool {
        self.account_types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(account_type.trim()))
            || self
                .keywords
                .iter()
                .any(|k| account.contains(k.to_lowercase().as_str()))
    }
}

/// Ordered rule list with a fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Rules in evaluation order.
    pub rules: Vec<ClassificationRule>,
    /// Bucket used when no rule matches.
    #[serde(default = "default_bucket")]
    pub default_bucket: Bucket,
}

const fn default_bucket() -> Bucket {
    Bucket::Operating
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ClassificationRule::new(
                    "cash",
                    Bucket::Cash,
                    &["cash", "bank", "money market", "investment"],
                ),
                ClassificationRule::new(
                    "working-capital",
                    Bucket::Operating,
                    &[
                        "receivable",
                        "prepaid",
                        "unbilled",
                        "payable",
                        "accrued",
                        "wages",
                        "payroll",
                        "deferred",
                        "credit card",
                        "benefits",
                        "contributions",
                    ],
                ),
                ClassificationRule::new(
                    "long-lived-assets",
                    Bucket::Investing,
                    &[
                        "equipment",
                        "furniture",
                        "computer",
                        "leasehold",
                        "software development",
                        "domain",
                        "capitalized",
                        "note receivable",
                        "security deposits",
                        "software rights",
                    ],
                ),
                ClassificationRule::new(
                    "funding",
                    Bucket::Financing,
                    &[
                        "stock",
                        "capital",
                        "earnings",
                        "income",
                        "opening balance",
                        "lease liabilities",
                    ],
                )
                .with_account_types(&["equity"]),
            ],
            default_bucket: default_bucket(),
        }
    }
}

impl ClassificationRules {
    /// Parses a JSON rules document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a rule has nothing
    /// to match on.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Loads a JSON rules document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), RulesError> {
        match self
            .rules
            .iter()
            .find(|r| r.keywords.is_empty() && r.account_types.is_empty())
        {
            Some(rule) => Err(RulesError::EmptyRule(rule.id.clone())),
            None => Ok(()),
        }
    }
}
