//! Cash flow classification.
//!
//! Each ledger record is assigned to an activity bucket by an ordered list
//! of keyword rules. The first matching rule wins.

pub mod error;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::RulesError;
pub use rules::{Bucket, ClassificationRule, ClassificationRules};
pub use service::{Classification, Classifier, cash_impact};
