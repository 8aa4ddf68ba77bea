//! Tests for cash flow classification.

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::ingest::LedgerRecord;

fn record(account: &str, account_type: &str, amount: Decimal) -> LedgerRecord {
    LedgerRecord {
        account: account.to_string(),
        account_type: account_type.to_string(),
        amount,
        date: "2025-06-30".to_string(),
        description: format!("Change in {account}"),
        reference: None,
    }
}

#[rstest]
#[case("1000 - Operating Cash", Bucket::Cash)]
#[case("Money Market Fund", Bucket::Cash)]
#[case("Short-term Investments", Bucket::Cash)]
#[case("1010 - Accounts Receivable", Bucket::Operating)]
#[case("Accrued Payroll Liabilities", Bucket::Operating)]
#[case("Employee Benefits Payable", Bucket::Operating)]
#[case("401k Contributions", Bucket::Operating)]
#[case("Domain Name Costs", Bucket::Investing)]
#[case("Office Furniture", Bucket::Investing)]
#[case("Capitalized Software", Bucket::Investing)]
#[case("Security Deposits", Bucket::Investing)]
#[case("Common Stock", Bucket::Financing)]
#[case("Additional Paid-in Capital", Bucket::Financing)]
#[case("Opening Balance Equity", Bucket::Financing)]
#[case("Lease Liabilities - Non-current", Bucket::Financing)]
#[case("Miscellaneous Expense", Bucket::Operating)]
fn test_builtin_rules(#[case] account: &str, #[case] expected: Bucket) {
    let classifier = Classifier::default();
    let result = classifier.classify(&record(account, "", dec!(1)));
    assert_eq!(result.bucket, expected, "account {account}");
}

#[test]
fn test_rules_apply_in_order() {
    // Matches both the cash and the working-capital keywords.
    let classifier = Classifier::default();
    let result = classifier.classify(&record("Cash Receivable Clearing", "", dec!(1)));
    assert_eq!(result.bucket, Bucket::Cash);
    assert_eq!(result.rule_id.as_deref(), Some("cash"));
}

#[test]
fn test_note_receivable_is_operating_by_rule_order() {
    // "receivable" is matched by the working-capital rule first.
    let classifier = Classifier::default();
    let result = classifier.classify(&record("Note Receivable - Officer", "", dec!(1)));
    assert_eq!(result.bucket, Bucket::Operating);
}

#[test]
fn test_equity_account_type_is_financing() {
    let classifier = Classifier::default();
    let result = classifier.classify(&record("Owner Draws", " EQUITY ", dec!(-50)));
    assert_eq!(result.bucket, Bucket::Financing);
    assert_eq!(result.rule_id.as_deref(), Some("funding"));
}

#[test]
fn test_default_bucket_has_no_rule() {
    let classifier = Classifier::default();
    let result = classifier.classify(&record("Suspense", "Other", dec!(10)));
    assert_eq!(result.bucket, Bucket::Operating);
    assert_eq!(result.rule_id, None);
}

#[rstest]
#[case("Current Asset", dec!(-700026.36), dec!(700026.36))]
#[case("Fixed Asset", dec!(2000), dec!(-2000))]
#[case("ASSET", dec!(5), dec!(-5))]
#[case("Current Liability", dec!(200), dec!(200))]
#[case("Equity", dec!(-75), dec!(-75))]
#[case("", dec!(12.5), dec!(12.5))]
fn test_cash_impact(#[case] account_type: &str, #[case] amount: Decimal, #[case] expected: Decimal) {
    assert_eq!(cash_impact(&record("Account", account_type, amount)), expected);
}

#[test]
fn test_classification_carries_cash_impact() {
    let classifier = Classifier::default();
    let result =
        classifier.classify(&record("1010 - Accounts Receivable", "Current Asset", dec!(-700026.36)));
    assert_eq!(result.bucket, Bucket::Operating);
    assert_eq!(result.amount, dec!(700026.36));
}

#[test]
fn test_rules_from_json() {
    let json = r#"{
        "rules": [
            { "id": "grants", "bucket": "financing", "keywords": ["Grant"] },
            { "id": "fixed", "bucket": "investing", "account_types": ["fixed asset"] }
        ],
        "default_bucket": "operating"
    }"#;
    let classifier = Classifier::new(ClassificationRules::from_json_str(json).expect("valid rules"));

    assert_eq!(
        classifier.classify(&record("State Grant Received", "", dec!(1))).bucket,
        Bucket::Financing
    );
    assert_eq!(
        classifier.classify(&record("Vehicles", "Fixed Asset", dec!(1))).bucket,
        Bucket::Investing
    );
    assert_eq!(
        classifier.classify(&record("Operating Cash", "Bank", dec!(1))).bucket,
        Bucket::Operating
    );
}

#[test]
fn test_rules_default_bucket_is_optional() {
    let json = r#"{ "rules": [] }"#;
    let rules = ClassificationRules::from_json_str(json).expect("valid rules");
    assert_eq!(rules.default_bucket, Bucket::Operating);
}

#[test]
fn test_rules_reject_empty_rule() {
    let json = r#"{ "rules": [ { "id": "nothing", "bucket": "cash" } ] }"#;
    let err = ClassificationRules::from_json_str(json).expect_err("rule cannot match");
    assert!(matches!(err, RulesError::EmptyRule(id) if id == "nothing"));
}

#[test]
fn test_rules_reject_unknown_bucket() {
    let json = r#"{ "rules": [ { "id": "x", "bucket": "other", "keywords": ["x"] } ] }"#;
    let err = ClassificationRules::from_json_str(json).expect_err("bucket is unknown");
    assert!(matches!(err, RulesError::Json(_)));
}

#[test]
fn test_rules_missing_file() {
    let err = ClassificationRules::from_file("/nonexistent/cashflow-rules.json")
        .expect_err("file does not exist");
    assert!(matches!(err, RulesError::Io { .. }));
}

#[test]
fn test_builtin_rules_survive_json() {
    let rules = ClassificationRules::default();
    let json = serde_json::to_string(&rules).expect("rules serialize");
    assert_eq!(ClassificationRules::from_json_str(&json).expect("rules parse"), rules);
}

#[test]
fn test_example_rules_file_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/rules.example.json");
    let rules = ClassificationRules::from_file(path).expect("example rules load");
    assert_eq!(rules, ClassificationRules::default());
}
