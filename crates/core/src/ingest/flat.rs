//! Flat transaction ledgers: one header row, one row per transaction.

use tracing::debug;

use super::amount::parse_amount;
use super::error::IngestError;
use super::types::LedgerRecord;

const ACCOUNT: &[&str] = &["account", "account name", "account_name"];
const ACCOUNT_TYPE: &[&str] = &["account type", "account_type", "type"];
const AMOUNT: &[&str] = &["amount", "debit", "credit", "net amount"];
const DATE: &[&str] = &["date", "transaction date", "posting date"];
const DESCRIPTION: &[&str] = &["description", "memo", "transaction description"];
const REFERENCE: &[&str] = &["reference", "document number", "transaction number"];

/// Column positions of each semantic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub account: usize,
    pub account_type: usize,
    pub amount: usize,
    pub date: usize,
    pub description: usize,
    pub reference: Option<usize>,
}

impl ColumnMap {
    /// Locates every field in a header row.
    pub(crate) fn locate(header: &[String]) -> Result<Self, IngestError> {
        let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let required = |field: &str, synonyms: &[&str]| {
            find_column(&normalized, synonyms)
                .ok_or_else(|| IngestError::missing_column(field, synonyms))
        };

        Ok(Self {
            account: required("account", ACCOUNT)?,
            account_type: required("account_type", ACCOUNT_TYPE)?,
            amount: required("amount", AMOUNT)?,
            date: required("date", DATE)?,
            description: required("description", DESCRIPTION)?,
            reference: find_column(&normalized, REFERENCE),
        })
    }
}

/// First synonym present in the header wins.
fn find_column(header: &[String], synonyms: &[&str]) -> Option<usize> {
    synonyms
        .iter()
        .find_map(|synonym| header.iter().position(|h| h == synonym))
}

/// Parses a flat ledger table. Row 0 is the header.
pub(crate) fn parse(table: &[Vec<String>]) -> Result<Vec<LedgerRecord>, IngestError> {
    let Some((header, rows)) = table.split_first() else {
        return Err(IngestError::format("ledger is empty"));
    };
    if rows.is_empty() {
        return Err(IngestError::format("ledger needs a header row and at least one data row"));
    }

    let columns = ColumnMap::locate(header)?;
    debug!(?columns, "located ledger columns");

    let width = header.len();
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if row.len() < width {
            continue;
        }

        let raw_amount = row[columns.amount].as_str();
        // Header is row 1 of the file.
        let amount =
            parse_amount(raw_amount).map_err(|_| IngestError::invalid_amount(index + 2, raw_amount))?;

        records.push(LedgerRecord {
            account: row[columns.account].trim().to_string(),
            account_type: row[columns.account_type].trim().to_string(),
            amount,
            date: row[columns.date].trim().to_string(),
            description: row[columns.description].trim().to_string(),
            reference: columns
                .reference
                .map(|i| row[i].trim().to_string())
                .filter(|r| !r.is_empty()),
        });
    }

    Ok(records)
}
