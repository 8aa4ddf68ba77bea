//! Ledger ingestion service.

use std::io::Read;

use tracing::{debug, info};

use super::balance_sheet;
use super::error::IngestError;
use super::flat;
use super::types::{IngestedLedger, InputShape, ReportingPeriod};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads CSV text into a raw table of untrimmed cells.
///
/// Rows may have different widths and no row is treated as a header.
///
/// # Errors
///
/// Returns `IngestError::Csv` if the text is not valid CSV.
pub fn read_table(reader: impl Read) -> Result<Vec<Vec<String>>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(ToString::to_string).collect())
                .map_err(IngestError::from)
        })
        .collect()
}

/// Detects which export layout a raw table is.
///
/// A first row that maps onto the ledger columns always means a flat
/// ledger, whatever the rows below contain. Otherwise the table is a
/// balance sheet when its column header sits in the header window or a
/// title row above it reads "balance sheet".
#[must_use]
pub fn detect_shape(table: &[Vec<String>]) -> InputShape {
    if table
        .first()
        .is_some_and(|header| flat::ColumnMap::locate(header).is_ok())
    {
        return InputShape::FlatLedger;
    }

    if balance_sheet::find_header(table).is_some() || has_balance_sheet_title(table) {
        InputShape::BalanceSheet
    } else {
        InputShape::FlatLedger
    }
}

/// Title rows carry a single non-empty cell.
fn has_balance_sheet_title(table: &[Vec<String>]) -> bool {
    table.iter().take(5).any(|row| {
        let mut cells = row.iter().map(|c| c.trim()).filter(|c| !c.is_empty());
        matches!(
            (cells.next(), cells.next()),
            (Some(title), None) if title.to_lowercase().contains("balance sheet")
        )
    })
}

/// Normalizes ledger exports into records.
#[derive(Debug, Clone)]
pub struct Ingestor {
    period: ReportingPeriod,
}

impl Ingestor {
    /// Creates an ingestor that stamps balance-sheet records with `period`.
    #[must_use]
    pub fn new(period: ReportingPeriod) -> Self {
        Self { period }
    }

    /// Reporting period used for balance-sheet exports.
    #[must_use]
    pub fn period(&self) -> &ReportingPeriod {
        &self.period
    }

    /// Ingests an already-split table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no recognizable layout, a required
    /// column is missing, or a transaction amount is malformed.
    pub fn ingest(&self, table: &[Vec<String>]) -> Result<IngestedLedger, IngestError> {
        let shape = detect_shape(table);
        debug!(?shape, rows = table.len(), "detected ledger layout");

        let ledger = match shape {
            InputShape::FlatLedger => IngestedLedger {
                shape,
                records: flat::parse(table)?,
                reporting_period: None,
                opening_cash: None,
            },
            InputShape::BalanceSheet => {
                let items = balance_sheet::parse_items(table)?;
                IngestedLedger {
                    shape,
                    records: balance_sheet::to_records(&items, &self.period.end),
                    reporting_period: Some(self.period.clone()),
                    opening_cash: balance_sheet::opening_cash(&items),
                }
            }
        };

        info!(
            ?shape,
            records = ledger.records.len(),
            "ingested ledger"
        );
        Ok(ledger)
    }

    /// Reads and ingests CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is unreadable or ingestion fails.
    pub fn ingest_reader(&self, reader: impl Read) -> Result<IngestedLedger, IngestError> {
        let table = read_table(reader)?;
        self.ingest(&table)
    }

    /// Ingests raw uploaded bytes, skipping a UTF-8 byte order mark.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is unreadable or ingestion fails.
    pub fn ingest_bytes(&self, bytes: &[u8]) -> Result<IngestedLedger, IngestError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        self.ingest_reader(bytes)
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(ReportingPeriod::from(&cashflow_shared::ReportingConfig::default()))
    }
}
