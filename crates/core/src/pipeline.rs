//! End-to-end conversion from ledger CSV to rendered statement.
//!
//! Every transport adapter calls into [`Pipeline`] and only moves bytes in
//! and out.

use thiserror::Error;
use tracing::info;

use crate::classify::{ClassificationRules, Classifier};
use crate::ingest::{IngestError, Ingestor, ReportingPeriod};
use crate::render::{CsvRenderer, RenderError, XlsxRenderer};
use crate::statement::{CashFlowStatement, StatementAssembler};

/// Errors from a full conversion.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upload could not be ingested.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The statement could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<PipelineError> for cashflow_shared::AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Ingest(e) => Self::Validation(e.to_string()),
            PipelineError::Render(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Ingest, classify, assemble and render in one call.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    ingestor: Ingestor,
    assembler: StatementAssembler,
    xlsx: XlsxRenderer,
    csv: CsvRenderer,
}

impl Pipeline {
    /// Creates a pipeline for a reporting period and rule set.
    #[must_use]
    pub fn new(period: ReportingPeriod, rules: ClassificationRules) -> Self {
        Self {
            ingestor: Ingestor::new(period),
            assembler: StatementAssembler::new(Classifier::new(rules)),
            xlsx: XlsxRenderer,
            csv: CsvRenderer,
        }
    }

    /// Returns the ingestor.
    #[must_use]
    pub fn ingestor(&self) -> &Ingestor {
        &self.ingestor
    }

    /// Builds the statement for an uploaded ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload cannot be ingested.
    pub fn statement_from_csv(&self, bytes: &[u8]) -> Result<CashFlowStatement, PipelineError> {
        let ledger = self.ingestor.ingest_bytes(bytes)?;
        Ok(self.assembler.assemble(&ledger))
    }

    /// Converts an uploaded ledger into workbook bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if ingestion or rendering fails.
    pub fn convert_to_xlsx(&self, bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
        let statement = self.statement_from_csv(bytes)?;
        let workbook = self.xlsx.render(&statement)?;
        info!(input = bytes.len(), output = workbook.len(), "converted ledger to workbook");
        Ok(workbook)
    }

    /// Converts an uploaded ledger into CSV statement bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if ingestion or rendering fails.
    pub fn convert_to_csv(&self, bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
        let statement = self.statement_from_csv(bytes)?;
        Ok(self.csv.render(&statement)?)
    }
}
