//! Two-column CSV rendering.

use rust_decimal::Decimal;

use super::error::RenderError;
use super::{NET_CHANGE_LABEL, TITLE, period_caption, section_header};
use crate::ingest::format_amount;
use crate::statement::CashFlowStatement;

type Writer = csv::Writer<Vec<u8>>;

/// Renders statements as `Description,Amount` CSV text.
///
/// Amounts use ledger formatting (grouped, parenthesized negatives). The
/// cash position rows follow the net change.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    /// Renders a statement to CSV bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be written.
    pub fn render(&self, statement: &CashFlowStatement) -> Result<Vec<u8>, RenderError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        label(&mut writer, TITLE)?;
        if statement.has_period() {
            label(
                &mut writer,
                &period_caption(&statement.period_start, &statement.period_end),
            )?;
        }
        label(&mut writer, "")?;
        writer.write_record(["Description", "Amount"])?;

        for (bucket, items) in statement.sections() {
            label(&mut writer, &section_header(bucket.label()))?;
            for item in items {
                amount(&mut writer, &item.description, item.amount)?;
            }
        }

        amount(&mut writer, NET_CHANGE_LABEL, statement.net_cash_flow)?;
        amount(&mut writer, "Cash at beginning of period", statement.beginning_cash)?;
        amount(&mut writer, "Cash at end of period", statement.ending_cash)?;

        writer
            .into_inner()
            .map_err(|e| RenderError::Csv(csv::Error::from(e.into_error())))
    }
}

fn label(writer: &mut Writer, text: &str) -> Result<(), RenderError> {
    writer.write_record([text, ""])?;
    Ok(())
}

fn amount(writer: &mut Writer, description: &str, value: Decimal) -> Result<(), RenderError> {
    writer.write_record([description, format_amount(value).as_str()])?;
    Ok(())
}
