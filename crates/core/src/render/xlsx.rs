//! Excel workbook rendering.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use tracing::debug;

use super::error::RenderError;
use super::{NET_CHANGE_LABEL, TITLE, period_caption, section_header};
use crate::statement::{CashFlowItem, CashFlowStatement};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Cash Flow Statement";

/// Accounting number format with parenthesized negatives.
pub const CURRENCY_FORMAT: &str = "#,##0.00;(#,##0.00)";

const DESCRIPTION_WIDTH: u16 = 40;
const AMOUNT_WIDTH: u16 = 15;
const SECTION_SHADE: u32 = 0x00E6_E6FA;

/// Cell formats used by the statement layout.
struct Styles {
    title: Format,
    caption: Format,
    section: Format,
    amount: Format,
    total_label: Format,
    total_amount: Format,
}

impl Styles {
    fn new() -> Self {
        let total_label = Format::new().set_bold().set_border_top(FormatBorder::Thin);
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            caption: Format::new().set_align(FormatAlign::Center),
            section: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(SECTION_SHADE))
                .set_pattern(FormatPattern::Solid),
            amount: Format::new().set_num_format(CURRENCY_FORMAT),
            total_amount: total_label.clone().set_num_format(CURRENCY_FORMAT),
            total_label,
        }
    }
}

/// Renders statements as single-sheet `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl XlsxRenderer {
    /// Renders a statement to workbook bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be assembled or serialized.
    pub fn render(&self, statement: &CashFlowStatement) -> Result<Vec<u8>, RenderError> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        sheet.set_column_width(0, DESCRIPTION_WIDTH)?;
        sheet.set_column_width(1, AMOUNT_WIDTH)?;

        sheet.merge_range(0, 0, 0, 1, TITLE, &styles.title)?;
        let mut row: u32 = 2;

        if statement.has_period() {
            let caption = period_caption(&statement.period_start, &statement.period_end);
            sheet.merge_range(row, 0, row, 1, &caption, &styles.caption)?;
            row += 2;
        }

        for (bucket, items) in statement.sections() {
            sheet.merge_range(row, 0, row, 1, &section_header(bucket.label()), &styles.section)?;
            row += 1;
            for item in items {
                write_item(sheet, row, item, &styles)?;
                row += 1;
            }
            row += 1;
        }

        sheet.write_string_with_format(row, 0, NET_CHANGE_LABEL, &styles.total_label)?;
        sheet.write_number_with_format(
            row,
            1,
            to_cell_number(statement.net_cash_flow),
            &styles.total_amount,
        )?;
        debug!(rows = row + 1, "rendered workbook layout");

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_item(
    sheet: &mut Worksheet,
    row: u32,
    item: &CashFlowItem,
    styles: &Styles,
) -> Result<(), RenderError> {
    let amount = to_cell_number(item.amount);
    if item.is_subtotal() {
        sheet.write_string_with_format(row, 0, &item.description, &styles.total_label)?;
        sheet.write_number_with_format(row, 1, amount, &styles.total_amount)?;
    } else {
        sheet.write_string(row, 0, &item.description)?;
        sheet.write_number_with_format(row, 1, amount, &styles.amount)?;
    }
    Ok(())
}

/// Spreadsheet cells hold binary floats; this is the only place money
/// leaves `Decimal`.
fn to_cell_number(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}
