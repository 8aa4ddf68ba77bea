//! Statement rendering.
//!
//! - [`XlsxRenderer`] produces the styled workbook users download
//! - [`CsvRenderer`] produces a two-column text rendition

pub mod csv_export;
pub mod error;
pub mod xlsx;


pub use csv_export::CsvRenderer;
pub use error::RenderError;
pub use xlsx::{SHEET_NAME, XlsxRenderer};

/// Statement title.
pub const TITLE: &str = "STATEMENT OF CASH FLOWS";

/// Label of the closing net change row.
pub const NET_CHANGE_LABEL: &str = "NET INCREASE (DECREASE) IN CASH";

/// Caption shown under the title when the period is known.
#[must_use]
pub fn period_caption(start: &str, end: &str) -> String {
    format!("For the period from {start} to {end}")
}

/// Header of an activity section.
#[must_use]
pub fn section_header(label: &str) -> String {
    format!("CASH FLOWS FROM {} ACTIVITIES", label.to_uppercase())
}
