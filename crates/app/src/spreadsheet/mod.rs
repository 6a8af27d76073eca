//! Spreadsheet import/export.
//!
//! Imports accept xlsx, xlsm, xlsb, xls, ods and CSV; exports are always xlsx.
//!
//! Both directions use the same columns, in [`ProductField::ALL`] order, so an
//! exported file can be imported again unchanged.

use thiserror::Error;

use crate::domain::products::data::{ProductDraft, ProductField};

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

/// Content type of the exported workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Most characters a single spreadsheet cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Values filled in when a row has no usable cell for the column.
pub const COLUMN_DEFAULTS: &[(ProductField, &str)] = &[(ProductField::Status, "active")];

/// One data row of an imported sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number as shown by spreadsheet programs.
    pub number: usize,
    pub draft: ProductDraft,
}

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("could not read workbook: {0}")]
    Read(#[from] calamine::Error),

    #[error("could not read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("worksheet has no heading row")]
    MissingHeadings,

    #[error("could not write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
