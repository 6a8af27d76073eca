//! Workbook encoding.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    domain::products::{data::ProductField, records::ProductRecord},
    spreadsheet::{MAX_CELL_CHARS, SpreadsheetError},
};

const SHEET_NAME: &str = "Products";

/// Write products to a single-sheet workbook, headings first, one row each.
///
/// # Errors
///
/// Returns an error if the workbook cannot be assembled or serialised.
pub fn encode(products: &[ProductRecord]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();

    for (col, field) in (0u16..).zip(ProductField::ALL) {
        worksheet.write_string_with_format(0, col, field.as_str(), &bold)?;
    }

    for (row, product) in (1u32..).zip(products) {
        worksheet.write_string(row, 0, cell_text(&product.name))?;
        worksheet.write_number(row, 1, product.price.to_f64().unwrap_or_default())?;
        worksheet.write_number(row, 2, f64::from(product.stock))?;
        worksheet.write_string(row, 3, cell_text(&product.status))?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Text clipped to what one cell can hold.
fn cell_text(text: &str) -> &str {
    text.char_indices()
        .nth(MAX_CELL_CHARS)
        .and_then(|(end, _)| text.get(..end))
        .unwrap_or(text)
}
