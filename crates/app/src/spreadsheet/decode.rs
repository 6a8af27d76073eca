//! Workbook and CSV decoding.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;
use serde_json::{Number, Value};

use crate::{
    domain::products::data::{ProductDraft, ProductField},
    spreadsheet::{COLUMN_DEFAULTS, SheetRow, SpreadsheetError},
};

/// Largest float that still converts to an integer without losing precision.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// xlsx, xlsm, xlsb and ods files are zip archives.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Legacy xls files are compound documents.
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Cells of one row, with the row's 1-based number.
type RawRow = (usize, Vec<Option<Value>>);

/// Read an uploaded sheet into product drafts.
///
/// Workbooks are recognised by their signature and read from the first
/// worksheet; anything else is read as UTF-8 CSV. The first row holds the
/// headings. Columns whose heading is not a product field are ignored, blank
/// rows are skipped, and [`COLUMN_DEFAULTS`] fill any field left empty.
///
/// # Errors
///
/// Returns an error when the bytes are neither a workbook `calamine`
/// understands nor readable CSV, or the sheet has no heading row.
pub fn decode(bytes: Vec<u8>) -> Result<Vec<SheetRow>, SpreadsheetError> {
    if is_workbook(&bytes) {
        decode_workbook(bytes)
    } else {
        decode_csv(&bytes)
    }
}

fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(CFB_MAGIC)
}

fn decode_workbook(bytes: Vec<u8>) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();

    let columns = heading_columns(
        rows.next()
            .ok_or(SpreadsheetError::MissingHeadings)?
            .iter()
            .map(ToString::to_string),
    )?;

    let rows = rows.enumerate().map(|(offset, cells)| {
        // heading row is `first_row`, both 0-based
        (
            first_row + offset + 2,
            cells.iter().map(cell_value).collect::<Vec<_>>(),
        )
    });

    Ok(sheet_rows(&columns, rows))
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();

    let headings = records.next().ok_or(SpreadsheetError::MissingHeadings)??;
    let columns = heading_columns(headings.iter().map(str::to_owned))?;

    let mut rows: Vec<RawRow> = Vec::new();

    for record in records {
        let record = record?;

        let number = record
            .position()
            .and_then(|position| usize::try_from(position.line()).ok())
            .unwrap_or_default();

        rows.push((number, record.iter().map(text_value).collect()));
    }

    Ok(sheet_rows(&columns, rows))
}

fn heading_columns(
    headings: impl Iterator<Item = String>,
) -> Result<Vec<Option<ProductField>>, SpreadsheetError> {
    let columns: Vec<_> = headings
        .map(|heading| ProductField::from_heading(&normalize_heading(&heading)))
        .collect();

    if columns.iter().all(Option::is_none) {
        return Err(SpreadsheetError::MissingHeadings);
    }

    Ok(columns)
}

fn sheet_rows(
    columns: &[Option<ProductField>],
    rows: impl IntoIterator<Item = RawRow>,
) -> Vec<SheetRow> {
    rows.into_iter()
        .filter(|(_, cells)| cells.iter().any(Option::is_some))
        .map(|(number, cells)| {
            let mut draft = ProductDraft::default();

            for (field, value) in columns.iter().zip(cells) {
                if let Some(field) = field
                    && let Some(value) = value
                {
                    draft.set(*field, value);
                }
            }

            for (field, default) in COLUMN_DEFAULTS {
                if draft.get(*field).is_none() {
                    draft.set(*field, Value::from(*default));
                }
            }

            SheetRow { number, draft }
        })
        .collect()
}

/// `" Unit Price "` → `unit_price`
fn normalize_heading(heading: &str) -> String {
    heading
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn text_value(text: &str) -> Option<Value> {
    (!text.trim().is_empty()).then(|| Value::from(text))
}

fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        _ if is_blank(cell) => None,
        Data::String(text) => Some(Value::from(text.as_str())),
        Data::Int(value) => Some(Value::from(*value)),
        Data::Float(value) => float_value(*value),
        Data::Bool(value) => Some(Value::Bool(*value)),
        other => Some(Value::from(other.to_string())),
    }
}

/// Workbooks store every number as a float; whole ones come back as integers.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is integral and within the exactly representable range"
)]
fn float_value(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT {
        return Some(Value::from(value as i64));
    }

    Number::from_f64(value).map(Value::Number)
}
