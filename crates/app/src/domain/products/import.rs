//! Import policies.
//!
//! Turns decoded spreadsheet rows into rows the store can insert.

use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::products::{
        data::{ImportedProduct, ProductDraft, ProductField},
        validation::{
            ValidationError, fits_price_scale, number_to_decimal, number_to_i32, parse_decimal,
            validate,
        },
    },
    spreadsheet::SheetRow,
};

/// How strictly imported rows are checked before they are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ImportPolicy {
    /// Copy cells as-is. Missing values are left for the store to reject.
    #[default]
    Permissive,

    /// Run every row through the same validation as create and update.
    Strict,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("row {row}: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("row {row}: column `{field}` cannot hold {value}")]
    UnreadableCell {
        row: usize,
        field: ProductField,
        value: Value,
    },
}

impl ImportPolicy {
    /// Convert every row, or fail on the first one that cannot be converted.
    ///
    /// Nothing is written here, so a failure leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] naming the sheet row that could not be used.
    pub fn apply(self, rows: Vec<SheetRow>) -> Result<Vec<ImportedProduct>, ImportError> {
        rows.into_iter()
            .map(|row| match self {
                Self::Permissive => permissive(row),
                Self::Strict => validate(&row.draft)
                    .map(Into::into)
                    .map_err(|source| ImportError::Invalid {
                        row: row.number,
                        source,
                    }),
            })
            .collect()
    }
}

fn permissive(row: SheetRow) -> Result<ImportedProduct, ImportError> {
    let SheetRow {
        number: row_number,
        draft,
    } = row;

    let unreadable = |field: ProductField, value: &Value| ImportError::UnreadableCell {
        row: row_number,
        field,
        value: value.clone(),
    };

    let price = draft
        .get(ProductField::Price)
        .map(|value| {
            match value {
                Value::Number(number) => number_to_decimal(number),
                Value::String(text) => parse_decimal(text),
                _ => None,
            }
            .filter(|price| fits_price_scale(*price))
            .ok_or_else(|| unreadable(ProductField::Price, value))
        })
        .transpose()?;

    let stock = draft
        .get(ProductField::Stock)
        .map(|value| {
            match value {
                Value::Number(number) => number_to_i32(number),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            }
            .ok_or_else(|| unreadable(ProductField::Stock, value))
        })
        .transpose()?;

    Ok(ImportedProduct {
        name: as_text(&draft, ProductField::Name),
        price,
        stock,
        status: as_text(&draft, ProductField::Status),
    })
}

fn as_text(draft: &ProductDraft, field: ProductField) -> Option<String> {
    match draft.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        other => Some(other.to_string()),
    }
}
