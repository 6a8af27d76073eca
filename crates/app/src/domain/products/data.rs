//! Products Data

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four user-editable product fields, in spreadsheet column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Price,
    Stock,
    Status,
}

impl ProductField {
    pub const ALL: [ProductField; 4] = [Self::Name, Self::Price, Self::Stock, Self::Status];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Status => "status",
        }
    }

    /// Look up a field by its (already normalised) column heading.
    #[must_use]
    pub fn from_heading(heading: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == heading)
    }
}

impl Display for ProductField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unvalidated product fields, as received from a form or a spreadsheet row.
///
/// `None` means the field was absent (or `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub stock: Option<Value>,
    pub status: Option<Value>,
}

impl ProductDraft {
    #[must_use]
    pub fn get(&self, field: ProductField) -> Option<&Value> {
        match field {
            ProductField::Name => self.name.as_ref(),
            ProductField::Price => self.price.as_ref(),
            ProductField::Stock => self.stock.as_ref(),
            ProductField::Status => self.status.as_ref(),
        }
    }

    pub fn set(&mut self, field: ProductField, value: Value) {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Price => &mut self.price,
            ProductField::Stock => &mut self.stock,
            ProductField::Status => &mut self.status,
        };

        *slot = Some(value);
    }
}

/// Validated product fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub status: String,
}

/// A product row produced by a spreadsheet import.
///
/// Fields stay optional: under the permissive import policy nothing checks
/// them before they reach the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub status: Option<String>,
}

impl From<ProductFields> for ImportedProduct {
    fn from(fields: ProductFields) -> Self {
        ImportedProduct {
            name: Some(fields.name),
            price: Some(fields.price),
            stock: Some(fields.stock),
            status: Some(fields.status),
        }
    }
}
