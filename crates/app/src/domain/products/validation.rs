//! Product field validation.
//!
//! Applied to every create and update. Imports only go through here under
//! [`ImportPolicy::Strict`](super::import::ImportPolicy::Strict).

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::{
    domain::products::data::{ProductDraft, ProductField, ProductFields},
    spreadsheet::MAX_CELL_CHARS,
};

/// Decimal places the price column stores.
pub const PRICE_SCALE: u32 = 2;

/// What is wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    NotText,
    NotNumeric,
    NotInteger,
    TooLong,
    TooPrecise,
}

impl Display for FieldProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Missing => "is required",
            Self::NotText => "must be text",
            Self::NotNumeric => "must be a number",
            Self::NotInteger => "must be an integer",
            Self::TooLong => "is longer than a spreadsheet cell allows",
            Self::TooPrecise => "has more than two decimal places",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: ProductField,
    pub problem: FieldProblem,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Every field that failed validation, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> impl Iterator<Item = ProductField> + '_ {
        self.errors.iter().map(|error| error.field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("invalid product fields: ")?;

        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            Display::fmt(error, f)?;
        }

        Ok(())
    }
}

impl Error for ValidationError {}

/// Check a draft and turn it into writable fields.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every missing or mistyped field.
pub fn validate(draft: &ProductDraft) -> Result<ProductFields, ValidationError> {
    let mut errors = Vec::new();

    let mut check = |field: ProductField, problem: Option<FieldProblem>| {
        if let Some(problem) = problem {
            errors.push(FieldError { field, problem });
        }
    };

    let name = text(draft.name.as_ref());
    let price = decimal(draft.price.as_ref());
    let stock = integer(draft.stock.as_ref());
    let status = text(draft.status.as_ref());

    check(ProductField::Name, name.as_ref().err().copied());
    check(ProductField::Price, price.as_ref().err().copied());
    check(ProductField::Stock, stock.as_ref().err().copied());
    check(ProductField::Status, status.as_ref().err().copied());

    match (name, price, stock, status) {
        (Ok(name), Ok(price), Ok(stock), Ok(status)) => Ok(ProductFields {
            name,
            price,
            stock,
            status,
        }),
        _ => Err(ValidationError { errors }),
    }
}

fn text(value: Option<&Value>) -> Result<String, FieldProblem> {
    match value {
        None | Some(Value::Null) => Err(FieldProblem::Missing),
        Some(Value::String(text)) if text.trim().is_empty() => Err(FieldProblem::Missing),
        Some(Value::String(text)) if text.trim().chars().count() > MAX_CELL_CHARS => {
            Err(FieldProblem::TooLong)
        }
        Some(Value::String(text)) => Ok(text.trim().to_string()),
        Some(_) => Err(FieldProblem::NotText),
    }
}

fn decimal(value: Option<&Value>) -> Result<Decimal, FieldProblem> {
    match value {
        None | Some(Value::Null) => Err(FieldProblem::Missing),
        Some(Value::String(text)) if text.trim().is_empty() => Err(FieldProblem::Missing),
        Some(Value::String(text)) => parse_decimal(text).ok_or(FieldProblem::NotNumeric),
        Some(Value::Number(number)) => number_to_decimal(number).ok_or(FieldProblem::NotNumeric),
        Some(_) => Err(FieldProblem::NotNumeric),
    }
    .and_then(|price| {
        if fits_price_scale(price) {
            Ok(price)
        } else {
            Err(FieldProblem::TooPrecise)
        }
    })
}

fn integer(value: Option<&Value>) -> Result<i32, FieldProblem> {
    match value {
        None | Some(Value::Null) => Err(FieldProblem::Missing),
        Some(Value::String(text)) if text.trim().is_empty() => Err(FieldProblem::Missing),
        Some(Value::String(text)) => text.trim().parse().map_err(|_ignored| FieldProblem::NotInteger),
        Some(Value::Number(number)) => number_to_i32(number).ok_or(FieldProblem::NotInteger),
        Some(_) => Err(FieldProblem::NotInteger),
    }
}

/// Parse plain (`"1.50"`) or scientific (`"1.5e2"`) decimal text.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();

    Decimal::from_str(text)
        .or_else(|_ignored| Decimal::from_scientific(text))
        .ok()
}

/// `1.50` fits, `1.555` would be rounded by the store.
pub(crate) fn fits_price_scale(price: Decimal) -> bool {
    price.normalize().scale() <= PRICE_SCALE
}

/// JSON numbers render in their shortest round-trip form, so going through
/// text keeps `19.99` as `19.99` instead of its nearest binary float.
pub(crate) fn number_to_decimal(number: &Number) -> Option<Decimal> {
    parse_decimal(&number.to_string())
}

pub(crate) fn number_to_i32(number: &Number) -> Option<i32> {
    number.as_i64().and_then(|value| i32::try_from(value).ok())
}
