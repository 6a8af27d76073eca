//! Product Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use inventory_app::{
    domain::products::{ProductsServiceError, import::ImportError, validation::ValidationError},
    spreadsheet::SpreadsheetError,
};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Product is missing required data")
        }
        ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Product data is out of range")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
    }
}

pub(crate) fn validation_status_error(error: &ValidationError) -> StatusError {
    StatusError::unprocessable_entity().brief(error.to_string())
}

pub(crate) fn spreadsheet_status_error(error: SpreadsheetError) -> StatusError {
    match error {
        SpreadsheetError::Read(_)
        | SpreadsheetError::Csv(_)
        | SpreadsheetError::NoWorksheet
        | SpreadsheetError::MissingHeadings => {
            warn!("rejected spreadsheet: {error}");

            StatusError::bad_request().brief(error.to_string())
        }
        SpreadsheetError::Write(source) => {
            error!("failed to build workbook: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn import_status_error(error: &ImportError) -> StatusError {
    match error {
        ImportError::Invalid { .. } => StatusError::unprocessable_entity().brief(error.to_string()),
        ImportError::UnreadableCell { .. } => StatusError::bad_request().brief(error.to_string()),
    }
}
