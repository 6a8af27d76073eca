//! Import Products Handler

use salvo::prelude::*;
use tokio::task;
use tracing::{info, warn};

use inventory_app::spreadsheet;

use crate::{
    extensions::*,
    products::{
        errors::{import_status_error, into_status_error, spreadsheet_status_error},
        models::ImportResponse,
    },
};

/// Multipart field carrying the workbook or CSV file.
const FILE_FIELD: &str = "file";

/// Import Products Handler
///
/// Decodes the uploaded workbook or CSV file, applies the configured import policy and
/// inserts the rows in file order.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ImportResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let Some(path) = req.file(FILE_FIELD).await.map(|file| file.path().clone()) else {
        return Err(StatusError::bad_request().brief("Missing spreadsheet upload in field `file`"));
    };

    let bytes = tokio::fs::read(&path)
        .await
        .or_500("failed to read uploaded spreadsheet")?;

    let rows = task::spawn_blocking(move || spreadsheet::decode(bytes))
        .await
        .or_500("spreadsheet decoding task failed")?
        .map_err(spreadsheet_status_error)?;

    let products = state.import_policy.apply(rows).map_err(|error| {
        warn!(policy = ?state.import_policy, "rejected spreadsheet import: {error}");

        import_status_error(&error)
    })?;

    let imported = state
        .app
        .products
        .import_products(products)
        .await
        .map_err(into_status_error)?;

    info!(imported, "spreadsheet imported");

    Ok(Json(ImportResponse {
        success: true,
        imported,
    }))
}
