//! Export Products Handler

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::*,
};
use tokio::task;

use inventory_app::spreadsheet::{self, XLSX_CONTENT_TYPE};

use crate::{extensions::*, products::errors::spreadsheet_status_error};

const ATTACHMENT: &str = r#"attachment; filename="products.xlsx""#;

/// Export Products Handler
///
/// Streams every product as an xlsx attachment, in list order.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products for export")?;

    let bytes = task::spawn_blocking(move || spreadsheet::encode(&products))
        .await
        .or_500("spreadsheet encoding task failed")?
        .map_err(spreadsheet_status_error)?;

    res.add_header(CONTENT_TYPE, XLSX_CONTENT_TYPE, true)
        .or_500("failed to set content type")?
        .add_header(CONTENT_DISPOSITION, ATTACHMENT, true)
        .or_500("failed to set content disposition")?
        .body(bytes);

    Ok(())
}
