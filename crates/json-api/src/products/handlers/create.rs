//! Create Product Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use inventory_app::domain::products::{data::ProductDraft, validation::validate};

use crate::{
    extensions::*,
    products::{
        errors::{into_status_error, validation_status_error},
        models::ProductResponse,
    },
};

/// Create Product Handler
#[handler]
pub(crate) async fn handler(
    json: JsonBody<ProductDraft>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let fields = validate(&json.into_inner()).map_err(|error| validation_status_error(&error))?;

    let created = state
        .app
        .products
        .create_product(fields)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
