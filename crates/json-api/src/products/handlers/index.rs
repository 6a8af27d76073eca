//! Product Index Handler

use salvo::prelude::*;

use crate::{extensions::*, products::models::ProductResponse};

/// Every product, newest first.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
