//! Update Product Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use inventory_app::domain::products::{
    data::ProductDraft, records::ProductUuid, validation::validate,
};

use crate::{
    extensions::*,
    products::{
        errors::{into_status_error, validation_status_error},
        models::ProductResponse,
    },
};

/// Product Update Handler
///
/// Replaces all four fields of the product.
#[handler]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductDraft>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductUuid::from_uuid(product.into_inner());

    let fields = validate(&json.into_inner()).map_err(|error| validation_status_error(&error))?;

    let updated = state
        .app
        .products
        .update_product(product, fields)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use inventory_app::domain::products::{
        MockProductsService, ProductsServiceError, data::ProductFields,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(
            repo,
            Router::with_path("api/products/{product}").put(handler),
        )
    }

    fn ink() -> ProductFields {
        ProductFields {
            name: "Ink".to_string(),
            price: Decimal::from(3),
            stock: 0,
            status: "inactive".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let mut product = make_product("Ink");
        let uuid = product.uuid;

        product.price = Decimal::from(3);
        product.stock = 0;
        product.status = "inactive".to_string();

        let expected = ProductResponse::from(product.clone());

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, fields| *u == uuid && *fields == ink())
            .return_once(move |_, _| Ok(product));

        repo.expect_create_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::put(format!("http://example.com/api/products/{uuid}"))
            .json(&json!({ "name": "Ink", "price": 3, "stock": 0, "status": "inactive" }))
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, expected);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_not_found_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, _| *u == uuid)
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/api/products/{uuid}"))
            .json(&json!({ "name": "Ink", "price": 3, "stock": 0, "status": "inactive" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_invalid_uuid_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product().never();

        let res = TestClient::put("http://example.com/api/products/123")
            .json(&json!({ "name": "Ink", "price": 3, "stock": 0, "status": "inactive" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_invalid_fields_returns_422() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_update_product().never();

        let mut res = TestClient::put(format!("http://example.com/api/products/{uuid}"))
            .json(&json!({ "name": "", "price": "cheap", "stock": 0, "status": "inactive" }))
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(
            body.contains("name is required") && body.contains("price must be a number"),
            "unexpected body: {body}"
        );

        Ok(())
    }
}
