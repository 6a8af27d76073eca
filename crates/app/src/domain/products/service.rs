//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::products::{
        data::{ImportedProduct, ProductFields},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    async fn insert(
        &self,
        fields: &ImportedProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), fields)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        fields: ProductFields,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.insert(&fields.into()).await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        fields: ProductFields,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &fields)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn import_products(
        &self,
        products: Vec<ImportedProduct>,
    ) -> Result<usize, ProductsServiceError> {
        let total = products.len();

        for (imported, product) in products.iter().enumerate() {
            if let Err(error) = self.insert(product).await {
                warn!(
                    position = imported + 1,
                    imported,
                    total,
                    error = %error,
                    "import stopped at failing row"
                );

                return Err(error);
            }
        }

        info!(imported = total, "import finished");

        Ok(total)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Creates a product under a freshly generated UUID.
    async fn create_product(
        &self,
        fields: ProductFields,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces every field of an existing product.
    async fn update_product(
        &self,
        product: ProductUuid,
        fields: ProductFields,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Inserts imported rows in order, each in its own transaction.
    ///
    /// Stops at the first row the store rejects. Rows before it stay written.
    async fn import_products(
        &self,
        products: Vec<ImportedProduct>,
    ) -> Result<usize, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn pen() -> ProductFields {
        ProductFields {
            name: "Pen".to_string(),
            price: Decimal::new(15, 1),
            stock: 100,
            status: "active".to_string(),
        }
    }

    fn imported(name: Option<&str>, price: i64, stock: i32) -> ImportedProduct {
        ImportedProduct {
            name: name.map(str::to_string),
            price: Some(Decimal::from(price)),
            stock: Some(stock),
            status: Some("active".to_string()),
        }
    }

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(pen()).await?;

        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, Decimal::new(15, 1));
        assert_eq!(product.stock, 100);
        assert_eq!(product.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn created_product_is_listed_once_with_a_fresh_id() -> TestResult {
        let ctx = TestContext::new().await;

        let existing = ctx.products.create_product(pen()).await?;
        let created = ctx.products.create_product(pen()).await?;

        let products = ctx.products.list_products().await?;

        assert_ne!(existing.uuid, created.uuid);
        assert_eq!(
            products.iter().filter(|p| p.uuid == created.uuid).count(),
            1,
            "created product should be listed exactly once"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(pen()).await?;
        let second = ctx.products.create_product(pen()).await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products().await?;

        assert!(products.is_empty(), "expected no products, got {products:?}");

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_every_field() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;

        let replacement = ProductFields {
            name: "Fountain pen".to_string(),
            price: Decimal::new(2450, 2),
            stock: 3,
            status: "inactive".to_string(),
        };

        let updated = ctx
            .products
            .update_product(created.uuid, replacement.clone())
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, replacement.name);
        assert_eq!(updated.price, replacement.price);
        assert_eq!(updated.stock, replacement.stock);
        assert_eq!(updated.status, replacement.status);
        assert!(updated.updated_at >= created.updated_at);

        let listed = ctx.products.list_products().await?;

        assert_eq!(listed, vec![updated]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), pen())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_removes_it_from_the_list() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;

        ctx.products.delete_product(created.uuid).await?;

        let products = ctx.products.list_products().await?;

        assert!(
            !products.iter().any(|p| p.uuid == created.uuid),
            "deleted product should not appear in list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;

        ctx.products.delete_product(created.uuid).await?;

        let result = ctx.products.delete_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn import_products_inserts_every_row() -> TestResult {
        let ctx = TestContext::new().await;

        let imported_count = ctx
            .products
            .import_products(vec![imported(Some("Pen"), 1, 10), imported(Some("Ink"), 2, 20)])
            .await?;

        let mut names: Vec<String> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();

        names.sort();

        assert_eq!(imported_count, 2);
        assert_eq!(names, vec!["Ink".to_string(), "Pen".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn import_products_stops_at_missing_data_and_keeps_earlier_rows() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .import_products(vec![
                imported(Some("Pen"), 1, 10),
                imported(None, 2, 20),
                imported(Some("Ink"), 3, 30),
            ])
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        let names: Vec<String> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Pen".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn import_products_rejects_prices_beyond_the_column() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .import_products(vec![imported(Some("Pen"), 10_000_000_000_000, 1)])
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn import_products_rejects_text_beyond_a_spreadsheet_cell() {
        let ctx = TestContext::new().await;

        let name = "x".repeat(40_000);

        let result = ctx
            .products
            .import_products(vec![imported(Some(&name), 1, 1)])
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reused_ids_are_storage_errors() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ProductUuid::new();
        let row = imported(Some("Pen"), 1, 1);

        let mut tx = ctx.products.db.begin().await?;

        ctx.products
            .repository
            .create_product(&mut tx, product, &row)
            .await?;

        let result = ctx
            .products
            .repository
            .create_product(&mut tx, product, &row)
            .await
            .map_err(ProductsServiceError::from);

        assert!(
            matches!(result, Err(ProductsServiceError::Sql(_))),
            "expected a storage error, got {result:?}"
        );

        Ok(())
    }
}
