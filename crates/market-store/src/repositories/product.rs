//! JSON-collection implementation of ProductRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::{Product, ProductStatus};
use market_core::traits::{ProductRepository, RepoResult};
use market_core::value_objects::Snowflake;

use crate::collection::JsonCollection;

/// Catalog backed by the `products` collection
///
/// Comments live inline on the product record, so delete cascades for
/// free and there is no separate comments collection to keep consistent.
#[derive(Clone)]
pub struct JsonProductRepository {
    products: Arc<JsonCollection<Product>>,
}

impl JsonProductRepository {
    pub fn new(products: Arc<JsonCollection<Product>>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductRepository for JsonProductRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>> {
        Ok(self.products.get(id))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.products.values())
    }

    #[instrument(skip(self))]
    async fn find_by_status(&self, status: ProductStatus) -> RepoResult<Vec<Product>> {
        Ok(self.products.filter(|p| p.status == status))
    }

    #[instrument(skip(self))]
    async fn find_by_seller(&self, seller_id: Snowflake) -> RepoResult<Vec<Product>> {
        Ok(self.products.filter(|p| p.seller_id == seller_id))
    }

    #[instrument(skip(self, product))]
    async fn create(&self, product: &Product) -> RepoResult<()> {
        self.products.upsert(product.clone())
    }

    #[instrument(skip(self, product))]
    async fn update(&self, product: &Product) -> RepoResult<()> {
        self.products.upsert(product.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        self.products.remove(id)
    }
}
