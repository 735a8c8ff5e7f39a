use async_trait::async_trait;
use thiserror::Error;

use super::{Product, ProductId};
use crate::postgres::{PostgresClient, PostgresError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] PostgresError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Capability set backing the product endpoints.
///
/// Handlers depend on this trait rather than on `PostgresClient` directly so
/// tests can wire the router against an in-memory store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new product plus any nested colors, returning the entity
    /// populated with store-assigned ids.
    async fn create_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Returns every live product with its colors eagerly loaded.
    async fn get_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Returns the live product matching `id`, or None if absent.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Soft-deletes the product matching `id`. Deleting an unknown id is not
    /// an error.
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
}

#[async_trait]
impl ProductStore for PostgresClient {
    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        Ok(self.insert_product(product).await?)
    }

    async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.all_products().await?)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.product_by_id(id).await?)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        Ok(self.soft_delete_product(id).await?)
    }
}
