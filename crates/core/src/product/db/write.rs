use crate::{
    postgres::{PostgresClient, PostgresError},
    product::{Color, Product, ProductId},
};

impl PostgresClient {
    /// Inserts a product row plus its nested colors in one transaction and
    /// returns the entity with store-assigned ids.
    pub async fn insert_product(&self, product: Product) -> Result<Product, PostgresError> {
        let mut conn = self.pool.get().await?;
        let transaction = conn.transaction().await.map_err(PostgresError::PgError)?;

        let row = transaction
            .query_one(
                "INSERT INTO product.record (code) VALUES ($1) RETURNING id",
                &[&product.code],
            )
            .await
            .map_err(PostgresError::PgError)?;
        let id: ProductId = row.get("id");

        let mut colors = Vec::with_capacity(product.colors.len());
        for color in &product.colors {
            let row = transaction
                .query_one(
                    "INSERT INTO product.color (product_id, name) VALUES ($1, $2) RETURNING id",
                    &[&id, &color.name],
                )
                .await
                .map_err(PostgresError::PgError)?;

            colors.push(Color { id: row.get("id"), name: color.name.clone() });
        }

        transaction.commit().await.map_err(PostgresError::PgError)?;

        Ok(Product { id, code: product.code, colors })
    }

    /// Soft-deletes the product row matching `id`.
    ///
    /// Color rows are left untouched; they become unreachable once the owning
    /// product is gone because reads join through live products only.
    pub async fn soft_delete_product(&self, id: ProductId) -> Result<(), PostgresError> {
        self.execute(
            "UPDATE product.record SET deleted_on = NOW(), updated_on = NOW() \
             WHERE id = $1 AND deleted_on IS NULL",
            &[&id],
        )
        .await?;

        Ok(())
    }
}
