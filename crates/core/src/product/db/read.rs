use std::collections::HashMap;

use tokio_postgres::Row;

use crate::{
    postgres::{PostgresClient, PostgresError},
    product::{Color, Product, ProductId},
};

// One row per (product, color); products without colors still produce a row
// with NULL color columns. Soft-deleted rows are filtered on both sides of
// the join.
const PRODUCT_WITH_COLORS_SQL: &str = r#"
    SELECT
        p.id,
        p.code,
        c.id AS color_id,
        c.name AS color_name
    FROM product.record p
    LEFT JOIN product.color c
        ON c.product_id = p.id AND c.deleted_on IS NULL
    WHERE p.deleted_on IS NULL
"#;

impl PostgresClient {
    /// Retrieves every live product with its colors eagerly loaded.
    ///
    /// Products with multiple colors come back as one row per color and are
    /// consolidated into single Product values. Order is not guaranteed.
    pub async fn all_products(&self) -> Result<Vec<Product>, PostgresError> {
        let rows = self.query(PRODUCT_WITH_COLORS_SQL, &[]).await?;
        Ok(consolidate(&rows))
    }

    /// Retrieves the live product matching `id`, colors included.
    pub async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, PostgresError> {
        let query = format!("{PRODUCT_WITH_COLORS_SQL} AND p.id = $1");
        let rows = self.query(&query, &[&id]).await?;
        Ok(consolidate(&rows).pop())
    }
}

fn consolidate(rows: &[Row]) -> Vec<Product> {
    let mut products: HashMap<ProductId, Product> = HashMap::new();

    for row in rows {
        let id: ProductId = row.get("id");

        let product = products
            .entry(id)
            .or_insert_with(|| Product { id, code: row.get("code"), colors: Vec::new() });

        if let Some(color_id) = row.get::<_, Option<i32>>("color_id") {
            product.colors.push(Color { id: color_id, name: row.get("color_name") });
        }
    }

    products.into_values().collect()
}
