use crate::postgres::{PostgresClient, PostgresError};

/// Applies the shoestore database schema version 1.0.0.
///
/// Both tables carry the soft-delete column (`deleted_on`) plus row
/// timestamps; none of these are ever serialized to clients. Color rows
/// reference their owning product and are reached only through it.
pub async fn apply_v1_0_0_schema(client: &PostgresClient) -> Result<(), PostgresError> {
    let schema_sql = r#"
        CREATE SCHEMA IF NOT EXISTS product;

        CREATE TABLE IF NOT EXISTS product.record (
            id SERIAL PRIMARY KEY,
            code VARCHAR(100) NOT NULL,
            deleted_on TIMESTAMPTZ NULL,
            updated_on TIMESTAMPTZ DEFAULT NOW() NOT NULL,
            created_at TIMESTAMPTZ DEFAULT NOW() NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product.color (
            id SERIAL PRIMARY KEY,
            product_id INT NOT NULL,
            name VARCHAR(100) NOT NULL,
            deleted_on TIMESTAMPTZ NULL,
            updated_on TIMESTAMPTZ DEFAULT NOW() NOT NULL,
            created_at TIMESTAMPTZ DEFAULT NOW() NOT NULL,
            CONSTRAINT fk_product_color_product_id
                FOREIGN KEY (product_id)
                    REFERENCES product.record (id)
        );

        CREATE INDEX IF NOT EXISTS idx_product_record_deleted_on
            ON product.record (deleted_on);

        CREATE INDEX IF NOT EXISTS idx_product_color_product_id
            ON product.color (product_id);
    "#;

    client.batch_execute(schema_sql).await
}
