use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    product::Product,
    shared::{forbidden, internal_server_error, HttpError},
};

/// Soft-deletes the product whose id is carried in the request body.
///
/// The body is a product payload of which only the id field matters.
/// Responds 200 with an empty body; deleting an unknown id also succeeds.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    if method != Method::DELETE {
        return Err(forbidden("Only the DELETE method is supported.".to_string()));
    }

    let product: Product = serde_json::from_slice(&body).map_err(|e| {
        error!("Failed to decode product payload: {}", e);
        internal_server_error(None)
    })?;

    info!("Deleting product {}", product.id);

    state.store.delete_product(product.id).await?;

    Ok(StatusCode::OK)
}
