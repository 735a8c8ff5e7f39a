use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    product::Product,
    shared::{forbidden, internal_server_error, HttpError},
};

/// Creates a product, plus any nested colors, from the request body.
///
/// Responds 201 with the persisted entity, ids assigned by the store.
pub async fn add(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    if method != Method::POST {
        return Err(forbidden("Only the POST method is supported.".to_string()));
    }

    let product: Product = serde_json::from_slice(&body).map_err(|e| {
        error!("Failed to decode product payload: {}", e);
        internal_server_error(None)
    })?;

    info!("Adding product with code {}", product.code);

    let created = state.store.create_product(product).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
