use std::{str::FromStr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::Method,
    Json,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    product::{Product, ProductId},
    shared::{bad_request, forbidden, HttpError},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub id: Option<String>,
}

/// Lists products, colors eagerly loaded.
///
/// With a non-empty `?id=` the result is the matching product alone; an id
/// that was never created yields an empty array, not an error. The response
/// is always a JSON array, even in the single-id case.
pub async fn get(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, HttpError> {
    if method != Method::GET {
        return Err(forbidden("Only the GET method is supported.".to_string()));
    }

    let products = match query.id.as_deref().filter(|id| !id.is_empty()) {
        Some(raw) => {
            let id = ProductId::from_str(raw)
                .map_err(|_| bad_request(format!("Invalid product id: {}", raw)))?;

            state.store.get_product(id).await?.into_iter().collect()
        }
        None => state.store.get_products().await?,
    };

    Ok(Json(products))
}
