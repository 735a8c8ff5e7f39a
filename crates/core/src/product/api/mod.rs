use std::sync::Arc;

use axum::{routing::any, Router};

use crate::app_state::AppState;

mod add;
mod delete;
mod list;

// Routes are registered with `any` because method enforcement is part of the
// handler contract: a mismatch answers 403, not the router's default 405.
pub fn create_product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add", any(add::add))
        .route("/list", any(list::get))
        .route("/delete", any(delete::delete))
}
