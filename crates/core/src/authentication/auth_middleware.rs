use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::authentication::basic_auth::validate_basic_auth;
use crate::shared::unauthorized;

/// Basic auth middleware guarding the API routes.
///
/// Validates that the request carries the fixed server credential pair.
/// Every failure shape (missing header, wrong scheme, undecodable payload,
/// wrong pair) collapses to a 401 response.
pub async fn basic_auth_guard(req: Request<Body>, next: Next) -> Response {
    if let Err(e) = validate_basic_auth(req.headers()) {
        debug!("Rejecting request to {}: {}", req.uri(), e);
        return unauthorized(None).into_response();
    }

    next.run(req).await
}
