mod auth_middleware;
pub use auth_middleware::basic_auth_guard;

mod basic_auth;
pub use basic_auth::{validate, validate_basic_auth, BasicAuthCredentials, BasicAuthError};
