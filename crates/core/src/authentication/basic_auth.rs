use axum::http::HeaderMap;
use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

// The single allowed credential pair. There is deliberately no credential
// store behind this gate.
const AUTH_USERNAME: &str = "admin";
const AUTH_PASSWORD: &str = "test";

#[derive(Error, Debug)]
pub enum BasicAuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,
    #[error("Invalid Authorization header format")]
    InvalidHeaderFormat,
    #[error("Invalid base64 encoding")]
    InvalidBase64,
    #[error("Invalid credentials format")]
    InvalidCredentialsFormat,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Returns true iff the pair matches the fixed allow-list entry.
pub fn validate(username: &str, password: &str) -> bool {
    username == AUTH_USERNAME && password == AUTH_PASSWORD
}

#[derive(Debug, Clone)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

impl BasicAuthCredentials {
    /// Extracts the authentication from headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, BasicAuthError> {
        let auth_header = headers
            .get("Authorization")
            .ok_or(BasicAuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| BasicAuthError::InvalidHeaderFormat)?;

        if !auth_header.starts_with("Basic ") {
            return Err(BasicAuthError::InvalidHeaderFormat);
        }

        let base64_credentials = &auth_header[6..];
        let decoded = general_purpose::STANDARD
            .decode(base64_credentials)
            .map_err(|_| BasicAuthError::InvalidBase64)?;

        let credentials_str =
            String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidBase64)?;

        let parts: Vec<&str> = credentials_str.splitn(2, ':').collect();
        if parts.len() != 2 {
            return Err(BasicAuthError::InvalidCredentialsFormat);
        }

        Ok(BasicAuthCredentials { username: parts[0].to_string(), password: parts[1].to_string() })
    }
}

/// Validates basic auth credentials from headers.
pub fn validate_basic_auth(headers: &HeaderMap) -> Result<(), BasicAuthError> {
    let credentials = BasicAuthCredentials::from_headers(headers)?;

    if validate(&credentials.username, &credentials.password) {
        Ok(())
    } else {
        Err(BasicAuthError::InvalidCredentials)
    }
}
