use std::env;

const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8080";

/// Listener configuration resolved from the environment.
///
/// The database connection string is read separately by the postgres module;
/// only the HTTP bind address lives here.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_address: String,
}

impl ApiConfig {
    /// Reads `LISTEN_ADDRESS`, falling back to a local-only default bind.
    pub fn from_env() -> Self {
        let listen_address =
            env::var("LISTEN_ADDRESS").unwrap_or_else(|_| DEFAULT_LISTEN_ADDRESS.to_string());

        ApiConfig { listen_address }
    }
}
