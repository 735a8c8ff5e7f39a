mod app_state;
pub use app_state::AppState;
pub mod authentication;
mod environment;
pub use environment::ApiConfig;
mod logger;
pub use logger::{setup_info_logger, setup_logger};
mod postgres;
pub use postgres::{PostgresClient, PostgresConnectionError, PostgresError};
pub mod product;
mod schema;
pub use schema::apply_schema;
mod shared;
pub use shared::HttpError;
mod startup;
pub use startup::{create_app, start, StartError};
