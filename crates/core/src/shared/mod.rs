mod http_errors;
pub use http_errors::{bad_request, forbidden, internal_server_error, unauthorized, HttpError};
