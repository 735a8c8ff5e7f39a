use std::{path::PathBuf, sync::Arc};

use crate::product::ProductStore;

/// Shared application state handed to every handler at wiring time.
pub struct AppState {
    /// Entity store backing the product endpoints.
    pub store: Arc<dyn ProductStore>,
    /// Path of the plain-text file read by the version endpoint.
    pub version_file: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        AppState { store, version_file: PathBuf::from("./VERSION") }
    }
}
