pub mod api;
mod db;
mod store;
pub use store::{ProductStore, StoreError};
mod types;
pub use types::{Color, Product, ProductId};
