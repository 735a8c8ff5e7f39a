mod color;
pub use color::Color;

mod product;
pub use product::Product;

mod product_id;
pub use product_id::ProductId;
