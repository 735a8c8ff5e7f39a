use serde::{Deserialize, Serialize};

/// A color owned by a single product.
///
/// The `product_id` back-reference lives only in the database; it is never
/// part of the wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Color {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
}
