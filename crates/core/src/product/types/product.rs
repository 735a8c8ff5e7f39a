use serde::{Deserialize, Serialize};

use super::{Color, ProductId};

/// A catalog product and its owned colors.
///
/// One shape serves inbound payloads (`/add`, `/delete`) and responses:
/// `{"id": int, "code": string, "color": [{"id": int, "name": string}]}`.
/// Every field defaults so partial payloads (a delete body carrying only the
/// id) decode cleanly. Row timestamps never leave the database layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "color", default)]
    pub colors: Vec<Color>,
}
