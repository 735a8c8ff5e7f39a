use std::{error::Error, fmt::Display, str::FromStr};

use bytes::BytesMut;
use serde::{Deserialize, Deserializer, Serialize};
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};

/// Store-assigned product identity. Zero means "not yet persisted", matching
/// the wire format where inbound payloads may omit the id.
#[derive(Debug, Copy, Clone, Default, Serialize, PartialEq, Eq, Hash)]
pub struct ProductId(i32);

impl ProductId {
    pub fn new(id: i32) -> Self {
        ProductId(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;

        Ok(ProductId(id))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct ParseProductIdError;

impl Display for ParseProductIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid product id")
    }
}

impl Error for ParseProductIdError {}

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        i32::from_str(param).map(ProductId).map_err(|_| ParseProductIdError)
    }
}

impl<'a> FromSql<'a> for ProductId {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        i32::from_sql(ty, raw).map(ProductId)
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::INT4
    }
}

impl ToSql for ProductId {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        i32::to_sql(&self.0, ty, out)
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::INT4
    }

    tokio_postgres::types::to_sql_checked!();
}
