use serde::{Deserialize, Serialize};

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i32,
    pub in_stock: bool,
}

/// Payload for creating a product or overwriting an existing one.
///
/// Any `id` sent by the client is ignored; identity is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub price: i32,
    #[serde(default)]
    pub in_stock: bool,
}

impl ProductPayload {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, price: i32, in_stock: bool) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            price,
            in_stock,
        }
    }

    /// Checks the required text fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The name field is required.".to_string());
        }
        if self.kind.trim().is_empty() {
            return Err("The type field is required.".to_string());
        }
        Ok(())
    }
}
