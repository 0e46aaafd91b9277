//! Inventory Model

use serde::{Deserialize, Serialize};

/// Relief inventory item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Remaining quantity (unsigned: stock cannot go negative)
    pub qty: u32,
}

impl InventoryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, qty: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            qty,
        }
    }
}
