//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone entity (barangay). Static reference data, never mutated by report
/// operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Resolve a zone id to its display name
pub fn zone_name<'a>(zones: &'a [Zone], id: &str) -> Option<&'a str> {
    zones.iter().find(|z| z.id == id).map(|z| z.name.as_str())
}
