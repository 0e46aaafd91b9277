//! Notification Model

use serde::{Deserialize, Serialize};

/// Delivery channels selected by the dashboard operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Channels {
    pub sms: bool,
    pub push: bool,
}

/// Broadcast notification sent from the dashboard to residents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    /// Target zone id; `None` means all zones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default)]
    pub channels: Channels,
    /// Unix millis
    pub sent_time: i64,
}
