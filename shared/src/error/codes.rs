//! Unified error codes for the incident ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Report errors
//! - 5xxx: Inventory errors
//! - 6xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are serialized as plain `u16` so both front-ends can switch on them
/// without sharing the Rust enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 4xxx: Report ====================
    /// Report id not present in the active collection
    ReportNotFound = 4001,
    /// Incident type outside the recognized set
    InvalidIncidentType = 4002,
    /// Status outside the recognized set
    InvalidReportStatus = 4003,
    /// Coordinates outside valid latitude/longitude ranges
    InvalidLocation = 4004,

    // ==================== 5xxx: Inventory ====================
    /// Inventory item not found
    ItemNotFound = 5001,
    /// Allocation exceeds the remaining quantity
    InsufficientQuantity = 5002,

    // ==================== 6xxx: Notification ====================
    /// Notification message is empty
    EmptyNotification = 6001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage layer error
    StorageError = 9002,
    /// Persisted data could not be decoded
    StorageCorrupted = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Report
            ErrorCode::ReportNotFound => "Report not found",
            ErrorCode::InvalidIncidentType => "Unrecognized incident type",
            ErrorCode::InvalidReportStatus => "Unrecognized report status",
            ErrorCode::InvalidLocation => "Location coordinates are out of range",

            // Inventory
            ErrorCode::ItemNotFound => "Inventory item not found",
            ErrorCode::InsufficientQuantity => "Not enough stock for this allocation",

            // Notification
            ErrorCode::EmptyNotification => "Notification message must not be empty",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::StorageCorrupted => "Stored data is corrupted",
        }
    }
}

/// Error returned when converting an unknown `u16` into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Report
            4001 => Ok(ErrorCode::ReportNotFound),
            4002 => Ok(ErrorCode::InvalidIncidentType),
            4003 => Ok(ErrorCode::InvalidReportStatus),
            4004 => Ok(ErrorCode::InvalidLocation),

            // Inventory
            5001 => Ok(ErrorCode::ItemNotFound),
            5002 => Ok(ErrorCode::InsufficientQuantity),

            // Notification
            6001 => Ok(ErrorCode::EmptyNotification),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
