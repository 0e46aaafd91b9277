use super::super::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    #[error("Insufficient quantity for {item_id}: requested {requested}, available {available}")]
    InsufficientQuantity {
        item_id: String,
        requested: u32,
        available: u32,
    },

    #[error("Invalid incident type: {0:?}")]
    InvalidIncidentType(String),

    #[error("Invalid report status: {0:?}")]
    InvalidStatus(String),

    #[error("Location out of range: lat={lat}, lng={lng}")]
    InvalidLocation { lat: f64, lng: f64 },

    #[error("Notification message must not be empty")]
    EmptyNotification,

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Unknown report or inventory id
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::ReportNotFound(_) | LedgerError::ItemNotFound(_))
    }

    /// Caller-supplied value outside the accepted set
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidIncidentType(_)
                | LedgerError::InvalidStatus(_)
                | LedgerError::InvalidLocation { .. }
                | LedgerError::EmptyNotification
                | LedgerError::Validation(_)
        )
    }
}

/// Map a storage error to an error code (front-end handles localization)
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if matches!(e, StorageError::Serialization(_)) {
        return ErrorCode::InternalError;
    }

    // redb errors are classified by message
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::StorageError
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                AppError::with_message(code, message)
            }
            LedgerError::ReportNotFound(id) => {
                AppError::with_message(ErrorCode::ReportNotFound, message).with_detail("reportId", id)
            }
            LedgerError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::ItemNotFound, message).with_detail("itemId", id)
            }
            LedgerError::InsufficientQuantity {
                item_id,
                requested,
                available,
            } => AppError::with_message(ErrorCode::InsufficientQuantity, message)
                .with_detail("itemId", item_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            LedgerError::InvalidIncidentType(value) => {
                AppError::with_message(ErrorCode::InvalidIncidentType, message)
                    .with_detail("value", value)
            }
            LedgerError::InvalidStatus(value) => {
                AppError::with_message(ErrorCode::InvalidReportStatus, message)
                    .with_detail("value", value)
            }
            LedgerError::InvalidLocation { .. } => {
                AppError::with_message(ErrorCode::InvalidLocation, message)
            }
            LedgerError::EmptyNotification => AppError::new(ErrorCode::EmptyNotification),
            LedgerError::Validation(msg) => AppError::validation(msg),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
