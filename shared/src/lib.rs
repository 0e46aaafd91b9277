//! Shared types for the incident ledger
//!
//! Domain models, the unified error type, and small utilities used by the
//! ledger and by both front-ends (resident and dashboard).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
