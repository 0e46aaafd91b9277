//! Data models
//!
//! Shared between the ledger and both front-ends. Everything here is plain
//! serde data; persistence lives in `incident-ledger`.

pub mod history;
pub mod inventory;
pub mod notification;
pub mod report;
pub mod zone;

// Re-exports
pub use history::*;
pub use inventory::*;
pub use notification::*;
pub use report::*;
pub use zone::*;
