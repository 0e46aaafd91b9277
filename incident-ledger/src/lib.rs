//! Incident Ledger - barangay incident reporting and DRRMC dispatch
//!
//! # Overview
//!
//! Residents file incident reports; the DRRMC dashboard dispatches and
//! resolves them, allocates relief stock and broadcasts notifications. Both
//! views run in one process and share one redb store.
//!
//! - **reports** (`reports`): storage, `ReportLedger` state machine, history,
//!   seeding, CSV export, analytics
//! - **notifications** (`notifications`): dashboard → resident broadcasts
//! - **poller** (`poller`): revision-based change detection for viewers
//! - **frontends** (`frontends`): `ResidentService`, `DashboardService`
//!
//! # Module layout
//!
//! ```text
//! incident-ledger/src/
//! ├── core/           # Config, background tasks
//! ├── utils/          # Logger, validation
//! ├── reports/        # Ledger and everything it persists
//! ├── notifications/  # Notification log
//! ├── poller.rs       # Change watcher
//! └── frontends/      # Resident / dashboard services
//! ```

pub mod core;
pub mod frontends;
pub mod notifications;
pub mod poller;
pub mod reports;
pub mod utils;

pub use core::{BackgroundTasks, Config, TaskKind};
pub use frontends::{DashboardService, ResidentService};
pub use notifications::NotificationLog;
pub use poller::{ChangeWatcher, Changes};
pub use reports::{
    HistoryQuery, LedgerError, LedgerEvent, LedgerResult, LedgerStorage, ReportFilter,
    ReportLedger, ReportRepository, StorageError,
};

pub use utils::logger::init_logger_with_file;

/// Load `.env`, create the working directory and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    if let Err(e) = dotenv::dotenv() {
        // Missing .env is normal outside development
        eprintln!("No .env loaded: {e}");
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  ___            _     _            _
 |_ _|_ __   ___(_) __| | ___ _ __ | |_
  | || '_ \ / __| |/ _` |/ _ \ '_ \| __|
  | || | | | (__| | (_| |  __/ | | | |_
 |___|_| |_|\___|_|\__,_|\___|_| |_|\__|
  _             _
 | |    ___  __| | __ _  ___ _ __
 | |   / _ \/ _` |/ _` |/ _ \ '__|
 | |__|  __/ (_| | (_| |  __/ |
 |_____\___|\__,_|\__, |\___|_|
                  |___/
    "#
    );
}
