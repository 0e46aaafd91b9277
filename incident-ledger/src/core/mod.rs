//! Core module - configuration and background tasks
//!
//! - [`Config`] - environment-driven configuration
//! - [`BackgroundTasks`] - task registry with graceful shutdown

pub mod config;
pub mod tasks;

pub use config::Config;
pub use tasks::{BackgroundTasks, TaskKind};
