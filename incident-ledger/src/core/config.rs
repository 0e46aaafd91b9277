use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

/// Ledger configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | Working directory (database, logs) |
/// | DB_FILE | ledger.redb | Database file name inside WORK_DIR |
/// | LOG_LEVEL | info | Default tracing filter |
/// | LOG_JSON | false | JSON log lines instead of pretty output |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | POLL_INTERVAL_MS | 3000 | Viewer refresh interval |
/// | BUSINESS_TIMEZONE | Asia/Manila | Timezone for per-day analytics |
/// | ENVIRONMENT | development | development / staging / production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/ledger LOG_JSON=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub db_file: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub poll_interval_ms: u64,
    pub business_timezone: Tz,
    pub environment: String,
}

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Manila;

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            db_file: std::env::var("DB_FILE").unwrap_or_else(|_| "ledger.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(3000),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .ok()
                .and_then(|v| parse_timezone(&v))
                .unwrap_or(DEFAULT_TIMEZONE),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the working directory (tests)
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timezone(name: &str) -> Option<Tz> {
    match name.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::warn!(timezone = %name, "Unknown BUSINESS_TIMEZONE, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_joins_work_dir() {
        let mut config = Config::with_overrides("/tmp/ledger");
        config.db_file = "test.redb".to_string();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/ledger/test.redb"));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Manila"), Some(chrono_tz::Asia::Manila));
        assert_eq!(parse_timezone(" UTC "), Some(chrono_tz::UTC));
        assert_eq!(parse_timezone("Mars/Olympus"), None);
    }
}
