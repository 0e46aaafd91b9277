//! Change polling for viewers
//!
//! The resident and dashboard views run in one process over cloned
//! [`LedgerStorage`](crate::reports::LedgerStorage) handles. Ledger writes are
//! broadcast per ledger, but notifications and writes made through a separately
//! built ledger on the same storage are only observable by polling. A [`ChangeWatcher`] remembers the
//! last revision and latest notification id it saw; [`run_poller`] ticks it on
//! an interval.

use crate::notifications::NotificationLog;
use crate::reports::ledger::LedgerResult;
use crate::reports::traits::ReportRepository;
use shared::models::Notification;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Default viewer refresh interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

const CHANGES_CHANNEL_CAPACITY: usize = 64;

/// What moved since the previous tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes {
    pub revision: u64,
    /// Store revision differs from the last one seen
    pub ledger_changed: bool,
    /// Latest notification, when its id differs from the last one seen
    pub new_notification: Option<Notification>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        !self.ledger_changed && self.new_notification.is_none()
    }
}

pub struct ChangeWatcher<R: ReportRepository> {
    repo: R,
    notifications: NotificationLog,
    last_revision: Option<u64>,
    last_notification_id: Option<String>,
}

impl<R: ReportRepository> ChangeWatcher<R> {
    /// The first tick reports the current state as changed, including the
    /// latest existing notification.
    pub fn new(repo: R, notifications: NotificationLog) -> Self {
        Self {
            repo,
            notifications,
            last_revision: None,
            last_notification_id: None,
        }
    }

    pub fn tick(&mut self) -> LedgerResult<Changes> {
        let revision = self.repo.revision()?;
        let ledger_changed = self.last_revision != Some(revision);
        self.last_revision = Some(revision);

        // Notifications only move when the revision does
        let new_notification = if ledger_changed {
            match self.notifications.latest()? {
                Some(latest) if self.last_notification_id.as_deref() != Some(latest.id.as_str()) => {
                    self.last_notification_id = Some(latest.id.clone());
                    Some(latest)
                }
                Some(_) => None,
                None => {
                    self.last_notification_id = None;
                    None
                }
            }
        } else {
            None
        };

        Ok(Changes {
            revision,
            ledger_changed,
            new_notification,
        })
    }
}

/// Tick `watcher` every `interval`, forwarding non-empty changes until the
/// token is cancelled or the receiver is dropped. Store errors are logged and
/// polling continues.
pub async fn run_poller<R: ReportRepository>(
    mut watcher: ChangeWatcher<R>,
    interval: Duration,
    tx: mpsc::Sender<Changes>,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("Change poller cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let changes = match watcher.tick() {
            Ok(changes) => changes,
            Err(e) => {
                tracing::warn!(error = %e, "Change poll failed, retrying next tick");
                continue;
            }
        };
        if changes.is_empty() {
            continue;
        }

        tracing::trace!(revision = changes.revision, "Store changed");
        if tx.send(changes).await.is_err() {
            tracing::debug!("Change receiver dropped, stopping poller");
            return;
        }
    }
}

/// Spawn [`run_poller`] on the runtime and return its change stream
pub fn spawn_poller<R: ReportRepository>(
    watcher: ChangeWatcher<R>,
    interval: Duration,
    shutdown: CancellationToken,
) -> (tokio::task::JoinHandle<()>, mpsc::Receiver<Changes>) {
    let (tx, rx) = mpsc::channel(CHANGES_CHANNEL_CAPACITY);
    let handle = tokio::spawn(run_poller(watcher, interval, tx, shutdown));
    (handle, rx)
}
