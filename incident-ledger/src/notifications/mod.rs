//! Dashboard → resident broadcast log
//!
//! Shares the ledger's store (`notifications` collection) and revision
//! counter, but never reads or writes reports or history.

use crate::reports::ledger::{LedgerError, LedgerResult};
use crate::reports::storage::{Collection, LedgerStorage, StorageError};
use crate::utils::validation::{MAX_NOTE_LEN, non_blank, validate_optional_text};
use shared::models::{Channels, Notification};
use shared::util::{now_millis, prefixed_id};

/// Append-only notification log (until cleared)
#[derive(Debug, Clone)]
pub struct NotificationLog {
    storage: LedgerStorage,
}

impl NotificationLog {
    pub fn new(storage: LedgerStorage) -> Self {
        Self { storage }
    }

    /// Append a notification. Blank messages are rejected; a blank zone
    /// targets all zones.
    pub fn send(
        &self,
        message: &str,
        zone: Option<&str>,
        channels: Channels,
    ) -> LedgerResult<Notification> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LedgerError::EmptyNotification);
        }
        validate_optional_text(&Some(message.to_string()), "message", MAX_NOTE_LEN)?;

        let notification = Notification {
            id: prefixed_id("N"),
            message: message.to_string(),
            zone: non_blank(zone.map(str::to_string)),
            channels,
            sent_time: now_millis(),
        };

        let txn = self.storage.begin_write()?;
        let mut list: Vec<Notification> =
            self.storage.read_collection_txn(&txn, Collection::Notifications)?;
        list.push(notification.clone());
        self.storage
            .write_collection_txn(&txn, Collection::Notifications, &list)?;
        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            notification_id = %notification.id,
            zone = ?notification.zone,
            sms = channels.sms,
            push = channels.push,
            "Notification sent"
        );
        Ok(notification)
    }

    /// All notifications, newest `sent_time` first
    pub fn list(&self) -> LedgerResult<Vec<Notification>> {
        let list: Vec<Notification> = self.storage.read_collection(Collection::Notifications)?;
        let mut sorted: Vec<Notification> = list.into_iter().rev().collect();
        sorted.sort_by(|a, b| b.sent_time.cmp(&a.sent_time));
        Ok(sorted)
    }

    /// Most recently appended notification
    pub fn latest(&self) -> LedgerResult<Option<Notification>> {
        let mut list: Vec<Notification> = self.storage.read_collection(Collection::Notifications)?;
        Ok(list.pop())
    }

    pub fn clear(&self) -> LedgerResult<()> {
        let txn = self.storage.begin_write()?;
        self.storage
            .write_collection_txn::<Notification>(&txn, Collection::Notifications, &[])?;
        self.storage.bump_revision(&txn)?;
        txn.commit().map_err(StorageError::from)?;
        tracing::info!("Notifications cleared");
        Ok(())
    }
}
