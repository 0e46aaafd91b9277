//! redb-based storage layer for the report ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection name | JSON array | Whole-collection records |
//! | `meta` | meta key | `u64` | Revision counter, seed schema versions |
//!
//! Every ledger operation reads whole collections, mutates them in memory and
//! writes them back inside a single write transaction, so a reader never sees
//! a half-applied transition.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns the data
//! is on disk and the file is always in a consistent state.
//!
//! # Ownership
//!
//! redb locks the file exclusively, so one process owns the store. Every view
//! inside that process shares the same [`Database`] through cloned
//! [`LedgerStorage`] handles; a second `open` of the same path fails with
//! [`StorageError::AlreadyOpen`] until the first database is dropped.

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition,
    WriteTransaction,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for whole collections: key = collection name, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Table for counters and versions: key = meta key, value = u64
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const REVISION_KEY: &str = "revision";

/// Logical collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Active (unresolved) reports
    Reports,
    /// Dispatched / resolved report snapshots
    History,
    /// Barangay reference data
    Zones,
    /// Relief inventory
    Inventory,
    /// Dashboard → resident broadcasts
    Notifications,
}

impl Collection {
    pub const fn key(&self) -> &'static str {
        match self {
            Collection::Reports => "reports",
            Collection::History => "history",
            Collection::Zones => "zones",
            Collection::Inventory => "inventory",
            Collection::Notifications => "notifications",
        }
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database file is already open; share the existing handle instead")]
    AlreadyOpen,

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Ledger storage backed by redb
///
/// Cloning shares the underlying database, so several ledger handles (the
/// resident and dashboard views) observe the same collections.
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for LedgerStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStorage").finish_non_exhaustive()
    }
}

impl LedgerStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path).map_err(|e| match e {
            redb::DatabaseError::DatabaseAlreadyOpen => StorageError::AlreadyOpen,
            other => StorageError::Database(other),
        })?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and throwaway sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let mut meta = write_txn.open_table(META_TABLE)?;
            if meta.get(REVISION_KEY)?.is_none() {
                meta.insert(REVISION_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Begin a read transaction
    pub fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    // ========== Collection Operations ==========

    /// Read a whole collection (own read transaction)
    pub fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> StorageResult<Vec<T>> {
        let read_txn = self.begin_read()?;
        self.read_collection_in(&read_txn, collection)
    }

    /// Read a whole collection inside an existing read transaction
    pub fn read_collection_in<T: DeserializeOwned>(
        &self,
        txn: &ReadTransaction,
        collection: Collection,
    ) -> StorageResult<Vec<T>> {
        let table = txn.open_table(COLLECTIONS_TABLE)?;
        let records = match table.get(collection.key())? {
            Some(value) => decode_collection(collection, value.value()),
            None => Vec::new(),
        };
        Ok(records)
    }

    /// Read a whole collection inside a write transaction
    pub fn read_collection_txn<T: DeserializeOwned>(
        &self,
        txn: &WriteTransaction,
        collection: Collection,
    ) -> StorageResult<Vec<T>> {
        let table = txn.open_table(COLLECTIONS_TABLE)?;
        let records = match table.get(collection.key())? {
            Some(value) => decode_collection(collection, value.value()),
            None => Vec::new(),
        };
        Ok(records)
    }

    /// Replace a whole collection (within transaction)
    pub fn write_collection_txn<T: Serialize>(
        &self,
        txn: &WriteTransaction,
        collection: Collection,
        records: &[T],
    ) -> StorageResult<()> {
        let value = serde_json::to_vec(records)?;
        let mut table = txn.open_table(COLLECTIONS_TABLE)?;
        table.insert(collection.key(), value.as_slice())?;
        Ok(())
    }

    /// Write raw bytes under a collection key, bypassing serialization
    #[cfg(test)]
    pub(crate) fn write_raw(&self, collection: Collection, bytes: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(collection.key(), bytes)?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Meta Operations ==========

    /// Get a meta value (read-only)
    pub fn get_meta(&self, key: &str) -> StorageResult<Option<u64>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(META_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value()))
    }

    /// Get a meta value (within transaction)
    pub fn get_meta_txn(&self, txn: &WriteTransaction, key: &str) -> StorageResult<Option<u64>> {
        let table = txn.open_table(META_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value()))
    }

    /// Set a meta value (within transaction)
    pub fn set_meta_txn(&self, txn: &WriteTransaction, key: &str, value: u64) -> StorageResult<()> {
        let mut table = txn.open_table(META_TABLE)?;
        table.insert(key, value)?;
        Ok(())
    }

    // ========== Revision ==========

    /// Current revision (read-only). Bumped once per committed write.
    pub fn revision(&self) -> StorageResult<u64> {
        Ok(self.get_meta(REVISION_KEY)?.unwrap_or(0))
    }

    /// Increment and return the revision (within transaction)
    pub fn bump_revision(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let next = self.get_meta_txn(txn, REVISION_KEY)?.unwrap_or(0) + 1;
        self.set_meta_txn(txn, REVISION_KEY, next)?;
        Ok(next)
    }
}

/// Decode a persisted collection; corrupt data degrades to an empty collection.
fn decode_collection<T: DeserializeOwned>(collection: Collection, bytes: &[u8]) -> Vec<T> {
    match serde_json::from_slice(bytes) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(
                collection = collection.key(),
                error = %e,
                "Corrupt collection in store, recovering as empty"
            );
            Vec::new()
        }
    }
}
