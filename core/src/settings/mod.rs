//! Process-wide key/value settings store.
//!
//! One redb database holds a single `settings` table mapping a string key to
//! raw bytes. The reference store keeps its bookmark list under
//! [`STORED_ITEMS_KEY`]; maintenance bookkeeping lives under a JSON entry.

use crate::settings::error::SettingsError;
use crate::types::{Bookmark, MaintenanceMetadata};
use redb::{ReadableDatabase, TableDefinition};
use std::path::Path;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum SettingsError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Metadata error: {0}")]
        Metadata(#[from] serde_json::Error),

        #[error("Encoding error: {0}")]
        Encoding(#[from] postcard::Error),

        #[error("Unsupported format version: {0}")]
        UnsupportedVersion(u8),

        #[error("Empty value")]
        Empty,
    }
}

/// Settings table: &str → raw bytes
const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

/// Key under which the ordered bookmark list is persisted.
pub const STORED_ITEMS_KEY: &str = "StoredItems";

/// Key for maintenance tracking (JSON).
const MAINTENANCE_KEY: &str = "maintenance";

/// Leading byte of the persisted bookmark list.
const BOOKMARK_LIST_VERSION: u8 = 1;

pub struct SettingsStore {
    db: redb::Database,
}

impl SettingsStore {
    /// Creates or opens the settings database at `path`.
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = redb::Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Raw access.
impl SettingsStore {
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    pub fn set(&mut self, key: &str, value: &[u8]) -> Result<(), SettingsError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Returns `true` if the key was present.
    pub fn remove(&mut self, key: &str) -> Result<bool, SettingsError> {
        let write_txn = self.db.begin_write()?;
        let existed;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            existed = table.remove(key)?.is_some();
        }
        write_txn.commit()?;
        Ok(existed)
    }
}

/// Bookmark list.
impl SettingsStore {
    /// Returns the persisted bookmarks in list order. An absent key is an empty list.
    pub fn bookmarks(&self) -> Result<Vec<Bookmark>, SettingsError> {
        match self.get(STORED_ITEMS_KEY)? {
            None => Ok(Vec::new()),
            Some(bytes) => decode_bookmarks(&bytes),
        }
    }

    /// Replaces the persisted bookmark list, preserving slice order.
    pub fn set_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<(), SettingsError> {
        let bytes = encode_bookmarks(bookmarks)?;
        self.set(STORED_ITEMS_KEY, &bytes)
    }
}

fn encode_bookmarks(bookmarks: &[Bookmark]) -> Result<Vec<u8>, SettingsError> {
    Ok(postcard::to_extend(&bookmarks, vec![BOOKMARK_LIST_VERSION])?)
}

fn decode_bookmarks(bytes: &[u8]) -> Result<Vec<Bookmark>, SettingsError> {
    let (version, data) = bytes.split_first().ok_or(SettingsError::Empty)?;
    match *version {
        BOOKMARK_LIST_VERSION => Ok(postcard::from_bytes(data)?),
        version => Err(SettingsError::UnsupportedVersion(version)),
    }
}

/// Maintenance metadata.
impl SettingsStore {
    /// Returns stored maintenance metadata, or the default when none was written yet.
    pub fn maintenance(&self) -> Result<MaintenanceMetadata, SettingsError> {
        match self.get(MAINTENANCE_KEY)? {
            None => Ok(MaintenanceMetadata::default()),
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    pub fn set_maintenance(&mut self, metadata: &MaintenanceMetadata) -> Result<(), SettingsError> {
        let json = serde_json::to_vec(metadata)?;
        self.set(MAINTENANCE_KEY, &json)
    }
}

#[cfg(test)]
mod tests;
