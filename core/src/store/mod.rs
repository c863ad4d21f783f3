//! Ordered, persistent list of file references.
//!
//! Every mutation is written through to a [`ReferenceStorage`], normally the
//! [`SettingsStore`]. A failed write is logged and retried on the next
//! mutation or [`ReferenceStore::flush`]; the in-memory list stays
//! authoritative in the meantime.

use crate::locator::{LocatorCodec, Resolution};
use crate::settings::SettingsStore;
use crate::settings::error::SettingsError;
use crate::store::error::StoreError;
use crate::types::{Bookmark, MaintenanceMetadata, Row};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub mod error {
    use crate::locator::error::LocatorError;
    use crate::settings::error::SettingsError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("Locator error: {0}")]
        Locator(#[from] LocatorError),

        #[error("Settings error: {0}")]
        Settings(#[from] SettingsError),
    }
}

/// A shelf entry: the persisted bookmark plus what it resolved to last.
#[derive(Debug, Clone)]
pub struct StoredReference {
    locator: Bookmark,
    /// `None` when the bookmark could not be read at all.
    path: Option<PathBuf>,
    reachable: bool,
    stale: bool,
}

impl StoredReference {
    pub fn locator(&self) -> &Bookmark {
        &self.locator
    }

    /// Path from the most recent resolution.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reachability as of the most recent resolution.
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

/// Where the reference list and its maintenance record are kept.
pub trait ReferenceStorage {
    fn bookmarks(&self) -> Result<Vec<Bookmark>, SettingsError>;
    fn set_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<(), SettingsError>;
    fn set_maintenance(&mut self, metadata: &MaintenanceMetadata) -> Result<(), SettingsError>;
}

impl ReferenceStorage for SettingsStore {
    fn bookmarks(&self) -> Result<Vec<Bookmark>, SettingsError> {
        SettingsStore::bookmarks(self)
    }

    fn set_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<(), SettingsError> {
        SettingsStore::set_bookmarks(self, bookmarks)
    }

    fn set_maintenance(&mut self, metadata: &MaintenanceMetadata) -> Result<(), SettingsError> {
        SettingsStore::set_maintenance(self, metadata)
    }
}

pub struct ReferenceStore<C, S = SettingsStore> {
    codec: C,
    settings: S,
    entries: Vec<StoredReference>,
    /// Set while the persisted list lags behind `entries`.
    dirty: bool,
}

impl<C: LocatorCodec, S: ReferenceStorage> ReferenceStore<C, S> {
    /// Loads persisted bookmarks and resolves each one.
    ///
    /// Bookmarks that do not resolve keep their slot as unreachable entries
    /// until the next [`validate`](Self::validate). An unreadable list is
    /// logged and replaced by an empty one.
    pub fn open(codec: C, settings: S) -> Self {
        let bookmarks = settings.bookmarks().unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable shelf list");
            Vec::new()
        });

        let entries: Vec<_> = bookmarks
            .into_iter()
            .map(|bookmark| resolve_entry(&codec, bookmark))
            .collect();

        info!(
            count = entries.len(),
            unreachable = entries.iter().filter(|e| !e.reachable).count(),
            "loaded shelf references"
        );

        Self {
            codec,
            settings,
            entries,
            dirty: false,
        }
    }
}

/// Read operations.
impl<C: LocatorCodec, S> ReferenceStore<C, S> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StoredReference> {
        self.entries.get(index)
    }

    /// Last resolved path of the entry at `index`.
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.entries.get(index)?.path.as_deref()
    }

    /// Resolves the entry at `index` now.
    pub fn resolve(&self, index: usize) -> Option<Resolution> {
        let entry = self.entries.get(index)?;
        self.codec.decode(&entry.locator).ok()
    }

    /// Rows for rendering, with reachability computed now.
    pub fn snapshot(&self) -> Vec<Row> {
        self.entries.iter().map(|entry| self.row_for(entry)).collect()
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        self.entries.get(index).map(|entry| self.row_for(entry))
    }

    fn row_for(&self, entry: &StoredReference) -> Row {
        let (path, reachable) = match self.codec.decode(&entry.locator) {
            Ok(resolution) => (Some(resolution.path), resolution.reachable),
            Err(_) => (entry.path.clone(), false),
        };
        Row {
            display_name: display_name(path.as_deref()),
            display_path: path,
            reachable,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Mutations.
impl<C: LocatorCodec, S: ReferenceStorage> ReferenceStore<C, S> {
    /// Appends a reference to `path` unless one to the same canonical target
    /// is already stored.
    ///
    /// Returns `Ok(false)` for duplicates.
    pub fn add(&mut self, path: &Path) -> Result<bool, StoreError> {
        let bookmark = self.codec.encode(path)?;
        let resolution = self.codec.decode(&bookmark)?;

        self.refresh_resolutions();
        if self
            .entries
            .iter()
            .any(|entry| entry.path.as_deref() == Some(resolution.path.as_path()))
        {
            debug!(path = %resolution.path.display(), "reference already on shelf");
            return Ok(false);
        }

        debug!(path = %resolution.path.display(), "adding reference");
        self.entries.push(StoredReference {
            locator: bookmark,
            path: Some(resolution.path),
            reachable: resolution.reachable,
            stale: resolution.stale,
        });
        self.persist();
        Ok(true)
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "ignoring removal of missing row");
            return false;
        }

        self.entries.remove(index);
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Re-resolves every entry and drops the unreachable ones.
    ///
    /// Returns the number of entries removed. The list is persisted only when
    /// something was removed or an earlier write is still outstanding.
    pub fn validate(&mut self, now: SystemTime) -> usize {
        let before = self.entries.len();
        let codec = &self.codec;

        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|entry| resolve_entry(codec, entry.locator))
            .filter(|entry| entry.reachable)
            .collect();

        let pruned = before - self.entries.len();
        if pruned > 0 {
            info!(pruned, remaining = self.entries.len(), "pruned unreachable references");
        }
        if pruned > 0 || self.dirty {
            self.persist();
        }

        let metadata = MaintenanceMetadata {
            last_validated_at: Some(now),
            last_pruned_count: Some(pruned),
        };
        if let Err(e) = self.settings.set_maintenance(&metadata) {
            warn!(error = %e, "failed to record validation time");
        }

        pruned
    }

    /// Writes the current list, surfacing any failure.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.try_persist()
    }

    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            warn!(error = %e, "failed to persist shelf references; keeping in-memory list");
        }
    }

    fn try_persist(&mut self) -> Result<(), StoreError> {
        self.refresh_stale();

        let bookmarks: Vec<Bookmark> = self.entries.iter().map(|e| e.locator.clone()).collect();
        match self.settings.set_bookmarks(&bookmarks) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e.into())
            }
        }
    }

    /// Re-encodes stale entries from their resolved paths.
    fn refresh_stale(&mut self) {
        let codec = &self.codec;

        for entry in self.entries.iter_mut().filter(|e| e.stale) {
            let Some(path) = entry.path.as_deref() else {
                continue;
            };
            match codec.encode(path) {
                Ok(bookmark) => {
                    debug!(path = %path.display(), "refreshed stale bookmark");
                    entry.locator = bookmark;
                    entry.stale = false;
                }
                Err(e) => debug!(path = %path.display(), error = %e, "could not refresh bookmark"),
            }
        }
    }

    /// Updates cached resolutions without pruning.
    fn refresh_resolutions(&mut self) {
        let codec = &self.codec;

        for entry in &mut self.entries {
            if let Ok(resolution) = codec.decode(&entry.locator) {
                entry.path = Some(resolution.path);
                entry.reachable = resolution.reachable;
                entry.stale |= resolution.stale;
            }
        }
    }
}

fn resolve_entry<C: LocatorCodec>(codec: &C, locator: Bookmark) -> StoredReference {
    match codec.decode(&locator) {
        Ok(resolution) => StoredReference {
            locator,
            path: Some(resolution.path),
            reachable: resolution.reachable,
            stale: resolution.stale,
        },
        Err(e) => {
            debug!(error = %e, "unreadable bookmark");
            StoredReference {
                locator,
                path: None,
                reachable: false,
                stale: false,
            }
        }
    }
}

fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => "Unknown item".to_string(),
    }
}
