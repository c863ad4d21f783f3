//! Durable file locators.
//!
//! A [`LocatorCodec`] turns a filesystem path into an opaque [`Bookmark`] and
//! later resolves it back. Hosts with a native bookmark facility plug in their
//! own codec; [`CanonicalPathCodec`] is the portable implementation built on
//! canonical paths plus volume/inode identity.

use crate::locator::error::LocatorError;
use crate::locator::payload::{FileId, Payload};
use crate::types::Bookmark;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum LocatorError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Path does not exist: {}", .0.display())]
        NotFound(PathBuf),

        #[error("Path is not valid UTF-8: {}", .0.display())]
        NonUtf8Path(PathBuf),

        #[error("Encoding error: {0}")]
        Encoding(#[from] postcard::Error),

        #[error("Unsupported bookmark version: {0}")]
        UnsupportedVersion(u8),

        #[error("Empty bookmark")]
        Empty,
    }
}

mod payload;

/// Outcome of resolving a bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical path of the target when reachable, last known path otherwise.
    pub path: PathBuf,
    pub reachable: bool,
    /// The target is still resolvable but the bookmark no longer describes it
    /// exactly; it should be re-encoded from `path`.
    pub stale: bool,
}

pub trait LocatorCodec {
    /// Creates a bookmark for an existing location.
    fn encode(&self, path: &Path) -> Result<Bookmark, LocatorError>;

    /// Resolves a bookmark.
    ///
    /// A target that is gone is not an error: it comes back with
    /// `reachable == false`. Errors are reserved for blobs that cannot be read.
    fn decode(&self, bookmark: &Bookmark) -> Result<Resolution, LocatorError>;
}

/// Upper bound on directory entries inspected when looking for a renamed file.
const MAX_RENAME_SCAN: usize = 4096;

/// Portable codec: canonical path plus volume/inode identity where the
/// platform exposes one.
///
/// A target renamed inside its original directory is found again through its
/// inode and reported as stale.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalPathCodec;

impl LocatorCodec for CanonicalPathCodec {
    fn encode(&self, path: &Path) -> Result<Bookmark, LocatorError> {
        let canonical = fs::canonicalize(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LocatorError::NotFound(path.to_path_buf()),
            _ => LocatorError::Io(e),
        })?;
        let metadata = fs::metadata(&canonical)?;

        let payload = Payload {
            path: canonical
                .to_str()
                .ok_or_else(|| LocatorError::NonUtf8Path(canonical.clone()))?
                .to_string(),
            file_id: file_id(&metadata),
        };

        Ok(Bookmark::from_bytes(payload.to_bytes()?))
    }

    fn decode(&self, bookmark: &Bookmark) -> Result<Resolution, LocatorError> {
        let payload = Payload::from_bytes(bookmark.as_bytes())?;
        let path = PathBuf::from(&payload.path);

        if let Ok(metadata) = fs::metadata(&path) {
            let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            let replaced = payload.file_id.is_some() && file_id(&metadata) != payload.file_id;

            return Ok(Resolution {
                stale: replaced || canonical != path,
                path: canonical,
                reachable: true,
            });
        }

        if let Some(id) = payload.file_id
            && let Some(moved) = find_renamed(&path, id)
        {
            return Ok(Resolution {
                path: moved,
                reachable: true,
                stale: true,
            });
        }

        Ok(Resolution {
            path,
            reachable: false,
            stale: false,
        })
    }
}

/// Looks for a sibling of the missing `path` carrying the same file identity.
fn find_renamed(path: &Path, id: FileId) -> Option<PathBuf> {
    let parent = path.parent()?;
    let entries = fs::read_dir(parent).ok()?;

    entries
        .take(MAX_RENAME_SCAN)
        .filter_map(Result::ok)
        .find(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|metadata| file_id(&metadata))
                == Some(id)
        })
        .map(|entry| fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path()))
}

#[cfg(unix)]
fn file_id(metadata: &fs::Metadata) -> Option<FileId> {
    use std::os::unix::fs::MetadataExt;

    Some(FileId {
        volume: metadata.dev(),
        inode: metadata.ino(),
    })
}

#[cfg(not(unix))]
fn file_id(_metadata: &fs::Metadata) -> Option<FileId> {
    None
}

#[cfg(test)]
mod tests;
