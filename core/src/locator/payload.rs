use crate::locator::error::LocatorError;
use serde::{Deserialize, Serialize};

const VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileId {
    pub volume: u64,
    pub inode: u64,
}

/// Contents of a [`CanonicalPathCodec`](super::CanonicalPathCodec) bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub path: String,
    pub file_id: Option<FileId>,
}

impl Payload {
    pub fn to_bytes(&self) -> Result<Vec<u8>, LocatorError> {
        Ok(postcard::to_extend(self, vec![VERSION])?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LocatorError> {
        let (version, data) = bytes.split_first().ok_or(LocatorError::Empty)?;
        match *version {
            VERSION => Ok(postcard::from_bytes(data)?),
            version => Err(LocatorError::UnsupportedVersion(version)),
        }
    }
}
