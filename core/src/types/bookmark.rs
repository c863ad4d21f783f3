use serde::{Deserialize, Serialize};

/// Opaque, durable handle to a filesystem location.
///
/// The bytes are produced and interpreted only by a [`LocatorCodec`]; the
/// store persists them verbatim and never compares them for identity.
///
/// [`LocatorCodec`]: crate::locator::LocatorCodec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark(Vec<u8>);

impl Bookmark {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
