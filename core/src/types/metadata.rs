//! Metadata types for persistent application state.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Maintenance metadata. Missing fields default to None.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceMetadata {
    #[serde(default)]
    pub last_validated_at: Option<SystemTime>,
    #[serde(default)]
    pub last_pruned_count: Option<usize>,
}
