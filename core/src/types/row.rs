use std::path::PathBuf;

/// One rendered line of the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Last path component, or the whole path when it has none.
    pub display_name: String,
    pub display_path: Option<PathBuf>,
    pub reachable: bool,
}
