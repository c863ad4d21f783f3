use std::path::PathBuf;

/// Core configuration for opening the shelf's persistent state.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("shelf.redb")
    }
}
