use std::io;
use std::path::Path;

/// Hands a location to the platform's default handler.
pub trait Opener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens through the desktop environment (`open`, `xdg-open`, `start`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}
