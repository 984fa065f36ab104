use std::ffi::OsString;
use std::path::{Path, PathBuf};

use reversi::Storage;

/// Keeps the saved game in a single text file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Storage for FileStorage {
    /// Writes to a sibling file first and renames it over the target, so that a
    /// crash never leaves a half-written save behind.
    fn save(&mut self, encoded: &str) -> std::io::Result<()> {
        let temporary = self.temporary_path();
        std::fs::write(&temporary, encoded)?;
        std::fs::rename(&temporary, &self.path)
    }

    fn load(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}
