//! Reading and writing note files.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use vaultweave_core::{Error, Result};

/// Storage for note text
pub trait NoteStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Filesystem store; writes go to a temp file in the same directory which
/// is then renamed over the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl NoteStore for FsStore {
    fn read(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        std::fs::read_to_string(path).map_err(Error::io)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::invalid_path(format!("{} has no parent", path.display())))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(Error::io)?;
        temp.write_all(content.as_bytes()).map_err(Error::io)?;
        temp.flush().map_err(Error::io)?;
        temp.persist(path).map_err(|e| Error::io(e.error))?;

        log::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}
