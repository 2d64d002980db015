use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("config directory missing or not writable: {0}")]
    ConfigDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Create `dir` if missing; fail when something other than a directory sits there.
pub fn ensure_config_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::ConfigDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::ConfigDir(e.to_string()))
        }
        Err(err) => Err(PersistError::ConfigDir(err.to_string())),
    }
}

/// One file replaced wholesale on every write: content goes to a temp file
/// beside the target and is renamed over it, so readers in other processes
/// never see a half-written file.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
    target: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: impl Into<PathBuf>, filename: &str) -> Self {
        let dir = dir.into();
        let target = dir.join(filename);
        Self { dir, target }
    }

    pub fn path(&self) -> &Path {
        &self.target
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, content: &str) -> Result<(), PersistError> {
        ensure_config_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.target).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }

    /// Delete the file; an already missing file counts as removed.
    pub fn remove(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.target) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_and_remove_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let writer = AtomicFileWriter::new(temp.path().join("nested"), "state.ron");

        writer.write("first").unwrap();
        writer.write("second").unwrap();
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "second");

        writer.remove().unwrap();
        writer.remove().unwrap();
        assert!(!writer.path().exists());
    }
}
