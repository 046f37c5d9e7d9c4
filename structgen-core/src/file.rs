use std::path::{Path, PathBuf};

use eyre::Result;

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held exactly this content and was left untouched
    Unchanged,
}

/// A generated source file
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, creating parent directories.
    ///
    /// Identical content is not rewritten, so the modification time of a
    /// reproducible output only changes when the output does.
    pub fn write(&self) -> Result<WriteResult> {
        if self.exists() && std::fs::read(&self.path)? == self.content {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}
