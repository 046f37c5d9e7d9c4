use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result, TemplatesConfig};

/// Represents a structgen.toml file with both its location and parsed manifest.
pub struct ManifestFile {
    path: PathBuf,
    manifest: Manifest,
}

impl ManifestFile {
    /// Open and parse a structgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Template paths resolved against the directory holding the manifest.
    pub fn templates(&self) -> Option<TemplatesConfig> {
        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        self.manifest.templates.as_ref().map(|t| t.resolve(base))
    }
}
