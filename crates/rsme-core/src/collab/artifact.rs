//! Persist the generated HTML to a uniquely named file that outlives the process.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait ArtifactStore {
    /// Writes `html` to a fresh file and returns its path.
    fn persist(&self, html: &str) -> io::Result<PathBuf>;
}

/// Writes `rsme-XXXXXX.html` into a directory (the system temp dir by default).
/// The file is kept on disk: the browser reads it after we exit.
#[derive(Debug, Clone, Default)]
pub struct TempArtifactStore {
    dir: Option<PathBuf>,
}

impl TempArtifactStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

impl ArtifactStore for TempArtifactStore {
    fn persist(&self, html: &str) -> io::Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("rsme-").suffix(".html");
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(html.as_bytes())?;
        file.flush()?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        tracing::debug!(path = %path.display(), "artifact kept on disk");
        Ok(path)
    }
}
