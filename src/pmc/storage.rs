//! Persistence of downloaded PDFs.
//!
//! Writes go through a named temp file in the target directory followed by
//! an atomic persist, so a reader never observes a partially written PDF
//! and concurrent saves of the same identifier are last-writer-wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::task;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{PubMedError, Result};

/// Writes downloaded PDF bytes under a configured directory
#[derive(Debug, Clone)]
pub struct PdfStorage {
    download_dir: PathBuf,
}

impl PdfStorage {
    /// Create a storage rooted at the given directory
    pub fn new<P: Into<PathBuf>>(download_dir: P) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    /// Create a storage from a [`Config`]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.download_dir.clone())
    }

    /// The directory downloads are written to
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Write PDF bytes to `<download_dir>/<pmc_id>.pdf`, creating the
    /// directory tree if absent. Any existing file at that path is
    /// overwritten. Returns the absolute path written.
    #[instrument(skip(self, bytes), fields(pmc_id = %pmc_id, size = bytes.len()))]
    pub async fn save_pdf(&self, pmc_id: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        let dir = self.download_dir.clone();
        let filename = format!("{}.pdf", pmc_id);

        let path = task::spawn_blocking(move || write_atomic(&dir, &filename, &bytes))
            .await
            .map_err(|e| PubMedError::IoError {
                message: format!("Write task failed: {}", e),
            })??;

        debug!(path = %path.display(), "Saved PDF");
        Ok(path)
    }
}

fn write_atomic(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| PubMedError::IoError {
        message: format!("Failed to create download directory: {}", e),
    })?;

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| PubMedError::IoError {
        message: format!("Failed to create temporary file: {}", e),
    })?;
    temp_file.write_all(bytes).map_err(|e| PubMedError::IoError {
        message: format!("Failed to write PDF: {}", e),
    })?;
    temp_file.flush().map_err(|e| PubMedError::IoError {
        message: format!("Failed to flush PDF: {}", e),
    })?;

    let target = dir.join(filename);
    temp_file.persist(&target).map_err(|e| PubMedError::IoError {
        message: format!("Failed to persist PDF: {}", e),
    })?;

    std::path::absolute(&target).map_err(|e| PubMedError::IoError {
        message: format!("Failed to resolve absolute path: {}", e),
    })
}
