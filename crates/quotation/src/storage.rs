//! Output directory and atomic file persistence

use crate::model::validate_quote_number;
use crate::{QuoteError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes rendered quotations into one directory
///
/// Files are named `quotation-<quoteNumber>.pdf`. A write lands in a
/// temporary file next to the target and is renamed over it, so readers
/// never observe a partial document.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory and its parents if needed
    ///
    /// A concurrent creator winning the race is not an error.
    pub async fn ensure_dir(&self) -> Result<()> {
        match tokio::fs::create_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.dir.is_dir() => {}
            Err(e) => return Err(e.into()),
        }
        debug!(dir = %self.dir.display(), "Output directory ready");
        Ok(())
    }

    /// Output path for a quote number
    pub fn path_for(&self, quote_number: &str) -> Result<PathBuf> {
        validate_quote_number(quote_number)?;
        Ok(self.dir.join(format!("quotation-{quote_number}.pdf")))
    }

    /// Atomically write `bytes` for `quote_number`, replacing any previous file
    ///
    /// # Returns
    /// The absolute path of the written file
    pub async fn persist(&self, quote_number: &str, bytes: Vec<u8>) -> Result<PathBuf> {
        let path = self.path_for(quote_number)?;

        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &bytes))
            .await
            .map_err(|e| QuoteError::Io(io::Error::new(io::ErrorKind::Other, e)))??;

        Ok(tokio::fs::canonicalize(&path).await?)
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(".quotation-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}
