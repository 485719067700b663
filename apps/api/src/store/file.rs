use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::store::PortfolioStore;

/// File-backed slot: `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the slot, so a crash mid-write leaves the previous record intact.
pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(format!("{key}.json"));
        FileStore { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PortfolioStore for FileStore {
    async fn read_raw(&self) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_raw(&self, raw: &str) -> Result<(), AppError> {
        let dir = self.dir.clone();
        let path = self.path.clone();
        let raw = raw.to_string();

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(raw.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Storage(format!("store write task failed: {e}")))??;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path().display())
    }
}
