//! Local storage for generated report files.
//!
//! Reports are written to a uniquely named temp file first and renamed into
//! place once their metadata row exists. Deletion moves the file aside to a
//! trash name so it can be put back if the row cannot be removed.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

const TEMP_PREFIX: &str = ".tmp_";
const TRASH_PREFIX: &str = ".trash_";

/// File written under a temporary name, not yet visible as a report.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl StagedFile {
    /// Path the file will have once committed.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }
}

/// Report file moved aside during deletion.
#[derive(Debug)]
pub struct TrashedFile {
    trash_path: PathBuf,
    original_path: PathBuf,
}

/// Reports directory wrapper.
#[derive(Debug, Clone)]
pub struct ReportStorage {
    root: PathBuf,
}

impl ReportStorage {
    /// Open the reports directory, creating it if necessary.
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create reports directory {}: {}",
                root.display(),
                e
            ))
        })?;
        info!("Report storage initialized: {}", root.display());
        Ok(Self { root })
    }

    /// Absolute location of a report file name.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write `contents` to a fresh temp file destined for `file_name`.
    pub async fn stage(&self, file_name: &str, contents: &[u8]) -> AppResult<StagedFile> {
        let temp_path = self
            .root
            .join(format!("{}{}_{}", TEMP_PREFIX, Uuid::new_v4(), file_name));

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create temp file: {}", e)))?;
        let written = async {
            file.write_all(contents).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            remove_quietly(&temp_path).await;
            return Err(AppError::Storage(format!(
                "Failed to write temp file: {}",
                e
            )));
        }

        Ok(StagedFile {
            temp_path,
            final_path: self.path_for(file_name),
        })
    }

    /// Rename a staged file into place, replacing any previous version.
    pub async fn commit(&self, staged: StagedFile) -> AppResult<PathBuf> {
        if let Err(e) = tokio::fs::rename(&staged.temp_path, &staged.final_path).await {
            remove_quietly(&staged.temp_path).await;
            return Err(AppError::Storage(format!("Failed to move report file: {}", e)));
        }
        Ok(staged.final_path)
    }

    /// Drop a staged file that will not be committed.
    pub async fn discard(&self, staged: StagedFile) {
        remove_quietly(&staged.temp_path).await;
    }

    /// Move a report file aside. `Ok(None)` when there is no file to move.
    pub async fn stash(&self, path: &Path) -> AppResult<Option<TrashedFile>> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let trash_path = self
            .root
            .join(format!("{}{}_{}", TRASH_PREFIX, Uuid::new_v4(), file_name));

        match tokio::fs::rename(path, &trash_path).await {
            Ok(()) => Ok(Some(TrashedFile {
                trash_path,
                original_path: path.to_path_buf(),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to move report file aside: {}",
                e
            ))),
        }
    }

    /// Put a stashed file back under its original name.
    pub async fn restore(&self, trashed: TrashedFile) {
        if let Err(e) = tokio::fs::rename(&trashed.trash_path, &trashed.original_path).await {
            warn!(
                "Failed to restore {} from {}: {}",
                trashed.original_path.display(),
                trashed.trash_path.display(),
                e
            );
        }
    }

    /// Permanently remove a stashed file. Failures are logged, not returned.
    pub async fn purge(&self, trashed: TrashedFile) {
        remove_quietly(&trashed.trash_path).await;
    }
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}
