//! Bulk upload of a local directory into the document store.
//!
//! One request per file, sequentially. A failed file is recorded and the walk
//! continues; only an invalid directory aborts the whole operation.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::contract::DocumentApi;
use crate::error::{DocsError, DocsResult};

#[derive(Debug)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: DocsError,
}

#[derive(Debug)]
pub struct UploadReport {
    pub directory: PathBuf,
    pub total: usize,
    pub uploaded: Vec<String>,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.uploaded.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Uploads every regular file under `directory`, recursing into subdirectories.
pub async fn upload_directory<A>(api: &A, directory: &Path) -> DocsResult<UploadReport>
where
    A: DocumentApi + ?Sized,
{
    if !directory.is_dir() {
        error!(path = %directory.display(), "Upload path is not a valid directory");
        return Err(DocsError::InvalidDirectory {
            path: directory.to_path_buf(),
        });
    }

    info!(path = %directory.display(), "Uploading directory");
    let mut report = UploadReport {
        directory: directory.to_path_buf(),
        total: 0,
        uploaded: Vec::new(),
        failures: Vec::new(),
    };

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        // Links to files are uploaded; links to directories are not descended into.
        let is_file = if entry.path_is_symlink() {
            entry.path().is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        report.total += 1;

        match upload_file(api, path, &file_name).await {
            Ok(()) => {
                info!(file = %file_name, "Uploaded file");
                report.uploaded.push(file_name);
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "Failed to upload file");
                report.failures.push(UploadFailure { file_name, error: e });
            }
        }
    }

    info!(
        uploaded = report.succeeded(),
        total = report.total,
        path = %directory.display(),
        "Finished uploading directory"
    );
    Ok(report)
}

async fn upload_file<A>(api: &A, path: &Path, file_name: &str) -> DocsResult<()>
where
    A: DocumentApi + ?Sized,
{
    let content = std::fs::read(path).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(file = file_name, size = content.len(), "Read file for upload");
    api.upload_document(file_name, content).await
}
