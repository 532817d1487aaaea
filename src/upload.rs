//! Batch upload orchestration.
//!
//! Files are processed strictly sequentially: each upload completes or fails
//! before the next begins, which keeps per-file failure reporting and the
//! final "N of M" count deterministic. One listing refresh after the whole
//! batch is the caller's responsibility.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::{StoreSettings, UploadResult};
use crate::naming::{join_pathname, slugify};
use crate::remote::StoreClient;

#[derive(Debug)]
pub enum FileOutcome {
    Uploaded {
        source: PathBuf,
        result: UploadResult,
    },
    Failed {
        source: PathBuf,
        error: StoreError,
    },
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn uploaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Uploaded { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.uploaded()
    }

    pub fn summary(&self) -> String {
        format!("{} of {} uploaded", self.uploaded(), self.outcomes.len())
    }
}

/// Destination pathname for a file dropped on `target` (an explorer folder
/// path), or on nothing, in which case it lands under the configured prefix.
pub fn destination_pathname(
    settings: &StoreSettings,
    target: Option<&[String]>,
    original_name: &str,
) -> String {
    let name = if settings.slugify_filenames {
        slugify(original_name)
    } else {
        original_name.to_string()
    };
    match target {
        Some(path) if !path.is_empty() => {
            join_pathname(path.iter().map(String::as_str).chain([name.as_str()]))
        }
        _ => join_pathname([settings.base_prefix.as_str(), name.as_str()]),
    }
}

/// Upload `files` one by one into `target` (explorer folder path) or the
/// configured base prefix. A failure skips that file and the batch continues;
/// nothing aborts early.
pub fn upload_many(client: &StoreClient, files: &[PathBuf], target: Option<&[String]>) -> BatchReport {
    let mut report = BatchReport::default();
    for file in files {
        let outcome = match upload_one(client, file, target) {
            Ok(result) => FileOutcome::Uploaded {
                source: file.clone(),
                result,
            },
            Err(error) => FileOutcome::Failed {
                source: file.clone(),
                error,
            },
        };
        report.outcomes.push(outcome);
    }
    report
}

fn upload_one(
    client: &StoreClient,
    file: &Path,
    target: Option<&[String]>,
) -> Result<UploadResult, StoreError> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::NotFound(file.display().to_string()))?;
    let pathname = destination_pathname(client.settings(), target, name);
    upload_path(client, file, &pathname)
}

/// Size-check, read and upload one local file to an already-derived pathname.
/// Shared by the batch orchestrator and the note importer.
pub(crate) fn upload_path(
    client: &StoreClient,
    file: &Path,
    pathname: &str,
) -> Result<UploadResult, StoreError> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::NotFound(file.display().to_string()))?;

    let meta = fs::metadata(file).map_err(|err| read_error(file, err))?;
    let limit = client.settings().max_file_size_bytes();
    if meta.len() > limit {
        return Err(StoreError::SizeLimit {
            pathname: name.to_string(),
            size: meta.len(),
            limit,
        });
    }

    let bytes = fs::read(file).map_err(|err| read_error(file, err))?;
    let result = client.upload(bytes, pathname, name)?;
    Ok(result)
}

/// Only a genuinely missing file is `NotFound`; permission and other I/O
/// failures keep their own message so the report does not misdiagnose them.
fn read_error(file: &Path, err: std::io::Error) -> StoreError {
    if err.kind() == std::io::ErrorKind::NotFound {
        StoreError::NotFound(file.display().to_string())
    } else {
        StoreError::Unreadable {
            path: file.display().to_string(),
            source: err,
        }
    }
}
