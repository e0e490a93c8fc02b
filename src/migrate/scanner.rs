//! Source-folder scanner: builds the candidate inventory for one run.

use crate::checksum;
use crate::migrate::progress::ProgressObserver;
use crate::migrate::types::{CancelFlag, CandidateAsset};
use crate::sidecar;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read source folder {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a scan pass ended.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Full walk completed. Candidates are sorted by path.
    Completed(Vec<CandidateAsset>),
    /// The cancel flag was observed mid-walk.
    Cancelled,
}

/// Walk the source folder and build the candidate inventory.
///
/// Directories are descended into, sidecar files are skipped (they are
/// consumed by association, not imported), and every remaining file is
/// digested and checked for sidecar presence. A file that cannot be read is
/// recorded in `errors` and dropped; only an unreadable root folder is fatal.
/// The cancel flag is sampled once per enumerated entry.
pub async fn scan_candidates(
    root: &Path,
    cancel: &CancelFlag,
    observer: &dyn ProgressObserver,
    errors: &mut Vec<String>,
) -> Result<ScanOutcome, ScanError> {
    let mut pending_dirs = vec![root.to_path_buf()];
    let mut candidates = Vec::new();

    while let Some(dir) = pending_dirs.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) if dir == root => {
                return Err(ScanError::SourceUnreadable { path: dir, source });
            }
            Err(source) => {
                warn!("Skipping unreadable directory {}: {}", dir.display(), source);
                continue;
            }
        };

        for entry in entries.flatten() {
            if cancel.is_cancelled() {
                return Ok(ScanOutcome::Cancelled);
            }

            let path = entry.path();
            if path.is_dir() {
                pending_dirs.push(path);
                continue;
            }
            if is_sidecar_file(&path) {
                continue;
            }

            observer.update(&format!("Analyzing file: {}", path.display()));

            let content_digest = match checksum::file_digest(&path).await {
                Ok(digest) => digest,
                Err(e) => {
                    warn!("Could not digest {}: {}", path.display(), e);
                    errors.push(format!("Unable to read media file {}", path.display()));
                    continue;
                }
            };
            let has_sidecar = sidecar::sidecar_path(&path).exists();

            debug!(
                "Candidate {} digest={} sidecar={}",
                path.display(),
                content_digest,
                has_sidecar
            );
            candidates.push(CandidateAsset {
                path,
                content_digest,
                has_sidecar,
            });
        }
    }

    // Duplicate selection downstream is first-discovered-wins; sort so the
    // choice does not depend on filesystem enumeration order.
    candidates.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ScanOutcome::Completed(candidates))
}

/// Whether a file is a metadata sidecar rather than media.
pub fn is_sidecar_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
